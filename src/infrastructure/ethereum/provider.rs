//! Ethereum provider abstraction and the Alloy implementation
//!
//! The flows only talk to the node through [`EthereumProvider`], so a test
//! double can stand in for a live endpoint.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::time::{interval, timeout};

use crate::error::ClientError;
use crate::infrastructure::ethereum::types::{NetworkInfo, TxReceipt};

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
    /// IPC socket path (Unix only)
    #[cfg(unix)]
    Ipc(PathBuf),
}

impl ProviderConfig {
    /// Get display name for this endpoint
    pub fn display(&self) -> String {
        match self {
            ProviderConfig::Http(url) => url.clone(),
            ProviderConfig::WebSocket(url) => url.clone(),
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => path.display().to_string(),
        }
    }
}

/// How long to wait for inclusion and how often to ask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ReceiptPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Abstract Ethereum provider trait
///
/// Signing happens behind this seam: `send_transaction` takes an unsigned
/// request from [`EthereumProvider::sender`] and returns the hash the node
/// accepted.
#[async_trait]
pub trait EthereumProvider: Send + Sync {
    /// Chain id, client version and head block
    async fn network_info(&self) -> Result<NetworkInfo>;

    /// Get account balance at the latest block
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// Fill, sign and submit a transaction
    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256>;

    /// Block until the transaction is included
    async fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt>;

    /// Execute a call (eth_call)
    async fn call(&self, request: TransactionRequest) -> Result<Bytes>;

    /// Address of the signing account
    fn sender(&self) -> Address;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Alloy provider with a local private-key wallet attached
pub struct AlloyProvider {
    provider: DynProvider,
    sender: Address,
    endpoint: String,
    policy: ReceiptPolicy,
}

/// Create a signing provider from configuration
///
/// HTTP endpoints are not contacted until the first request; WebSocket and
/// IPC endpoints connect eagerly.
pub async fn create_provider(
    config: ProviderConfig,
    signer: PrivateKeySigner,
    policy: ReceiptPolicy,
) -> Result<AlloyProvider> {
    let sender = signer.address();
    let wallet = EthereumWallet::from(signer);
    let endpoint = config.display();

    let provider = match config {
        ProviderConfig::Http(url) => {
            let rpc_url = url.parse().context("Invalid HTTP URL")?;
            ProviderBuilder::new()
                .wallet(wallet)
                .connect_http(rpc_url)
                .erased()
        }
        ProviderConfig::WebSocket(url) => ProviderBuilder::new()
            .wallet(wallet)
            .connect(&url)
            .await
            .map_err(ClientError::from_transport)
            .context("Failed to create WebSocket provider")?
            .erased(),
        #[cfg(unix)]
        ProviderConfig::Ipc(path) => {
            use alloy::providers::IpcConnect;
            let ipc = IpcConnect::new(path.to_string_lossy().to_string());
            ProviderBuilder::new()
                .wallet(wallet)
                .connect_ipc(ipc)
                .await
                .map_err(ClientError::from_transport)
                .context("Failed to create IPC provider")?
                .erased()
        }
    };

    tracing::debug!(%endpoint, %sender, "provider ready");

    Ok(AlloyProvider {
        provider,
        sender,
        endpoint,
        policy,
    })
}

#[async_trait]
impl EthereumProvider for AlloyProvider {
    async fn network_info(&self) -> Result<NetworkInfo> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(ClientError::from_transport)?;
        let client_version = self
            .provider
            .get_client_version()
            .await
            .map_err(ClientError::from_transport)?;
        let block_number = self
            .provider
            .get_block_number()
            .await
            .map_err(ClientError::from_transport)?;

        Ok(NetworkInfo {
            chain_id,
            client_version,
            block_number,
        })
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self
            .provider
            .get_balance(address)
            .await
            .map_err(ClientError::from_transport)?)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256> {
        let request = if request.from.is_none() {
            request.with_from(self.sender)
        } else {
            request
        };

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(ClientError::from_transport)?;
        let hash = *pending.tx_hash();
        tracing::info!(%hash, "transaction submitted");
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt> {
        let started = Instant::now();
        let mut ticker = interval(self.policy.poll_interval);

        loop {
            ticker.tick().await;

            // A single hung request must not outlive the policy deadline
            let remaining = self.policy.timeout.saturating_sub(started.elapsed());
            let receipt = match timeout(remaining, self.provider.get_transaction_receipt(hash)).await
            {
                Ok(result) => result.map_err(ClientError::from_transport)?,
                Err(_) => {
                    let waited = started.elapsed();
                    return Err(ClientError::Timeout { hash, waited }.into());
                }
            };

            if let Some(receipt) = receipt {
                let receipt = TxReceipt::from(&receipt);
                tracing::info!(
                    %hash,
                    block = receipt.block_number,
                    gas_used = receipt.gas_used,
                    "transaction included"
                );
                return Ok(receipt);
            }

            let waited = started.elapsed();
            if waited >= self.policy.timeout {
                return Err(ClientError::Timeout { hash, waited }.into());
            }
            tracing::debug!(%hash, ?waited, "receipt not available yet");
        }
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes> {
        Ok(self
            .provider
            .call(request)
            .await
            .map_err(ClientError::from_transport)?)
    }

    fn sender(&self) -> Address {
        self.sender
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

/// Normalize a bare `host:port` into an HTTP URL
pub fn normalize_http_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
