//! Contract handle: an address plus the interface used to talk to it

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy_dyn_abi::DynSolValue;
use anyhow::{bail, Context, Result};

use crate::domain::abi::{decode_output, encode_call, ContractInterface};
use crate::error::ClientError;
use crate::infrastructure::ethereum::{EthereumProvider, TxReceipt};

/// Gas settings attached to every transaction a flow sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    pub gas_limit: u64,
    /// Legacy gas price in wei; the Pasifika chain runs at zero
    pub gas_price: u128,
}

impl GasSettings {
    pub fn apply(&self, request: TransactionRequest) -> TransactionRequest {
        request
            .with_gas_limit(self.gas_limit)
            .with_gas_price(self.gas_price)
    }
}

/// Submit `request` and wait for a successful receipt
pub async fn send_and_confirm(
    provider: &dyn EthereumProvider,
    request: TransactionRequest,
) -> Result<TxReceipt> {
    let hash = provider.send_transaction(request).await?;
    let receipt = provider.wait_for_receipt(hash).await?;
    if !receipt.succeeded() {
        bail!(ClientError::Reverted { hash });
    }
    Ok(receipt)
}

/// Deploy `bytecode` and return the handle plus the creation receipt
pub async fn deploy_contract(
    provider: &dyn EthereumProvider,
    interface: ContractInterface,
    bytecode: Bytes,
    gas: GasSettings,
) -> Result<(ContractHandle, TxReceipt)> {
    let request = gas.apply(
        TransactionRequest::default()
            .with_from(provider.sender())
            .with_deploy_code(bytecode),
    );

    let receipt = send_and_confirm(provider, request)
        .await
        .context("Contract deployment failed")?;
    let Some(address) = receipt.contract_address else {
        bail!(ClientError::MissingContractAddress {
            hash: receipt.transaction_hash
        });
    };

    Ok((ContractHandle::new(address, interface), receipt))
}

/// A deployed contract
#[derive(Debug, Clone)]
pub struct ContractHandle {
    address: Address,
    interface: ContractInterface,
}

impl ContractHandle {
    pub fn new(address: Address, interface: ContractInterface) -> Self {
        Self { address, interface }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Send a state-mutating call and wait for inclusion
    pub async fn send(
        &self,
        provider: &dyn EthereumProvider,
        function: &str,
        args: &[DynSolValue],
        gas: GasSettings,
    ) -> Result<TxReceipt> {
        let signature = self.interface.function(function)?;
        if signature.read_only {
            bail!(ClientError::Abi(format!(
                "{} is read-only; use call",
                signature.signature
            )));
        }

        let input = encode_call(signature, args)?;
        let request = gas.apply(
            TransactionRequest::default()
                .with_from(provider.sender())
                .with_to(self.address)
                .with_input(input),
        );

        send_and_confirm(provider, request)
            .await
            .with_context(|| format!("{} failed", signature.signature))
    }

    /// Execute a read-only call and decode its return values
    pub async fn call(
        &self,
        provider: &dyn EthereumProvider,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        let signature = self.interface.function(function)?;
        let input = encode_call(signature, args)?;
        let request = TransactionRequest::default()
            .with_to(self.address)
            .with_input(input);

        let output = provider
            .call(request)
            .await
            .with_context(|| format!("{} failed", signature.signature))?;
        decode_output(signature, &output)
    }
}
