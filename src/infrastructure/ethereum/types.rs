//! Plain data returned by the provider seam

use alloy::primitives::{Address, B256, U256};
use alloy::rpc::types::TransactionReceipt;

/// Transaction outcome as reported by the receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Success,
    Revert,
}

/// Receipt of an included transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: u64,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub status: TxStatus,
    /// Set for contract-creation transactions
    pub contract_address: Option<Address>,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == TxStatus::Success
    }

    /// Total fee charged to the sender
    pub fn fee(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}

impl From<&TransactionReceipt> for TxReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        let status = if receipt.status() {
            TxStatus::Success
        } else {
            TxStatus::Revert
        };

        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used: receipt.gas_used,
            effective_gas_price: receipt.effective_gas_price,
            status,
            contract_address: receipt.contract_address,
        }
    }
}

/// Snapshot of the node's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub client_version: String,
    pub block_number: u64,
}

impl NetworkInfo {
    pub fn node_kind(&self) -> String {
        detect_node_kind(&self.client_version)
    }

    pub fn chain_name(&self) -> &'static str {
        chain_name(self.chain_id)
    }
}

/// Human name for well-known chain ids
pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        crate::domain::accounts::PASIFIKA_CHAIN_ID => "Pasifika PoA",
        31337 => "anvil",
        1 => "mainnet",
        11155111 => "sepolia",
        _ => "unknown",
    }
}

/// Detect node kind from client version string
pub fn detect_node_kind(version: &str) -> String {
    let lower = version.to_lowercase();
    if lower.contains("anvil") {
        "anvil".to_string()
    } else if lower.contains("reth") {
        "reth".to_string()
    } else if lower.contains("geth") || lower.contains("go-ethereum") {
        "geth".to_string()
    } else {
        version.to_string()
    }
}
