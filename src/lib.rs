//! Pasifika PoA RPC client flows
//!
//! Deploys a small `Storage` contract and sends native transfers against an
//! already-running node, through an alloy-backed provider.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod modules;

pub use error::ClientError;
pub use infrastructure::ethereum::{
    create_provider, AlloyProvider, EthereumProvider, ProviderConfig, ReceiptPolicy,
};
