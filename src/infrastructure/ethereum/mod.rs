//! Ethereum provider layer

mod contract;
mod provider;
mod signer;
pub mod types;

pub use provider::{
    create_provider, normalize_http_endpoint, AlloyProvider, EthereumProvider, ProviderConfig,
    ReceiptPolicy,
};
pub use signer::signer_from_key;
pub use types::{NetworkInfo, TxReceipt, TxStatus};
pub use contract::{deploy_contract, send_and_confirm, ContractHandle, GasSettings};
