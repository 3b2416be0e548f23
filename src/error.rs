use std::time::Duration;

use alloy::primitives::B256;
use alloy::transports::TransportError;
use thiserror::Error;

/// Failures surfaced by the provider seam and the flows built on it
///
/// Every variant aborts the current run; nothing is retried.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The node could not be reached or the transport broke mid-request
    #[error("connection to node failed: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object
    #[error("node rejected request (code {code}): {message}")]
    Rpc { code: i64, message: String },

    /// The private key could not be turned into a signer
    #[error("invalid signing key: {0}")]
    Signer(String),

    /// No receipt appeared before the receipt policy gave up
    #[error("transaction {hash} not included after {waited:?}")]
    Timeout { hash: B256, waited: Duration },

    /// Included, but execution failed
    #[error("transaction {hash} reverted")]
    Reverted { hash: B256 },

    #[error("creation transaction {hash} produced no contract address")]
    MissingContractAddress { hash: B256 },

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Split alloy transport errors into node-side rejections and connectivity failures
    pub fn from_transport(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => ClientError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            None => ClientError::Transport(err.to_string()),
        }
    }

    /// True for failures where the node was never reached
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
