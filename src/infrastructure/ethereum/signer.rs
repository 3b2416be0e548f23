//! Private-key signer resolution

use alloy::signers::local::PrivateKeySigner;

use crate::error::ClientError;

/// Build a local signer from a hex private key, with or without `0x`
pub fn signer_from_key(key: &str) -> Result<PrivateKeySigner, ClientError> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Signer("empty private key".into()));
    }
    trimmed
        .parse::<PrivateKeySigner>()
        .map_err(|err| ClientError::Signer(err.to_string()))
}
