//! Infrastructure layer - External service integrations
//!
//! This layer contains the Alloy-based provider, the private-key signer,
//! and the receipt polling that backs every flow.

pub mod ethereum;
