//! Domain layer - chain-independent data the flows operate on

pub mod abi;
pub mod accounts;
pub mod storage;
