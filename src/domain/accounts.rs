//! Accounts and constants from the Pasifika genesis

use alloy::primitives::{address, Address};

/// Chain id configured in the Pasifika genesis
pub const PASIFIKA_CHAIN_ID: u64 = 999_888;

/// Well-known development key, funded in genesis
///
/// Only for local test networks. Anything holding real value must be signed
/// with a key supplied at runtime.
pub const DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`DEV_PRIVATE_KEY`]
pub const DEV_ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Default transfer recipient
pub const DEV_RECEIVER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Accounts pre-funded in genesis
pub const GENESIS_ACCOUNTS: [Address; 10] = [
    address!("0000000000000000000000000000000000000001"),
    address!("6Be02d1d3665660d22FF9624b7BE0551ee1Ac91b"),
    DEV_ACCOUNT,
    DEV_RECEIVER,
    address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
    address!("15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
    address!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
    address!("976EA74026E726554dB657fA54763abd0C3a0aa9"),
    address!("14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
];
