//! The `Storage` demo contract: one `uint256` slot behind `store`/`retrieve`

use alloy::primitives::{bytes, Bytes};
use anyhow::{Context, Result};

use crate::domain::abi::ContractInterface;

/// solc ABI of the contract
pub const STORAGE_ABI: &str = r#"[
    {
        "type": "function",
        "name": "store",
        "stateMutability": "nonpayable",
        "inputs": [{ "name": "num", "type": "uint256", "internalType": "uint256" }],
        "outputs": []
    },
    {
        "type": "function",
        "name": "retrieve",
        "stateMutability": "view",
        "inputs": [],
        "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }]
    }
]"#;

/// Creation bytecode (solc 0.8.18)
pub static STORAGE_BYTECODE: Bytes = bytes!(
    "608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c80632e64cec11461003b5780636057361d14610059575b600080fd5b610043610075565b60405161005091906100a1565b60405180910390f35b610073600480360381019061006e91906100ed565b61007e565b005b60008054905090565b8060008190555050565b6000819050919050565b61009b81610088565b82525050565b60006020820190506100b66000830184610092565b92915050565b600080fd5b6100ca81610088565b81146100d557600080fd5b50565b6000813590506100e7816100c1565b92915050565b600060208284031215610103576101026100bc565b5b6000610111848285016100d8565b9150509291505056fea2646970667358221220d8378feed47d0cfc6a6e6c68e17f2e0c6e1b4f9c8e7f3c5a8f8c3f0b8e7f3c64736f6c63430008120033"
);

/// Parsed interface of the contract
pub fn storage_interface() -> Result<ContractInterface> {
    ContractInterface::from_json(STORAGE_ABI).context("Storage ABI is malformed")
}
