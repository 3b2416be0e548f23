//! Contract interface - function signatures indexed by name and selector

use std::collections::HashMap;

use alloy_json_abi::{JsonAbi, Param, StateMutability};
use anyhow::{Context, Result};

use crate::error::ClientError;

/// A function parameter specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name (may be empty)
    pub name: String,
    /// Solidity type (e.g., "address", "uint256", "(uint256,address)")
    pub kind: String,
}

impl From<&Param> for ParamSpec {
    fn from(param: &Param) -> Self {
        Self {
            name: param.name.clone(),
            kind: param.selector_type().into_owned(),
        }
    }
}

/// A function signature with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// 4-byte function selector
    pub selector: [u8; 4],
    /// Function name
    pub name: String,
    /// Full signature string (e.g., "store(uint256)")
    pub signature: String,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
    /// `view` or `pure`: served by eth_call, never sent as a transaction
    pub read_only: bool,
}

impl FunctionSignature {
    /// Get selector as hex string
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }
}

/// The callable surface of one contract
///
/// Overloads are not supported: the first function with a given name wins.
#[derive(Debug, Default, Clone)]
pub struct ContractInterface {
    by_name: HashMap<String, FunctionSignature>,
    by_selector: HashMap<[u8; 4], String>,
}

impl ContractInterface {
    /// Build from a solc-style JSON ABI
    pub fn from_json(abi_json: &str) -> Result<Self> {
        let abi: JsonAbi = serde_json::from_str(abi_json)
            .map_err(|err| ClientError::Abi(err.to_string()))
            .context("Failed to parse contract ABI")?;
        Ok(Self::from_abi(&abi))
    }

    pub fn from_abi(abi: &JsonAbi) -> Self {
        let mut interface = Self::default();
        for function in abi.functions() {
            let read_only = matches!(
                function.state_mutability,
                StateMutability::View | StateMutability::Pure
            );
            interface.insert(FunctionSignature {
                selector: function.selector().0,
                name: function.name.clone(),
                signature: function.signature(),
                inputs: function.inputs.iter().map(ParamSpec::from).collect(),
                outputs: function.outputs.iter().map(ParamSpec::from).collect(),
                read_only,
            });
        }
        interface
    }

    /// Insert a function signature (first wins)
    pub fn insert(&mut self, function: FunctionSignature) {
        if self.by_name.contains_key(&function.name) {
            return;
        }
        self.by_selector
            .entry(function.selector)
            .or_insert_with(|| function.name.clone());
        self.by_name.insert(function.name.clone(), function);
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Result<&FunctionSignature, ClientError> {
        self.by_name
            .get(name)
            .ok_or_else(|| ClientError::Abi(format!("no function named '{name}' in interface")))
    }

    /// Look up a function by selector
    pub fn lookup(&self, selector: [u8; 4]) -> Option<&FunctionSignature> {
        self.by_selector
            .get(&selector)
            .and_then(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
