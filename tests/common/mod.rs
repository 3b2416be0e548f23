//! In-memory chain standing in for a node behind `EthereumProvider`
#![allow(dead_code)]

pub mod node;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy_dyn_abi::DynSolValue;
use anyhow::Result;
use async_trait::async_trait;

use pasifika_rpc_demo::domain::abi::{decode_input, ContractInterface};
use pasifika_rpc_demo::domain::accounts::{DEV_ACCOUNT, DEV_RECEIVER, PASIFIKA_CHAIN_ID};
use pasifika_rpc_demo::domain::storage::storage_interface;
use pasifika_rpc_demo::infrastructure::ethereum::{NetworkInfo, TxReceipt, TxStatus};
use pasifika_rpc_demo::{ClientError, EthereumProvider};

const TX_BASE_GAS: u64 = 21_000;
const CREATE_GAS: u64 = 32_000;
const SSTORE_GAS: u64 = 22_100;

/// Genesis balance of every funded account (0x2 followed by 62 zero nibbles)
pub fn genesis_balance() -> U256 {
    U256::from(2u64) << 248
}

/// First `ClientError` in an error's cause chain
pub fn client_error(err: &anyhow::Error) -> Option<&ClientError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ClientError>())
}

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

#[derive(Default)]
struct ChainState {
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    contracts: HashSet<Address>,
    slots: HashMap<Address, U256>,
    receipts: HashMap<B256, TxReceipt>,
    block_number: u64,
}

pub struct MockChain {
    state: Mutex<ChainState>,
    interface: ContractInterface,
    sender: Address,
    chain_id: u64,
    offline: bool,
    drop_receipts: bool,
}

impl MockChain {
    /// Sender and receiver funded as in the Pasifika genesis
    pub fn funded() -> Self {
        let mut state = ChainState::default();
        state.balances.insert(DEV_ACCOUNT, genesis_balance());
        state.balances.insert(DEV_RECEIVER, genesis_balance());

        Self {
            state: Mutex::new(state),
            interface: storage_interface().expect("embedded ABI parses"),
            sender: DEV_ACCOUNT,
            chain_id: PASIFIKA_CHAIN_ID,
            offline: false,
            drop_receipts: false,
        }
    }

    /// Every request fails as if the endpoint refused the connection
    pub fn unreachable() -> Self {
        Self {
            offline: true,
            ..Self::funded()
        }
    }

    /// Accepts transactions but never includes them
    pub fn stalled() -> Self {
        Self {
            drop_receipts: true,
            ..Self::funded()
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_balance(self, address: Address, balance: U256) -> Self {
        self.state.lock().unwrap().balances.insert(address, balance);
        self
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default()
    }

    pub fn slot_of(&self, contract: Address) -> Option<U256> {
        self.state.lock().unwrap().slots.get(&contract).copied()
    }

    pub fn nonce_of(&self, address: Address) -> u64 {
        self.state
            .lock()
            .unwrap()
            .nonces
            .get(&address)
            .copied()
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(ClientError::Transport("error sending request: connection refused".into()).into());
        }
        Ok(())
    }

    fn rejected(message: &str) -> anyhow::Error {
        ClientError::Rpc {
            code: -32000,
            message: message.to_string(),
        }
        .into()
    }
}

fn calldata_gas(data: &[u8]) -> u64 {
    data.iter().map(|b| if *b == 0 { 4 } else { 16 }).sum()
}

#[async_trait]
impl EthereumProvider for MockChain {
    async fn network_info(&self) -> Result<NetworkInfo> {
        self.check_online()?;
        Ok(NetworkInfo {
            chain_id: self.chain_id,
            client_version: "reth/v1.1.0-mock".to_string(),
            block_number: self.state.lock().unwrap().block_number,
        })
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        self.check_online()?;
        Ok(self.balance_of(address))
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256> {
        self.check_online()?;

        let from = request.from.unwrap_or(self.sender);
        let value = request.value.unwrap_or_default();
        let gas_limit = request.gas.unwrap_or(TX_BASE_GAS);
        let gas_price = request.gas_price.unwrap_or_default();
        let input = request.input.input().cloned().unwrap_or_default();
        let kind = request.to.unwrap_or(TxKind::Create);

        let mut intrinsic = TX_BASE_GAS + calldata_gas(&input);
        if kind.is_create() {
            intrinsic += CREATE_GAS;
        }
        if gas_limit < intrinsic {
            return Err(Self::rejected("intrinsic gas too low"));
        }

        let mut state = self.state.lock().unwrap();
        let balance = state.balances.get(&from).copied().unwrap_or_default();
        let max_cost = value + U256::from(gas_limit) * U256::from(gas_price);
        if balance < max_cost {
            return Err(Self::rejected("insufficient funds for gas * price + value"));
        }

        let nonce = state.nonces.get(&from).copied().unwrap_or_default();
        let mut gas_used = intrinsic;
        let mut status = TxStatus::Success;
        let mut contract_address = None;

        match kind {
            TxKind::Create => {
                let address = from.create(nonce);
                state.contracts.insert(address);
                contract_address = Some(address);
                gas_used += SSTORE_GAS;
            }
            TxKind::Call(to) if state.contracts.contains(&to) => {
                match decode_input(&self.interface, &input) {
                    Ok(call) if call.function_name == "store" => {
                        if let Some(DynSolValue::Uint(stored, _)) = call.arguments.first() {
                            state.slots.insert(to, *stored);
                        }
                        gas_used += SSTORE_GAS;
                    }
                    _ => status = TxStatus::Revert,
                }
            }
            TxKind::Call(_) => {}
        }
        gas_used = gas_used.min(gas_limit);

        let fee = U256::from(gas_used) * U256::from(gas_price);
        let moved = if status == TxStatus::Success { value } else { U256::ZERO };
        *state.balances.entry(from).or_default() -= moved + fee;
        if let TxKind::Call(to) = kind {
            *state.balances.entry(to).or_default() += moved;
        }
        state.nonces.insert(from, nonce + 1);
        state.block_number += 1;

        let mut preimage = from.to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let hash = keccak256(preimage);

        let receipt = TxReceipt {
            transaction_hash: hash,
            block_number: state.block_number,
            gas_used,
            effective_gas_price: gas_price,
            status,
            contract_address,
        };
        if !self.drop_receipts {
            state.receipts.insert(hash, receipt);
        }
        Ok(hash)
    }

    async fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt> {
        self.check_online()?;
        self.state
            .lock()
            .unwrap()
            .receipts
            .get(&hash)
            .cloned()
            .ok_or_else(|| {
                ClientError::Timeout {
                    hash,
                    waited: Duration::from_secs(60),
                }
                .into()
            })
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes> {
        self.check_online()?;

        let Some(TxKind::Call(to)) = request.to else {
            return Err(Self::rejected("eth_call without target"));
        };
        let input = request.input.input().cloned().unwrap_or_default();
        let state = self.state.lock().unwrap();
        if !state.contracts.contains(&to) {
            // Calls to accounts without code return empty data
            return Ok(Bytes::new());
        }

        match decode_input(&self.interface, &input) {
            Ok(call) if call.function_name == "retrieve" => {
                let value = state.slots.get(&to).copied().unwrap_or_default();
                Ok(Bytes::from(DynSolValue::Uint(value, 256).abi_encode()))
            }
            _ => Err(Self::rejected("execution reverted")),
        }
    }

    fn sender(&self) -> Address {
        self.sender
    }

    fn endpoint_name(&self) -> String {
        "mock://pasifika".to_string()
    }
}
