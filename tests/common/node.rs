//! Minimal JSON-RPC node over HTTP for driving the real alloy provider
//!
//! Answers just the methods the flows and alloy's fillers use. Every
//! accepted raw transaction moves 10 ETH from the dev account to the dev
//! receiver so balance accounting can be checked end to end.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy::primitives::{keccak256, Address, U256};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pasifika_rpc_demo::domain::accounts::{DEV_ACCOUNT, DEV_RECEIVER, PASIFIKA_CHAIN_ID};

use super::{ether, genesis_balance};

/// How the node answers `eth_getTransactionReceipt`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptMode {
    /// Included in the next block
    Included,
    /// Always `null`
    Pending,
    /// The request never gets a response
    Hang,
}

pub struct FakeNode {
    receipts: ReceiptMode,
    reject_sends: Option<String>,
    sent: AtomicU64,
}

impl FakeNode {
    pub fn new(receipts: ReceiptMode) -> Self {
        Self {
            receipts,
            reject_sends: None,
            sent: AtomicU64::new(0),
        }
    }

    /// Reject every `eth_sendRawTransaction` with a -32000 error
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_sends: Some(message.to_string()),
            ..Self::new(ReceiptMode::Included)
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    fn balance_of(&self, address: Address) -> U256 {
        let moved = ether(10) * U256::from(self.sent());
        if address == DEV_ACCOUNT {
            genesis_balance() - moved
        } else if address == DEV_RECEIVER {
            genesis_balance() + moved
        } else {
            U256::ZERO
        }
    }

    async fn answer(&self, method: &str, params: &Value) -> Result<Value, (i64, String)> {
        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", PASIFIKA_CHAIN_ID))),
            "web3_clientVersion" => Ok(json!("reth/v1.1.0-fake")),
            "eth_blockNumber" => Ok(json!(format!("0x{:x}", self.sent() + 1))),
            "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Ok(json!("0x0")),
            "eth_estimateGas" => Ok(json!("0x5208")),
            "eth_getTransactionCount" => Ok(json!(format!("0x{:x}", self.sent()))),
            "eth_getBalance" => {
                let address = params[0]
                    .as_str()
                    .and_then(|s| s.parse::<Address>().ok())
                    .ok_or((-32602, "invalid address".to_string()))?;
                Ok(json!(self.balance_of(address)))
            }
            "eth_sendRawTransaction" => {
                if let Some(message) = &self.reject_sends {
                    return Err((-32000, message.clone()));
                }
                let raw = params[0]
                    .as_str()
                    .and_then(|s| hex::decode(s.trim_start_matches("0x")).ok())
                    .ok_or((-32602, "invalid raw transaction".to_string()))?;
                self.sent.fetch_add(1, Ordering::SeqCst);
                Ok(json!(keccak256(raw)))
            }
            "eth_getTransactionReceipt" => match self.receipts {
                ReceiptMode::Included => Ok(receipt_json(&params[0], self.sent())),
                ReceiptMode::Pending => Ok(Value::Null),
                ReceiptMode::Hang => std::future::pending().await,
            },
            "eth_call" => Ok(json!(format!("0x{:064x}", 42))),
            _ => Err((-32601, format!("method {method} not found"))),
        }
    }
}

fn receipt_json(hash: &Value, block: u64) -> Value {
    json!({
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "11".repeat(32)),
        "blockNumber": format!("0x{:x}", block),
        "from": DEV_ACCOUNT,
        "to": DEV_RECEIVER,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x0",
        "contractAddress": DEV_ACCOUNT.create(0),
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": "0x1",
        "type": "0x0"
    })
}

async fn rpc(State(node): State<Arc<FakeNode>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();

    let response = match node.answer(&method, &request["params"]).await {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    };
    Json(response)
}

/// A running [`FakeNode`]; the server stops when this is dropped
pub struct NodeHandle {
    pub url: String,
    pub node: Arc<FakeNode>,
    task: JoinHandle<()>,
}

impl Drop for NodeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Serve `node` on an ephemeral localhost port
pub async fn spawn(node: FakeNode) -> NodeHandle {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake node");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));
    let node = Arc::new(node);

    let app = Router::new().route("/", post(rpc)).with_state(node.clone());
    let task = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake node server");
    });

    NodeHandle { url, node, task }
}
