//! Native-asset transfer with before/after balances

use std::fmt;
use std::io::Write;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use anyhow::{bail, Context, Result};

use super::WorkflowResult;
use crate::domain::accounts::DEV_RECEIVER;
use crate::error::ClientError;
use crate::infrastructure::ethereum::{EthereumProvider, GasSettings, TxReceipt};
use crate::modules::toolkit::{format_ether, format_gwei, WEI_PER_ETHER};

/// Gas consumed by a plain value transfer
pub const TRANSFER_GAS: u64 = 21_000;

/// Transfer configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    pub receiver: Address,
    pub amount: U256,
    pub gas: GasSettings,
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            receiver: DEV_RECEIVER,
            amount: U256::from(10u64) * WEI_PER_ETHER,
            gas: GasSettings {
                gas_limit: TRANSFER_GAS,
                gas_price: 0,
            },
        }
    }
}

/// Signed difference between two balance readings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceChange {
    Gained(U256),
    Lost(U256),
    Unchanged,
}

impl BalanceChange {
    pub fn between(before: U256, after: U256) -> Self {
        if after > before {
            BalanceChange::Gained(after - before)
        } else if after < before {
            BalanceChange::Lost(before - after)
        } else {
            BalanceChange::Unchanged
        }
    }
}

impl fmt::Display for BalanceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceChange::Gained(wei) => write!(f, "+{} ETH", format_ether(*wei)),
            BalanceChange::Lost(wei) => write!(f, "-{} ETH", format_ether(*wei)),
            BalanceChange::Unchanged => write!(f, "0 ETH"),
        }
    }
}

/// What the transfer observed
#[derive(Clone, Debug)]
pub struct TransferReport {
    pub sender: Address,
    pub receiver: Address,
    pub amount: U256,
    pub sender_before: U256,
    pub receiver_before: U256,
    pub sender_after: U256,
    pub receiver_after: U256,
    pub receipt: TxReceipt,
}

impl TransferReport {
    pub fn sender_change(&self) -> BalanceChange {
        BalanceChange::between(self.sender_before, self.sender_after)
    }

    pub fn receiver_change(&self) -> BalanceChange {
        BalanceChange::between(self.receiver_before, self.receiver_after)
    }

    pub fn fee(&self) -> U256 {
        self.receipt.fee()
    }

    /// Balances moved by exactly `amount`, plus the fee on the sender side
    ///
    /// Fails if anything else touched either account between the two reads.
    pub fn balances_consistent(&self) -> bool {
        if self.sender == self.receiver {
            return self.sender_before.checked_sub(self.fee()) == Some(self.sender_after);
        }

        let expected_sender = self
            .sender_before
            .checked_sub(self.amount)
            .and_then(|rest| rest.checked_sub(self.fee()));
        let expected_receiver = self.receiver_before.checked_add(self.amount);

        expected_sender == Some(self.sender_after) && expected_receiver == Some(self.receiver_after)
    }
}

/// Run the transfer flow
pub async fn transfer(
    provider: &dyn EthereumProvider,
    params: &TransferParams,
    out: &mut dyn Write,
) -> Result<TransferReport> {
    let sender = provider.sender();
    let receiver = params.receiver;

    writeln!(out, "Sending transaction via {}", provider.endpoint_name())?;
    writeln!(out, "From: {}", sender)?;
    writeln!(out, "To:   {}", receiver)?;

    let sender_before = provider
        .get_balance(sender)
        .await
        .context("Failed to read sender balance")?;
    let receiver_before = provider
        .get_balance(receiver)
        .await
        .context("Failed to read receiver balance")?;

    WorkflowResult::new("Balances before")
        .add("Sender", format!("{} ETH", format_ether(sender_before)))
        .add("Receiver", format!("{} ETH", format_ether(receiver_before)))
        .write_to(out)?;

    writeln!(out, "\nSending: {} ETH", format_ether(params.amount))?;
    let request = params.gas.apply(
        TransactionRequest::default()
            .with_from(sender)
            .with_to(receiver)
            .with_value(params.amount),
    );

    let hash = provider
        .send_transaction(request)
        .await
        .context("Transfer failed")?;
    writeln!(out, "Transaction hash: {}", hash)?;
    writeln!(out, "Waiting for confirmation...")?;
    let receipt = provider.wait_for_receipt(hash).await?;
    if !receipt.succeeded() {
        bail!(ClientError::Reverted { hash });
    }
    writeln!(out, "Confirmed in block: {}", receipt.block_number)?;

    let sender_after = provider
        .get_balance(sender)
        .await
        .context("Failed to read sender balance")?;
    let receiver_after = provider
        .get_balance(receiver)
        .await
        .context("Failed to read receiver balance")?;

    let report = TransferReport {
        sender,
        receiver,
        amount: params.amount,
        sender_before,
        receiver_before,
        sender_after,
        receiver_after,
        receipt,
    };

    WorkflowResult::new("Balances after")
        .add("Sender", format!("{} ETH", format_ether(sender_after)))
        .add("Receiver", format!("{} ETH", format_ether(receiver_after)))
        .write_to(out)?;

    WorkflowResult::new("Transaction cost")
        .add("Gas used", report.receipt.gas_used.to_string())
        .add(
            "Gas price",
            format!(
                "{} gwei",
                format_gwei(U256::from(report.receipt.effective_gas_price))
            ),
        )
        .add("Total cost", format!("{} ETH", format_ether(report.fee())))
        .write_to(out)?;

    let verdict = if report.balances_consistent() {
        "Transfer verified"
    } else {
        tracing::warn!(
            sender_before = %report.sender_before,
            sender_after = %report.sender_after,
            receiver_before = %report.receiver_before,
            receiver_after = %report.receiver_after,
            "balance deltas do not match amount plus fee"
        );
        "Transfer NOT verified (balances moved unexpectedly)"
    };

    WorkflowResult::new(verdict)
        .add("Sender", report.sender_change().to_string())
        .add("Receiver", report.receiver_change().to_string())
        .write_to(out)?;

    Ok(report)
}
