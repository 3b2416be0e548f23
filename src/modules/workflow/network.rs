//! Read-only overview of the node and a set of account balances

use std::io::Write;

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};

use super::{check_chain_id, WorkflowResult};
use crate::infrastructure::ethereum::{EthereumProvider, NetworkInfo};
use crate::modules::toolkit::format_ether;

#[derive(Clone, Debug)]
pub struct NetworkReport {
    pub info: NetworkInfo,
    pub chain_id_matches: bool,
    pub balances: Vec<(Address, U256)>,
}

/// Print chain identity and the balance of each account
pub async fn network(
    provider: &dyn EthereumProvider,
    accounts: &[Address],
    expected_chain_id: Option<u64>,
    out: &mut dyn Write,
) -> Result<NetworkReport> {
    let info = provider
        .network_info()
        .await
        .context("Failed to query network")?;
    let chain_id_matches = check_chain_id(&info, expected_chain_id);

    WorkflowResult::new(format!("Node {}", provider.endpoint_name()))
        .add("Chain id", format!("{} ({})", info.chain_id, info.chain_name()))
        .add("Client", format!("{} [{}]", info.client_version, info.node_kind()))
        .add("Latest block", info.block_number.to_string())
        .write_to(out)?;

    let mut balances = Vec::with_capacity(accounts.len());
    for &account in accounts {
        let balance = provider
            .get_balance(account)
            .await
            .with_context(|| format!("Failed to read balance of {account}"))?;
        balances.push((account, balance));
    }

    if !balances.is_empty() {
        balances
            .iter()
            .fold(WorkflowResult::new("Balances"), |result, (account, balance)| {
                result.add(account.to_string(), format!("{} ETH", format_ether(*balance)))
            })
            .write_to(out)?;
    }

    Ok(NetworkReport {
        info,
        chain_id_matches,
        balances,
    })
}
