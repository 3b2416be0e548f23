//! Deploy the `Storage` contract, store a value and read it back

use std::io::Write;

use alloy::primitives::{Address, U256};
use alloy_dyn_abi::DynSolValue;
use anyhow::{bail, Context, Result};

use super::{check_chain_id, WorkflowResult};
use crate::domain::abi::format_value;
use crate::domain::accounts::PASIFIKA_CHAIN_ID;
use crate::domain::storage::{storage_interface, STORAGE_BYTECODE};
use crate::error::ClientError;
use crate::infrastructure::ethereum::{
    deploy_contract, EthereumProvider, GasSettings, NetworkInfo, TxReceipt,
};
use crate::modules::toolkit::format_ether;

/// Deployment configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployParams {
    /// Gas for the creation transaction
    pub deploy_gas: GasSettings,
    /// Gas for the `store` transaction
    pub call_gas: GasSettings,
    pub store_value: U256,
    pub expected_chain_id: Option<u64>,
}

impl Default for DeployParams {
    fn default() -> Self {
        Self {
            deploy_gas: GasSettings {
                gas_limit: 3_000_000,
                gas_price: 0,
            },
            call_gas: GasSettings {
                gas_limit: 100_000,
                gas_price: 0,
            },
            store_value: U256::from(42),
            expected_chain_id: Some(PASIFIKA_CHAIN_ID),
        }
    }
}

/// What the deployment observed
#[derive(Clone, Debug)]
pub struct DeploymentReport {
    pub deployer: Address,
    pub deployer_balance: U256,
    pub network: NetworkInfo,
    pub contract_address: Address,
    pub deploy_receipt: TxReceipt,
    pub store_receipt: TxReceipt,
    pub stored: U256,
    pub retrieved: U256,
}

impl DeploymentReport {
    /// `retrieve()` returned what `store()` wrote
    pub fn round_trip_ok(&self) -> bool {
        self.stored == self.retrieved
    }

    /// Fees paid by both transactions
    pub fn total_fee(&self) -> U256 {
        self.deploy_receipt.fee() + self.store_receipt.fee()
    }
}

/// Run the deployment flow
pub async fn deploy(
    provider: &dyn EthereumProvider,
    params: &DeployParams,
    out: &mut dyn Write,
) -> Result<DeploymentReport> {
    writeln!(out, "Deploying contract via {}", provider.endpoint_name())?;

    let deployer = provider.sender();
    writeln!(out, "Deployer address: {}", deployer)?;

    let deployer_balance = provider
        .get_balance(deployer)
        .await
        .context("Failed to read deployer balance")?;
    writeln!(out, "Balance: {} ETH", format_ether(deployer_balance))?;

    let network = provider
        .network_info()
        .await
        .context("Failed to query network")?;
    check_chain_id(&network, params.expected_chain_id);
    writeln!(
        out,
        "Network: chain id {} ({})",
        network.chain_id,
        network.chain_name()
    )?;

    writeln!(out, "\nDeploying contract...")?;
    let (contract, deploy_receipt) = deploy_contract(
        provider,
        storage_interface()?,
        STORAGE_BYTECODE.clone(),
        params.deploy_gas,
    )
    .await?;
    writeln!(
        out,
        "Contract deployed at: {} (block {})",
        contract.address(),
        deploy_receipt.block_number
    )?;

    writeln!(out, "\nTesting contract...")?;
    writeln!(out, "Storing value {}...", params.store_value)?;
    let store_receipt = contract
        .send(
            provider,
            "store",
            &[DynSolValue::Uint(params.store_value, 256)],
            params.call_gas,
        )
        .await?;
    writeln!(out, "Value stored (block {})", store_receipt.block_number)?;

    let values = contract.call(provider, "retrieve", &[]).await?;
    let retrieved = match values.first() {
        Some(DynSolValue::Uint(value, _)) => *value,
        Some(other) => bail!(ClientError::Abi(format!(
            "retrieve() returned {}, expected uint256",
            format_value(other)
        ))),
        None => bail!(ClientError::Abi("retrieve() returned nothing".into())),
    };
    writeln!(out, "Retrieved value: {}", retrieved)?;

    let report = DeploymentReport {
        deployer,
        deployer_balance,
        network,
        contract_address: contract.address(),
        deploy_receipt,
        store_receipt,
        stored: params.store_value,
        retrieved,
    };

    if !report.round_trip_ok() {
        tracing::warn!(
            stored = %report.stored,
            retrieved = %report.retrieved,
            "retrieve() disagrees with the stored value"
        );
    }

    WorkflowResult::new("All done")
        .add("Contract address", report.contract_address.to_string())
        .add(
            "Gas used",
            (report.deploy_receipt.gas_used + report.store_receipt.gas_used).to_string(),
        )
        .add("Total gas cost", format!("{} ETH", format_ether(report.total_fee())))
        .write_to(out)?;

    Ok(report)
}
