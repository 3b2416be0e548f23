use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::domain::accounts::{DEV_RECEIVER, GENESIS_ACCOUNTS, PASIFIKA_CHAIN_ID};
use crate::error::ClientError;
use crate::infrastructure::ethereum::{GasSettings, ReceiptPolicy};
use crate::modules::toolkit::parse_amount;
use crate::modules::workflow::{DeployParams, TransferParams};

pub const DEFAULT_RPC: &str = "http://localhost:8545";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub gas_limit: u64,
    pub call_gas_limit: u64,
    pub gas_price: u64,
    pub store_value: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            gas_limit: 3_000_000,
            call_gas_limit: 100_000,
            gas_price: 0,
            store_value: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub receiver: String,
    /// Decimal amount, ether unless a unit follows ("10.0", "5 gwei")
    pub amount: String,
    pub gas_limit: u64,
    pub gas_price: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            receiver: DEV_RECEIVER.to_string(),
            amount: "10.0".to_string(),
            gas_limit: 21_000,
            gas_price: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: String,
    pub private_key: Option<String>,
    pub expected_chain_id: Option<u64>,
    pub receipt_timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// Accounts listed by `network`
    pub accounts: Vec<String>,
    pub deploy: DeployConfig,
    pub transfer: TransferConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc: DEFAULT_RPC.to_string(),
            private_key: None,
            expected_chain_id: Some(PASIFIKA_CHAIN_ID),
            receipt_timeout_secs: 60,
            poll_interval_ms: 500,
            accounts: GENESIS_ACCOUNTS.iter().map(|a| a.to_string()).collect(),
            deploy: DeployConfig::default(),
            transfer: TransferConfig::default(),
        }
    }
}

impl Config {
    pub fn receipt_policy(&self) -> ReceiptPolicy {
        ReceiptPolicy {
            timeout: Duration::from_secs(self.receipt_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }

    pub fn deploy_params(&self) -> DeployParams {
        DeployParams {
            deploy_gas: GasSettings {
                gas_limit: self.deploy.gas_limit,
                gas_price: u128::from(self.deploy.gas_price),
            },
            call_gas: GasSettings {
                gas_limit: self.deploy.call_gas_limit,
                gas_price: u128::from(self.deploy.gas_price),
            },
            store_value: alloy::primitives::U256::from(self.deploy.store_value),
            expected_chain_id: self.expected_chain_id,
        }
    }

    pub fn transfer_params(&self) -> Result<TransferParams, ClientError> {
        Ok(TransferParams {
            receiver: parse_address(&self.transfer.receiver)?,
            amount: parse_amount(&self.transfer.amount)?,
            gas: GasSettings {
                gas_limit: self.transfer.gas_limit,
                gas_price: u128::from(self.transfer.gas_price),
            },
        })
    }

    pub fn account_addresses(&self) -> Result<Vec<Address>, ClientError> {
        self.accounts.iter().map(|a| parse_address(a)).collect()
    }
}

pub fn parse_address(value: &str) -> Result<Address, ClientError> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|err| ClientError::InvalidConfig(format!("invalid address '{}': {}", value, err)))
}

pub fn parse(content: &str) -> Result<Config, ClientError> {
    toml::from_str::<Config>(content).map_err(|err| ClientError::InvalidConfig(err.to_string()))
}

/// Load the config file; a missing file means defaults
pub fn load() -> Config {
    let explicit = std::env::var_os("PASIFIKA_CONFIG").is_some();
    match config_path() {
        Some(path) => load_from(&path, explicit),
        None => Config::default(),
    }
}

/// Load `path`, warning on a malformed file and, when `explicit`, on a missing one
pub fn load_from(path: &Path, explicit: bool) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if explicit {
                tracing::warn!(path = %path.display(), %err, "PASIFIKA_CONFIG is not readable, using defaults");
            }
            return Config::default();
        }
    };
    match parse(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed config file");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    let env_path = |name: &str| std::env::var_os(name).map(PathBuf::from);
    resolve_config_path(
        env_path("PASIFIKA_CONFIG"),
        env_path("XDG_CONFIG_HOME"),
        env_path("HOME"),
    )
}

/// Lookup order: explicit path, XDG config dir, `~/.config`, platform config dir
fn resolve_config_path(
    explicit: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path);
    }
    if let Some(xdg) = xdg_config_home {
        return Some(xdg.join("pasifika").join("config.toml"));
    }
    if let Some(home) = home {
        return Some(home.join(".config").join("pasifika").join("config.toml"));
    }

    directories::ProjectDirs::from("org", "pasifika", "pasifika")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
