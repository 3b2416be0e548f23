//! Workflows run against a live node
//!
//! Each workflow is a straight sequence of awaited RPC calls. Progress lines
//! go to the supplied writer; the first failing call aborts the run.

pub mod deploy;
pub mod network;
pub mod transfer;

use std::io::{self, Write};

pub use deploy::{deploy, DeployParams, DeploymentReport};
pub use network::{network, NetworkReport};
pub use transfer::{transfer, BalanceChange, TransferParams, TransferReport};

use crate::infrastructure::ethereum::NetworkInfo;

/// Titled block of label/value lines
pub struct WorkflowResult {
    pub title: String,
    pub items: Vec<(String, String)>,
}

impl WorkflowResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push((label.into(), value.into()));
        self
    }

    pub fn render(&self) -> String {
        let width = self.items.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let mut text = format!("{}:", self.title);
        for (label, value) in &self.items {
            text.push_str(&format!("\n  {:<width$}  {}", format!("{label}:"), value, width = width + 1));
        }
        text
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.render())
    }
}

/// Warn when the node is not the chain we expect; returns whether it matched
pub fn check_chain_id(network: &NetworkInfo, expected: Option<u64>) -> bool {
    match expected {
        Some(expected) if expected != network.chain_id => {
            tracing::warn!(
                expected,
                actual = network.chain_id,
                "connected node reports an unexpected chain id"
            );
            false
        }
        _ => true,
    }
}
