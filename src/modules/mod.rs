//! Command modules
//!
//! - toolkit: unit conversion shared by the workflows
//! - workflow: deploy, transfer and network flows against a live node

pub mod toolkit;
pub mod workflow;
