//! Toolkit helpers shared by the workflows

pub mod convert;

pub use convert::{
    format_ether, format_gwei, format_wei, parse_amount, parse_to_wei, WEI_PER_ETHER,
};
