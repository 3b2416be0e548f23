//! Unit conversion: wei/gwei/ether on U256

use alloy::primitives::U256;

use crate::error::ClientError;

/// 10^18
pub const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

const GWEI_DECIMALS: usize = 9;
const ETHER_DECIMALS: usize = 18;

/// Parse a decimal amount with an optional unit ("10", "10.5 ether", "3 gwei")
///
/// A bare number is read as ether.
pub fn parse_amount(input: &str) -> Result<U256, ClientError> {
    let (value, unit) = parse_value_and_unit(input);
    parse_to_wei(&value, &unit)
}

fn parse_value_and_unit(input: &str) -> (String, String) {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.len() {
        1 => (parts[0].to_string(), "ether".to_string()),
        2 => (parts[0].to_string(), parts[1].to_lowercase()),
        _ => (input.trim().to_string(), "ether".to_string()),
    }
}

fn unit_decimals(unit: &str) -> Result<usize, ClientError> {
    match unit {
        "wei" => Ok(0),
        "kwei" | "babbage" => Ok(3),
        "mwei" | "lovelace" => Ok(6),
        "gwei" | "shannon" => Ok(GWEI_DECIMALS),
        "szabo" | "microether" => Ok(12),
        "finney" | "milliether" => Ok(15),
        "ether" | "eth" => Ok(ETHER_DECIMALS),
        _ => Err(ClientError::InvalidConfig(format!("Unknown unit: {}", unit))),
    }
}

/// Convert a decimal string in `unit` to wei, exactly
pub fn parse_to_wei(value_str: &str, unit: &str) -> Result<U256, ClientError> {
    let invalid = |what: &str| ClientError::InvalidConfig(format!("{}: {}", what, value_str));
    let decimals = unit_decimals(unit)?;

    let (integer_part, decimal_part) = match value_str.find('.') {
        Some(pos) => (&value_str[..pos], &value_str[pos + 1..]),
        None => (value_str, ""),
    };
    if integer_part.is_empty() && decimal_part.is_empty() {
        return Err(invalid("Empty amount"));
    }
    if decimal_part.len() > decimals {
        return Err(invalid("Too many decimal places for unit"));
    }

    let digits = format!(
        "{}{}{}",
        integer_part,
        decimal_part,
        "0".repeat(decimals - decimal_part.len())
    );
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("Invalid number"));
    }

    U256::from_str_radix(&digits, 10).map_err(|_| invalid("Amount overflows 256 bits"))
}

/// Add thousand separators
pub fn format_wei(wei: U256) -> String {
    group_thousands(&wei.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn format_units(wei: U256, decimals: usize) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = wei / divisor;
    let remainder = wei % divisor;
    if remainder.is_zero() {
        format_wei(whole)
    } else {
        let decimal = format!("{:0>width$}", remainder.to_string(), width = decimals)
            .trim_end_matches('0')
            .to_string();
        format!("{}.{}", format_wei(whole), decimal)
    }
}

pub fn format_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS)
}

pub fn format_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS)
}
