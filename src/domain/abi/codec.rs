//! Call encoding and result decoding using alloy-dyn-abi

use alloy::primitives::Bytes;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use anyhow::{bail, Context, Result};

use crate::domain::abi::{ContractInterface, FunctionSignature, ParamSpec};
use crate::error::ClientError;

/// A decoded function call
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub function_name: String,
    pub signature: String,
    pub arguments: Vec<DynSolValue>,
}

fn parse_types(params: &[ParamSpec]) -> Result<Vec<DynSolType>> {
    params
        .iter()
        .map(|param| {
            param.kind.parse::<DynSolType>().with_context(|| {
                format!("Failed to parse type '{}' for param '{}'", param.kind, param.name)
            })
        })
        .collect()
}

fn decode_params(types: Vec<DynSolType>, data: &[u8]) -> Result<Vec<DynSolValue>> {
    if types.is_empty() {
        return Ok(Vec::new());
    }

    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(data)
        .map_err(|err| ClientError::Abi(err.to_string()))?;

    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

/// Encode selector plus arguments for `function`
pub fn encode_call(function: &FunctionSignature, args: &[DynSolValue]) -> Result<Bytes> {
    if args.len() != function.inputs.len() {
        bail!(ClientError::Abi(format!(
            "{} expects {} argument(s), got {}",
            function.signature,
            function.inputs.len(),
            args.len()
        )));
    }

    let types = parse_types(&function.inputs)?;
    for (idx, (ty, value)) in types.iter().zip(args).enumerate() {
        if !ty.matches(value) {
            bail!(ClientError::Abi(format!(
                "argument {} of {} is not a {}",
                idx, function.signature, ty
            )));
        }
    }

    let mut data = function.selector.to_vec();
    data.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
    Ok(Bytes::from(data))
}

/// Decode the return data of `function`
pub fn decode_output(function: &FunctionSignature, data: &[u8]) -> Result<Vec<DynSolValue>> {
    let types = parse_types(&function.outputs)?;
    decode_params(types, data)
        .with_context(|| format!("Failed to decode return data of {}", function.signature))
}

/// Decode calldata by its selector
pub fn decode_input(interface: &ContractInterface, data: &[u8]) -> Result<DecodedCall> {
    if data.len() < 4 {
        bail!(ClientError::Abi(
            "calldata too short (need at least 4 bytes for selector)".into()
        ));
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    let Some(function) = interface.lookup(selector) else {
        bail!(ClientError::Abi(format!(
            "unknown selector 0x{}",
            hex::encode(selector)
        )));
    };

    let types = parse_types(&function.inputs)?;
    let arguments = decode_params(types, &data[4..])
        .with_context(|| format!("Failed to decode calldata of {}", function.signature))?;

    Ok(DecodedCall {
        function_name: function.name.clone(),
        signature: function.signature.clone(),
        arguments,
    })
}

/// Format a decoded value for display
pub fn format_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(bytes, size) => format!("0x{}", hex::encode(&bytes[..*size])),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => format!("\"{}\"", s),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            let inner: Vec<String> = values.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        DynSolValue::Tuple(values) => {
            let inner: Vec<String> = values.iter().map(format_value).collect();
            format!("({})", inner.join(", "))
        }
        other => format!("{:?}", other),
    }
}
