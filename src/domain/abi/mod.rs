//! ABI domain models
//!
//! Function signatures are built from a solc-style JSON ABI
//! (alloy-json-abi); encoding and decoding go through alloy-dyn-abi.

mod codec;
mod registry;

pub use codec::{decode_input, decode_output, encode_call, format_value, DecodedCall};
pub use registry::{ContractInterface, FunctionSignature, ParamSpec};
