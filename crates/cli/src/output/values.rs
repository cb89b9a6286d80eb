//! Rendering decoded ABI values.

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::hex;
use serde_json::Value;

/// Convert a decoded value to JSON.
///
/// Integers become decimal strings so that 256-bit values survive, and
/// byte values become 0x-prefixed hex.
pub fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        DynSolValue::FixedBytes(word, size) => Value::String(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Address(address) => Value::String(address.to_checksum(None)),
        DynSolValue::Function(function) => Value::String(hex::encode_prefixed(function.as_slice())),
        DynSolValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(value_to_json).collect())
        }
        #[allow(unreachable_patterns)]
        other => Value::String(format!("{:?}", other)),
    }
}

/// Render a decoded value for the terminal. Strings are shown without quotes.
pub fn format_value(value: &DynSolValue) -> String {
    match value_to_json(value) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
