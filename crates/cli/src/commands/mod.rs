//! Command implementations.

pub mod call;
pub mod functions;
pub mod send;
pub mod tokens;

pub use call::run_call;
pub use functions::run_functions;
pub use send::{run_estimate, run_send};
pub use tokens::run_tokens;

use std::path::Path;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde_json::Value;

/// Read an ABI file into a string.
fn read_abi(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ABI file: {}", path.display()))
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .parse()
        .with_context(|| format!("Invalid address: {}", address))
}

/// Turn raw command-line arguments into untyped call arguments.
///
/// JSON objects are kept structured so a trailing transaction override can
/// be recognized; everything else is passed as text and parsed against the
/// ABI input type.
fn parse_call_args(raw: &[String]) -> Vec<Value> {
    raw.iter()
        .map(|arg| match serde_json::from_str::<Value>(arg) {
            Ok(object @ Value::Object(_)) => object,
            _ => Value::String(arg.clone()),
        })
        .collect()
}
