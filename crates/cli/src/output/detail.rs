//! Detailed output for call results and transaction receipts.

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::Param;
use alloy::rpc::types::TransactionReceipt;
use colored::Colorize;
use serde_json::{json, Value};

use super::values::{format_value, value_to_json};

/// Format gas with thousands separators.
pub fn format_gas(gas: u64) -> String {
    let s = gas.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn output_label(index: usize, param: Option<&Param>) -> String {
    match param {
        Some(p) if !p.name.is_empty() => format!("[{}] {} ({})", index, p.name, p.ty),
        Some(p) => format!("[{}] ({})", index, p.ty),
        None => format!("[{}]", index),
    }
}

/// One line per decoded output, labelled with its ABI name and type.
pub fn format_outputs(params: &[Param], outputs: &[DynSolValue]) -> String {
    if outputs.is_empty() {
        return "No outputs.".to_string();
    }

    outputs
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{}: {}", output_label(i, params.get(i)), format_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decoded outputs as a JSON array of `{name, type, value}` objects.
pub fn outputs_json(params: &[Param], outputs: &[DynSolValue]) -> Value {
    Value::Array(
        outputs
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let param = params.get(i);
                json!({
                    "name": param.map(|p| p.name.as_str()).unwrap_or_default(),
                    "type": param.map(|p| p.ty.as_str()).unwrap_or_default(),
                    "value": value_to_json(value),
                })
            })
            .collect(),
    )
}

pub fn format_receipt(receipt: &TransactionReceipt) -> String {
    let status = if receipt.status() {
        "Success".green().bold()
    } else {
        "Failed".red().bold()
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Transaction confirmed".cyan().bold()));
    output.push_str(&format!("  Tx Hash:   {:#x}\n", receipt.transaction_hash));
    output.push_str(&format!(
        "  Block:     {}\n",
        receipt.block_number.unwrap_or_default()
    ));
    output.push_str(&format!("  From:      {}\n", receipt.from));
    output.push_str(&format!("  Gas Used:  {}\n", format_gas(receipt.gas_used)));
    output.push_str(&format!("  Status:    {}", status));
    output
}
