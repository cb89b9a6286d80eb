//! Table formatting for bindings and tokens.

use relay_rs_contracts::{CallKind, FunctionEntry, Interface, Token};
use serde_json::{json, Value};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct BindingRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Signature")]
    signature: String,
    #[tabled(rename = "Outputs")]
    outputs: String,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Decimals")]
    decimals: u8,
}

fn call_kind(function: &FunctionEntry) -> CallKind {
    if function.is_read_only() {
        CallKind::Read
    } else {
        CallKind::Write
    }
}

fn output_types(function: &FunctionEntry) -> String {
    if function.outputs.is_empty() {
        return "-".to_string();
    }
    function
        .outputs
        .iter()
        .map(|p| p.ty.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn rounded(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));
    table.to_string()
}

pub fn format_bindings_table(interface: &Interface) -> String {
    if interface.is_empty() {
        return "No functions or events found.".to_string();
    }

    let functions = interface.functions.iter().map(|f| BindingRow {
        name: f.name.clone(),
        kind: call_kind(f).to_string(),
        signature: f.signature(),
        outputs: output_types(f),
    });
    let events = interface.events.iter().map(|e| BindingRow {
        name: e.name.clone(),
        kind: "event".to_string(),
        signature: e.to_alloy().signature(),
        outputs: "-".to_string(),
    });

    rounded(Table::new(functions.chain(events)))
}

/// Bindings as JSON, functions before events, each in ABI order.
pub fn bindings_json(interface: &Interface) -> Value {
    let functions = interface.functions.iter().map(|f| {
        json!({
            "name": f.name,
            "kind": call_kind(f).to_string(),
            "signature": f.signature(),
        })
    });
    let events = interface.events.iter().map(|e| {
        json!({
            "name": e.name,
            "kind": "event",
            "signature": e.to_alloy().signature(),
        })
    });
    Value::Array(functions.chain(events).collect())
}

pub fn format_tokens_table(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "No tokens found.".to_string();
    }

    let rows: Vec<TokenRow> = tokens
        .iter()
        .map(|t| TokenRow {
            symbol: t.symbol.clone(),
            name: t.name.clone(),
            address: t.address.to_string(),
            decimals: t.decimals,
        })
        .collect();

    rounded(Table::new(rows))
}
