//! Output formatting for CLI results.

pub mod detail;
pub mod table;
pub mod values;

pub use detail::{format_gas, format_outputs, format_receipt, outputs_json};
pub use table::{bindings_json, format_bindings_table, format_tokens_table};
