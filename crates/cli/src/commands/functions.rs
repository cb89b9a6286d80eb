//! Offline listing of what an ABI binds to.

use anyhow::{Context, Result};
use relay_rs_contracts::Interface;

use super::read_abi;
use crate::cli::{FunctionsArgs, OutputFormat};
use crate::output::{bindings_json, format_bindings_table};

pub fn run_functions(args: &FunctionsArgs, format: OutputFormat) -> Result<()> {
    let abi = read_abi(&args.abi)?;
    let interface = Interface::from_json(&abi).context("Invalid ABI")?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_bindings_table(&interface));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&bindings_json(&interface))?;
            println!("{}", json);
        }
    }

    Ok(())
}
