//! Read-only call command.

use anyhow::{Context, Result};
use relay_rs_contracts::{provider, AlloyTransport, BinderConfig, Contract};

use super::{parse_address, parse_call_args, read_abi};
use crate::cli::{CallArgs, OutputFormat};
use crate::output::{format_outputs, outputs_json};

pub async fn run_call(args: &CallArgs, format: OutputFormat) -> Result<()> {
    let address = parse_address(&args.address)?;
    let abi = read_abi(&args.abi)?;
    let provider = provider::connect(&args.rpc_url)?;
    let contract = Contract::from_json(
        AlloyTransport::new(address, provider),
        &abi,
        BinderConfig::new().with_duplicate_names(args.duplicate_names.into()),
    )
    .context("Failed to bind ABI")?;

    let read = contract.read(&args.function)?;
    let outputs = read
        .call_json(&parse_call_args(&args.args))
        .await
        .with_context(|| format!("Call to {} failed", read.entry().signature()))?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_outputs(&read.entry().outputs, &outputs));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outputs_json(&read.entry().outputs, &outputs))?;
            println!("{}", json);
        }
    }

    Ok(())
}
