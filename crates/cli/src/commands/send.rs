//! Gas estimation and transaction sending for state-mutating functions.

use std::str::FromStr;

use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use relay_rs_contracts::{
    provider, tx_params::split_trailing_override, AlloyTransport, BinderConfig, Contract,
    HttpProvider, TxParams,
};
use serde_json::{json, Value};
use tracing::debug;

use super::{parse_address, parse_call_args, read_abi};
use crate::cli::{OutputFormat, TxArgs, WriteArgs};
use crate::output::{format_gas, format_receipt};

/// Parse `--defaults` through the transaction parameter validator.
fn parse_defaults(raw: Option<&str>) -> Result<TxParams> {
    let Some(raw) = raw else {
        return Ok(TxParams::default());
    };
    let value: Value = serde_json::from_str(raw).context("--defaults is not valid JSON")?;
    TxParams::from_json(&value)
        .with_context(|| format!("--defaults is not a transaction parameter object: {}", raw))
}

/// Transaction parameters given as flags.
fn flag_params(tx: &TxArgs) -> Result<TxParams> {
    let mut params = TxParams::new();
    if let Some(from) = &tx.from {
        params = params.with_from(parse_address(from)?);
    }
    if let Some(gas) = tx.gas {
        params = params.with_gas(gas);
    }
    if let Some(gas_price) = tx.gas_price {
        params = params.with_gas_price(gas_price);
    }
    if let Some(value) = &tx.value {
        let value = U256::from_str(value).with_context(|| format!("Invalid value: {}", value))?;
        params = params.with_value(value);
    }
    if let Some(nonce) = tx.nonce {
        params = params.with_nonce(nonce);
    }
    Ok(params)
}

/// Connect and bind the contract for a write command.
///
/// With a private key the provider signs and the signer becomes the default
/// sender, below any `from` in `--defaults`.
fn bind(args: &WriteArgs, require_signer: bool) -> Result<Contract<AlloyTransport<HttpProvider>>> {
    let address = parse_address(&args.address)?;
    let abi = read_abi(&args.abi)?;
    let mut defaults = parse_defaults(args.tx.defaults.as_deref())?;

    let provider = match &args.private_key {
        Some(private_key) => {
            let (provider, signer) = provider::connect_with_signer(&args.rpc_url, private_key)?;
            defaults = defaults.merge(&TxParams::new().with_from(signer));
            provider
        }
        None if require_signer => {
            bail!("A private key is required to send (use --private-key or PRIVATE_KEY)")
        }
        None => provider::connect(&args.rpc_url)?,
    };

    let config = BinderConfig::new()
        .with_defaults(defaults)
        .with_gas_margin(args.tx.gas_margin)
        .with_duplicate_names(args.duplicate_names.into());

    Contract::from_json(AlloyTransport::new(address, provider), &abi, config)
        .context("Failed to bind ABI")
}

/// Split the trailing JSON override off the positional arguments and layer
/// the flag parameters over it.
fn split_override(args: &WriteArgs) -> Result<(Vec<Value>, TxParams)> {
    let mut values = parse_call_args(&args.args);
    let trailing = split_trailing_override(&mut values).unwrap_or_default();
    let tx_override = flag_params(&args.tx)?.merge(&trailing);
    Ok((values, tx_override))
}

fn sender(params: &TxParams) -> String {
    params
        .from
        .map(|from| from.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub async fn run_estimate(args: &WriteArgs, format: OutputFormat) -> Result<()> {
    let contract = bind(args, false)?;
    let write = contract.write(&args.function)?;
    let (values, tx_override) = split_override(args)?;
    let call_args = write.entry().coerce_args(&values)?;

    let estimate = write
        .estimate_gas(&call_args, Some(tx_override))
        .await
        .with_context(|| format!("Gas estimation for {} failed", write.entry().signature()))?;
    let margin = contract.config().gas_margin;
    let gas_limit = estimate.saturating_add(margin);

    match format {
        OutputFormat::Table => {
            println!("Function:   {}", write.entry().signature());
            println!("From:       {}", sender(&write.merged_params(Some(tx_override))));
            println!("Estimate:   {}", format_gas(estimate));
            println!("Margin:     {}", format_gas(margin));
            println!("Gas Limit:  {}", format_gas(gas_limit));
        }
        OutputFormat::Json => {
            let json = json!({
                "function": write.entry().signature(),
                "estimate": estimate,
                "margin": margin,
                "gasLimit": gas_limit,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

pub async fn run_send(args: &WriteArgs, format: OutputFormat) -> Result<()> {
    let contract = bind(args, true)?;
    let write = contract.write(&args.function)?;
    let (values, tx_override) = split_override(args)?;
    let call_args = write.entry().coerce_args(&values)?;

    debug!(function = %write.entry().signature(), ?tx_override, "sending from CLI");

    if let OutputFormat::Table = format {
        println!(
            "Sending {} from {}...",
            write.entry().signature(),
            sender(&write.merged_params(Some(tx_override)))
        );
        println!("Waiting for confirmation...\n");
    }

    let receipt = write
        .send(call_args, Some(tx_override))
        .await
        .with_context(|| format!("Transaction to {} failed", write.entry().signature()))?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_receipt(&receipt));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
    }

    Ok(())
}
