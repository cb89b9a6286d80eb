//! Token registry listing.

use anyhow::{Context, Result};
use relay_rs_contracts::{provider, AlloyTransport, Token, TokenRegistry};

use super::parse_address;
use crate::cli::{OutputFormat, TokensArgs};
use crate::output::format_tokens_table;

pub async fn run_tokens(args: &TokensArgs, format: OutputFormat) -> Result<()> {
    let registry_address = parse_address(&args.registry)?;
    let provider = provider::connect(&args.rpc_url)?;
    let registry = TokenRegistry::new(AlloyTransport::new(registry_address, provider));

    let tokens: Vec<Token> = match &args.symbol {
        Some(symbol) => registry
            .get_token_by_symbol_if_exists(symbol)
            .await
            .with_context(|| format!("Failed to look up token {}", symbol))?
            .into_iter()
            .collect(),
        None => registry
            .get_tokens()
            .await
            .context("Failed to fetch registry tokens")?,
    };

    match format {
        OutputFormat::Table => {
            println!("{}", format_tokens_table(&tokens));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tokens)?;
            println!("{}", json);
        }
    }

    Ok(())
}
