//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use relay_rs_contracts::{DuplicateNames, DEFAULT_GAS_MARGIN};

/// Relay CLI - call contracts bound at runtime from JSON ABIs
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "CLI tool for calling contracts bound at runtime from JSON ABIs", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the functions and events an ABI binds to
    Functions(FunctionsArgs),
    /// Call a read-only function
    Call(CallArgs),
    /// Estimate gas for a state-mutating function
    Estimate(WriteArgs),
    /// Send a transaction to a state-mutating function
    Send(WriteArgs),
    /// List the tokens in a token registry
    Tokens(TokensArgs),
}

#[derive(Parser, Debug)]
pub struct FunctionsArgs {
    /// Path to a JSON ABI (bare array or artifact with an `abi` field)
    pub abi: PathBuf,
}

#[derive(Parser, Debug)]
pub struct CallArgs {
    /// Path to a JSON ABI
    pub abi: PathBuf,

    /// Contract address
    pub address: String,

    /// Function name
    pub function: String,

    /// Function arguments, JSON or plain text
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// RPC URL (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// What to do when the ABI declares a name twice, e.g. overloads
    #[arg(long, env = "RELAY_DUPLICATE_NAMES", default_value = "reject")]
    pub duplicate_names: DuplicateNamesArg,
}

#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Path to a JSON ABI
    pub abi: PathBuf,

    /// Contract address
    pub address: String,

    /// Function name
    pub function: String,

    /// Function arguments, JSON or plain text. A trailing JSON object with
    /// transaction fields (from, gas, gasPrice, value, nonce) is taken as
    /// the transaction override.
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// RPC URL (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Private key for signing transactions (can also use PRIVATE_KEY env var)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// What to do when the ABI declares a name twice, e.g. overloads
    #[arg(long, env = "RELAY_DUPLICATE_NAMES", default_value = "reject")]
    pub duplicate_names: DuplicateNamesArg,

    #[command(flatten)]
    pub tx: TxArgs,
}

/// Transaction parameters given as flags. Flags take precedence over a
/// trailing JSON override, which takes precedence over `--defaults`.
#[derive(Args, Debug, Default)]
pub struct TxArgs {
    /// Sender address
    #[arg(long)]
    pub from: Option<String>,

    /// Gas limit; skips estimation when set
    #[arg(long)]
    pub gas: Option<u64>,

    /// Gas price in wei
    #[arg(long)]
    pub gas_price: Option<u128>,

    /// Value in wei (decimal or 0x-prefixed)
    #[arg(long)]
    pub value: Option<String>,

    /// Nonce
    #[arg(long)]
    pub nonce: Option<u64>,

    /// Gas added on top of the estimate
    #[arg(long, env = "RELAY_GAS_MARGIN", default_value_t = DEFAULT_GAS_MARGIN)]
    pub gas_margin: u64,

    /// Default transaction parameters as a JSON object
    #[arg(long, env = "RELAY_TX_DEFAULTS")]
    pub defaults: Option<String>,
}

#[derive(Parser, Debug)]
pub struct TokensArgs {
    /// Token registry contract address
    pub registry: String,

    /// Only show the token with this symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// RPC URL (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Duplicate name policy as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateNamesArg {
    /// Refuse to bind the ABI
    #[default]
    Reject,
    /// Keep the entry declared last
    LastWins,
}

impl From<DuplicateNamesArg> for DuplicateNames {
    fn from(arg: DuplicateNamesArg) -> Self {
        match arg {
            DuplicateNamesArg::Reject => DuplicateNames::Reject,
            DuplicateNamesArg::LastWins => DuplicateNames::LastWins,
        }
    }
}
