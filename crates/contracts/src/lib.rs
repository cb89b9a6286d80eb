//! Runtime contract bindings built from JSON ABIs.
//!
//! This crate binds every function and event of a contract interface at
//! runtime, without generated code. Read functions become a single async
//! call; write functions get gas estimation and a send that layers
//! transaction defaults and pads the gas estimate before dispatching.
//!
//! # Example
//!
//! ```no_run
//! use alloy::dyn_abi::DynSolValue;
//! use alloy::primitives::{Address, U256};
//! use relay_rs_contracts::{provider, AlloyTransport, BinderConfig, Contract, TxParams};
//!
//! #[tokio::main]
//! async fn main() -> relay_rs_contracts::Result<()> {
//!     let (provider, sender) = provider::connect_with_signer(
//!         "https://eth.llamarpc.com",
//!         "0x...", // private key
//!     )?;
//!
//!     let token: Address = "0x...".parse().unwrap();
//!     let config = BinderConfig::new().with_defaults(TxParams::new().with_from(sender));
//!     let abi = std::fs::read_to_string("Token.json").unwrap();
//!     let contract = Contract::from_json(AlloyTransport::new(token, provider), &abi, config)?;
//!
//!     let balance = contract
//!         .read("balanceOf")?
//!         .call(&[DynSolValue::Address(sender)])
//!         .await?;
//!
//!     let receipt = contract
//!         .write("transfer")?
//!         .send(
//!             vec![DynSolValue::Address(token), DynSolValue::Uint(U256::from(10), 256)],
//!             None,
//!         )
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod alloy_transport;
pub mod binder;
pub mod config;
pub mod error;
pub mod gas;
pub mod interface;
pub mod provider;
pub mod registry;
pub mod transport;
pub mod tx_params;

pub use alloy_transport::AlloyTransport;
pub use binder::{BoundCall, BoundFunction, CallKind, Contract, EventBinding, ReadCall, WriteCall};
pub use config::{BinderConfig, DuplicateNames};
pub use error::{ContractError, Result, TransportError};
pub use gas::{GasEstimator, DEFAULT_GAS_MARGIN};
pub use interface::{EventEntry, FunctionEntry, Interface, InterfaceEntry};
pub use provider::HttpProvider;
pub use registry::{Token, TokenRegistry};
pub use transport::{Completion, ContractTransport};
pub use tx_params::{TxParams, TxParamsSchema};
