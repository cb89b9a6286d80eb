//! Runtime bindings for the functions and events of a contract interface.
//!
//! A [`Contract`] is built once from an [`Interface`]. Every function is
//! bound by name to one of two shapes, fixed for the lifetime of the
//! contract:
//!
//! - read functions expose a single [`ReadCall::call`];
//! - write functions expose [`WriteCall::estimate_gas`] and
//!   [`WriteCall::send`], which layers transaction defaults and fills in the
//!   gas limit before dispatching.
//!
//! # Example
//!
//! ```rust,ignore
//! let contract = Contract::from_json(transport, TOKEN_ABI, BinderConfig::default())?;
//!
//! let balance = contract.read("balanceOf")?.call(&[owner.into()]).await?;
//! let receipt = contract
//!     .write("transfer")?
//!     .send(vec![to.into(), amount.into()], Some(TxParams::new().with_gas(60_000)))
//!     .await?;
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{BinderConfig, DuplicateNames};
use crate::error::{ContractError, Result};
use crate::gas::GasEstimator;
use crate::interface::{EventEntry, FunctionEntry, Interface};
use crate::transport::{settle, ContractTransport};
use crate::tx_params::{split_trailing_override, TxParams};

/// Which shape a function is bound with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Read,
    Write,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::Read => f.write_str("read"),
            CallKind::Write => f.write_str("write"),
        }
    }
}

/// A function binding, tagged with its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundCall {
    Read(FunctionEntry),
    Write(FunctionEntry),
}

impl BoundCall {
    fn bind(function: FunctionEntry) -> Self {
        if function.is_read_only() {
            BoundCall::Read(function)
        } else {
            BoundCall::Write(function)
        }
    }

    pub fn kind(&self) -> CallKind {
        match self {
            BoundCall::Read(_) => CallKind::Read,
            BoundCall::Write(_) => CallKind::Write,
        }
    }

    pub fn entry(&self) -> &FunctionEntry {
        match self {
            BoundCall::Read(entry) | BoundCall::Write(entry) => entry,
        }
    }
}

/// A contract whose functions and events are bound from its interface.
pub struct Contract<T> {
    transport: T,
    config: BinderConfig,
    estimator: GasEstimator,
    calls: HashMap<String, BoundCall>,
    call_order: Vec<String>,
    events: HashMap<String, EventEntry>,
    event_order: Vec<String>,
}

impl<T> fmt::Debug for Contract<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contract")
            .field("config", &self.config)
            .field("functions", &self.call_order)
            .field("events", &self.event_order)
            .finish_non_exhaustive()
    }
}

impl<T: ContractTransport> Contract<T> {
    /// Binds every function and event of `interface`.
    pub fn new(transport: T, interface: Interface, config: BinderConfig) -> Result<Self> {
        let policy = config.duplicate_names;

        let mut calls = HashMap::with_capacity(interface.functions.len());
        let mut call_order = Vec::with_capacity(interface.functions.len());
        for function in interface.functions {
            let name = function.name.clone();
            insert_binding(&mut calls, &mut call_order, name, BoundCall::bind(function), policy)?;
        }

        let mut events = HashMap::with_capacity(interface.events.len());
        let mut event_order = Vec::with_capacity(interface.events.len());
        for event in interface.events {
            let name = event.name.clone();
            insert_binding(&mut events, &mut event_order, name, event, policy)?;
        }

        debug!(
            address = %transport.address(),
            functions = calls.len(),
            events = events.len(),
            "bound contract"
        );

        Ok(Self {
            transport,
            estimator: GasEstimator::new(config.gas_margin),
            config,
            calls,
            call_order,
            events,
            event_order,
        })
    }

    /// Parses a JSON ABI (or build artifact) and binds it.
    pub fn from_json(transport: T, abi: &str, config: BinderConfig) -> Result<Self> {
        Self::new(transport, Interface::from_json(abi)?, config)
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        self.transport.address()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Names of the bound functions, in interface order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.call_order.iter().map(String::as_str)
    }

    /// Names of the bound events, in interface order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.event_order.iter().map(String::as_str)
    }

    /// The binding for a function, if one exists.
    pub fn bound_call(&self, name: &str) -> Option<&BoundCall> {
        self.calls.get(name)
    }

    /// The callable handle for a function, in whichever shape it is bound.
    pub fn function(&self, name: &str) -> Result<BoundFunction<'_, T>> {
        match self.calls.get(name) {
            Some(BoundCall::Read(function)) => Ok(BoundFunction::Read(ReadCall {
                contract: self,
                function,
            })),
            Some(BoundCall::Write(function)) => Ok(BoundFunction::Write(WriteCall {
                contract: self,
                function,
            })),
            None => Err(ContractError::UnknownFunction(name.to_string())),
        }
    }

    /// The handle for a read function.
    pub fn read(&self, name: &str) -> Result<ReadCall<'_, T>> {
        match self.function(name)? {
            BoundFunction::Read(call) => Ok(call),
            BoundFunction::Write(_) => Err(ContractError::ShapeMismatch {
                name: name.to_string(),
                actual: CallKind::Write,
            }),
        }
    }

    /// The handle for a write function.
    pub fn write(&self, name: &str) -> Result<WriteCall<'_, T>> {
        match self.function(name)? {
            BoundFunction::Write(call) => Ok(call),
            BoundFunction::Read(_) => Err(ContractError::ShapeMismatch {
                name: name.to_string(),
                actual: CallKind::Read,
            }),
        }
    }

    /// The subscription handle for an event.
    pub fn event(&self, name: &str) -> Result<EventBinding<'_, T>> {
        let event = self
            .events
            .get(name)
            .ok_or_else(|| ContractError::UnknownEvent(name.to_string()))?;
        Ok(EventBinding {
            contract: self,
            event,
        })
    }
}

/// Binds `name`, applying the duplicate policy if it is already bound.
fn insert_binding<V>(
    bindings: &mut HashMap<String, V>,
    order: &mut Vec<String>,
    name: String,
    value: V,
    policy: DuplicateNames,
) -> Result<()> {
    match bindings.entry(name) {
        Entry::Vacant(slot) => {
            order.push(slot.key().clone());
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match policy {
            DuplicateNames::Reject => {
                return Err(ContractError::DuplicateFunction(slot.key().clone()));
            }
            DuplicateNames::LastWins => {
                warn!(name = %slot.key(), "duplicate binding, keeping the last declaration");
                slot.insert(value);
            }
        },
    }
    Ok(())
}

/// A function handle in whichever shape the function is bound.
pub enum BoundFunction<'a, T> {
    Read(ReadCall<'a, T>),
    Write(WriteCall<'a, T>),
}

impl<T> BoundFunction<'_, T> {
    pub fn kind(&self) -> CallKind {
        match self {
            BoundFunction::Read(_) => CallKind::Read,
            BoundFunction::Write(_) => CallKind::Write,
        }
    }

    pub fn entry(&self) -> &FunctionEntry {
        match self {
            BoundFunction::Read(call) => call.function,
            BoundFunction::Write(call) => call.function,
        }
    }
}

/// Handle for a read-only function.
pub struct ReadCall<'a, T> {
    contract: &'a Contract<T>,
    function: &'a FunctionEntry,
}

impl<T: ContractTransport> ReadCall<'_, T> {
    pub fn entry(&self) -> &FunctionEntry {
        self.function
    }

    /// Invokes the function, forwarding `args` unchanged to the transport.
    pub async fn call(&self, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        debug!(function = %self.function.name, args = args.len(), "call");
        self.contract
            .transport
            .call(self.function, args)
            .await
            .map_err(ContractError::Transport)
    }

    /// Coerces untyped arguments to the input types, then calls.
    pub async fn call_json(&self, args: &[Value]) -> Result<Vec<DynSolValue>> {
        let args = self.function.coerce_args(args)?;
        self.call(&args).await
    }
}

/// Handle for a state-mutating function.
pub struct WriteCall<'a, T> {
    contract: &'a Contract<T>,
    function: &'a FunctionEntry,
}

impl<T: ContractTransport> WriteCall<'_, T> {
    pub fn entry(&self) -> &FunctionEntry {
        self.function
    }

    /// The parameters a send would start from before gas resolution:
    /// `tx_override` layered over the configured defaults.
    pub fn merged_params(&self, tx_override: Option<TxParams>) -> TxParams {
        tx_override
            .unwrap_or_default()
            .merge(&self.contract.config.defaults)
    }

    /// Estimates the gas of the call without any margin.
    pub async fn estimate_gas(
        &self,
        args: &[DynSolValue],
        tx_override: Option<TxParams>,
    ) -> Result<u64> {
        let params = self.merged_params(tx_override).without_gas();
        self.contract
            .transport
            .estimate_gas(self.function, args, &params)
            .await
            .map_err(ContractError::Estimation)
    }

    /// Sends the transaction.
    ///
    /// Parameters are `tx_override` layered over the configured defaults.
    /// Without a gas limit from either, the limit is estimated and padded
    /// with the configured margin; if estimation fails nothing is sent.
    pub async fn send(
        &self,
        args: Vec<DynSolValue>,
        tx_override: Option<TxParams>,
    ) -> Result<T::Receipt> {
        let params = self.merged_params(tx_override);
        let params = self
            .contract
            .estimator
            .resolve(&self.contract.transport, self.function, &args, params)
            .await?;

        debug!(
            function = %self.function.name,
            gas = params.gas,
            from = ?params.from,
            "dispatching transaction"
        );

        let transport = &self.contract.transport;
        let function = self.function;
        settle(|done| transport.send(function, args, params, done))
            .await
            .map_err(ContractError::Transport)
    }

    /// Sends with untyped arguments.
    ///
    /// A trailing argument shaped like transaction parameters is taken as
    /// the override; any other trailing value stays a positional argument.
    pub async fn send_json(&self, mut args: Vec<Value>) -> Result<T::Receipt> {
        let tx_override = split_trailing_override(&mut args);
        let args = self.function.coerce_args(&args)?;
        self.send(args, tx_override).await
    }

    /// Estimates with untyped arguments, honoring a trailing override like
    /// [`WriteCall::send_json`].
    pub async fn estimate_gas_json(&self, mut args: Vec<Value>) -> Result<u64> {
        let tx_override = split_trailing_override(&mut args);
        let args = self.function.coerce_args(&args)?;
        self.estimate_gas(&args, tx_override).await
    }
}

/// Handle for an event; subscribing is a straight pass-through to the transport.
pub struct EventBinding<'a, T> {
    contract: &'a Contract<T>,
    event: &'a EventEntry,
}

impl<T: ContractTransport> EventBinding<'_, T> {
    pub fn entry(&self) -> &EventEntry {
        self.event
    }

    pub async fn subscribe(&self) -> Result<T::Subscription> {
        self.contract
            .transport
            .subscribe(self.event)
            .await
            .map_err(ContractError::Transport)
    }
}
