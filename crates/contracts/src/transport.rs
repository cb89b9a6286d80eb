//! The transport seam bound contracts dispatch through.
//!
//! A transport owns ABI encoding and the wire protocol. Bound calls only
//! decide *what* to send and with which transaction parameters.

#![allow(async_fn_in_trait)]

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;
use tokio::sync::oneshot;

use crate::error::TransportError;
use crate::interface::{EventEntry, FunctionEntry};
use crate::tx_params::TxParams;

/// Completion handed to [`ContractTransport::send`].
///
/// Must be invoked exactly once with the outcome of the submission.
pub type Completion<R> = Box<dyn FnOnce(Result<R, TransportError>) + Send + 'static>;

/// Capabilities a contract transport offers per function or event.
pub trait ContractTransport {
    /// What a successful send resolves to, usually a transaction receipt.
    type Receipt: Send + 'static;

    /// What subscribing to an event hands back.
    type Subscription;

    /// Address of the contract this transport talks to.
    fn address(&self) -> Address;

    /// Executes a read-only function and returns its decoded outputs.
    async fn call(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, TransportError>;

    /// Estimates the gas a write would consume with the given parameters.
    async fn estimate_gas(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
        params: &TxParams,
    ) -> Result<u64, TransportError>;

    /// Submits a write and reports the outcome through `done`.
    fn send(
        &self,
        function: &FunctionEntry,
        args: Vec<DynSolValue>,
        params: TxParams,
        done: Completion<Self::Receipt>,
    );

    /// Subscribes to an event, exactly as the transport provides it.
    async fn subscribe(&self, event: &EventEntry) -> Result<Self::Subscription, TransportError>;
}

/// Runs a completion-style primitive and awaits its outcome.
///
/// A completion that is dropped without being invoked resolves to a
/// transport error rather than hanging the caller.
pub async fn settle<R, F>(dispatch: F) -> Result<R, TransportError>
where
    R: Send + 'static,
    F: FnOnce(Completion<R>),
{
    let (tx, rx) = oneshot::channel();
    dispatch(Box::new(move |outcome| {
        // The receiver only goes away if the caller stopped waiting.
        let _ = tx.send(outcome);
    }));

    rx.await
        .map_err(|_| TransportError::msg("transport dropped the completion without reporting"))?
}
