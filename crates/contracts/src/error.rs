//! Error types for the contracts crate.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::binder::CallKind;

/// Errors that can occur when binding or invoking a contract.
#[derive(Debug, Error)]
pub enum ContractError {
    /// RPC connection failed.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The interface description could not be parsed.
    #[error("Invalid interface description: {0}")]
    InvalidInterface(String),

    /// Two functions (or two events) share a name and the binder rejects duplicates.
    #[error("Duplicate binding for `{0}`")]
    DuplicateFunction(String),

    /// No function with this name is bound on the contract.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// No event with this name is bound on the contract.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// The function is bound with a different shape than requested.
    #[error("Function `{name}` is bound as a {actual} call")]
    ShapeMismatch { name: String, actual: CallKind },

    /// A call argument could not be converted to the parameter type.
    #[error("Invalid argument for `{function}`: {reason}")]
    InvalidArgument { function: String, reason: String },

    /// The transport returned values the caller could not interpret.
    #[error("Unexpected output from `{function}`: {reason}")]
    UnexpectedOutput { function: String, reason: String },

    /// The underlying call or send primitive failed.
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// Gas estimation failed; the transaction was not sent.
    #[error("Gas estimation failed: {0}")]
    Estimation(#[source] TransportError),
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// An error reported by a [`ContractTransport`](crate::transport::ContractTransport).
///
/// Wraps whatever the transport failed with so callers can inspect the
/// original error through [`StdError::source`].
pub struct TransportError(Box<dyn StdError + Send + Sync + 'static>);

impl TransportError {
    /// Wrap an underlying transport error.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self(err.into())
    }

    /// Create a transport error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransportError").field(&self.0).finish()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}
