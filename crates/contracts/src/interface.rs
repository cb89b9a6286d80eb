//! Contract interface descriptions and their classification.
//!
//! An interface is the JSON ABI of a contract: an ordered list of entries
//! tagged by `"type"`. Only functions and events are actionable for binding;
//! every other entry kind is dropped when the interface is classified.

use alloy::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy::json_abi::{Event, EventParam, Function, Param, StateMutability};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::error::{ContractError, Result};

/// One element of a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InterfaceEntry {
    Function(FunctionEntry),
    Event(EventEntry),
    /// Constructors, fallbacks, errors and anything else.
    #[serde(other)]
    Other,
}

/// A function element of a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Param>,
    #[serde(default)]
    pub outputs: Vec<Param>,
    /// Legacy mutability flag emitted by older compilers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,
}

impl FunctionEntry {
    /// Whether the function can be queried without a transaction.
    ///
    /// The legacy `constant` flag decides when present, otherwise
    /// `stateMutability` of `pure` or `view` marks a read.
    pub fn is_read_only(&self) -> bool {
        self.constant.unwrap_or_else(|| {
            matches!(
                self.state_mutability,
                Some(StateMutability::Pure | StateMutability::View)
            )
        })
    }

    /// Converts the entry into alloy's ABI function for encoding and decoding.
    pub fn to_alloy(&self) -> Function {
        let state_mutability = if self.is_read_only() {
            self.state_mutability
                .filter(|m| matches!(m, StateMutability::Pure))
                .unwrap_or(StateMutability::View)
        } else if self.payable == Some(true)
            || self.state_mutability == Some(StateMutability::Payable)
        {
            StateMutability::Payable
        } else {
            StateMutability::NonPayable
        };

        Function {
            name: self.name.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            state_mutability,
        }
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        self.to_alloy().signature()
    }

    /// Coerces untyped JSON arguments into ABI values using the input types.
    ///
    /// Strings are parsed as-is; any other JSON value is parsed from its
    /// JSON text, so `[1,2]` and `true` work for arrays and booleans.
    pub fn coerce_args(&self, args: &[Value]) -> Result<Vec<DynSolValue>> {
        if args.len() != self.inputs.len() {
            return Err(self.invalid_argument(format!(
                "expected {} arguments, got {}",
                self.inputs.len(),
                args.len()
            )));
        }

        self.inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| {
                let ty: DynSolType = param
                    .resolve()
                    .map_err(|e| self.invalid_argument(e.to_string()))?;
                let text = match arg {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ty.coerce_str(&text).map_err(|e| {
                    self.invalid_argument(format!("`{}` as {}: {}", text, param.ty, e))
                })
            })
            .collect()
    }

    fn invalid_argument(&self, reason: String) -> ContractError {
        ContractError::InvalidArgument {
            function: self.name.clone(),
            reason,
        }
    }
}

/// An event element of a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<EventParam>,
    #[serde(default)]
    pub anonymous: bool,
}

impl EventEntry {
    /// Converts the entry into alloy's ABI event.
    pub fn to_alloy(&self) -> Event {
        Event {
            name: self.name.clone(),
            inputs: self.inputs.clone(),
            anonymous: self.anonymous,
        }
    }
}

/// A contract interface partitioned into functions and events.
///
/// Both sequences keep the order of the source description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    pub functions: Vec<FunctionEntry>,
    pub events: Vec<EventEntry>,
}

impl Interface {
    /// Partitions raw entries into functions and events.
    pub fn classify(entries: impl IntoIterator<Item = InterfaceEntry>) -> Self {
        let mut interface = Self::default();
        for entry in entries {
            match entry {
                InterfaceEntry::Function(function) => interface.functions.push(function),
                InterfaceEntry::Event(event) => interface.events.push(event),
                InterfaceEntry::Other => trace!("skipping non-function, non-event ABI entry"),
            }
        }
        interface
    }

    /// Parses a JSON ABI.
    ///
    /// Accepts a bare entry array or a build artifact object with an `abi` field.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ContractError::InvalidInterface(e.to_string()))?;
        Self::from_value(value)
    }

    /// Same as [`Interface::from_json`] for an already parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let entries = match value {
            Value::Array(_) => value,
            Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
                ContractError::InvalidInterface("artifact has no `abi` field".to_string())
            })?,
            _ => {
                return Err(ContractError::InvalidInterface(
                    "expected an ABI array or an artifact object".to_string(),
                ))
            }
        };

        let entries: Vec<InterfaceEntry> = serde_json::from_value(entries)
            .map_err(|e| ContractError::InvalidInterface(e.to_string()))?;
        Ok(Self::classify(entries))
    }

    /// Whether the interface declares no functions and no events.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.events.is_empty()
    }
}
