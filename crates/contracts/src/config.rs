//! Construction-time configuration for bound contracts.

use serde::{Deserialize, Serialize};

use crate::gas::DEFAULT_GAS_MARGIN;
use crate::tx_params::TxParams;

/// What to do when an interface declares two functions (or two events)
/// with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateNames {
    /// Fail construction with [`ContractError::DuplicateFunction`](crate::ContractError::DuplicateFunction).
    #[default]
    Reject,
    /// The entry declared last replaces earlier ones.
    LastWins,
}

/// Configuration shared by every call bound on a contract.
///
/// Immutable once the contract is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinderConfig {
    /// Lowest-priority transaction parameters for write calls.
    pub defaults: TxParams,
    /// Gas added to every estimate.
    pub gas_margin: u64,
    /// Policy for functions or events that share a name.
    pub duplicate_names: DuplicateNames,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            defaults: TxParams::default(),
            gas_margin: DEFAULT_GAS_MARGIN,
            duplicate_names: DuplicateNames::default(),
        }
    }
}

impl BinderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default transaction parameters.
    pub fn with_defaults(mut self, defaults: TxParams) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the gas margin added to estimates.
    pub fn with_gas_margin(mut self, gas_margin: u64) -> Self {
        self.gas_margin = gas_margin;
        self
    }

    /// Set the duplicate name policy.
    pub fn with_duplicate_names(mut self, policy: DuplicateNames) -> Self {
        self.duplicate_names = policy;
        self
    }
}
