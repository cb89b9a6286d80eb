//! Gas resolution for write calls.

use alloy::dyn_abi::DynSolValue;
use tracing::debug;

use crate::error::{ContractError, Result};
use crate::interface::FunctionEntry;
use crate::transport::ContractTransport;
use crate::tx_params::TxParams;

/// Gas added on top of every estimate: eight 15k SSTORE refunds.
pub const DEFAULT_GAS_MARGIN: u64 = 120_000;

/// Fills in the gas limit of a write call from the transport's estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimator {
    margin: u64,
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_MARGIN)
    }
}

impl GasEstimator {
    pub fn new(margin: u64) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u64 {
        self.margin
    }

    /// Returns `params` with a gas limit.
    ///
    /// An explicit gas limit is kept untouched and the transport is not
    /// consulted. Otherwise the limit becomes the estimate plus the margin.
    pub async fn resolve<T: ContractTransport>(
        &self,
        transport: &T,
        function: &FunctionEntry,
        args: &[DynSolValue],
        params: TxParams,
    ) -> Result<TxParams> {
        if params.gas.is_some() {
            return Ok(params);
        }

        let estimate = transport
            .estimate_gas(function, args, &params)
            .await
            .map_err(ContractError::Estimation)?;
        let gas = estimate.saturating_add(self.margin);

        debug!(
            function = %function.name,
            estimate,
            margin = self.margin,
            gas,
            "resolved gas limit from estimate"
        );

        Ok(params.with_gas(gas))
    }
}
