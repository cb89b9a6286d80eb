//! [`ContractTransport`] over an alloy JSON-RPC provider.

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::providers::{FilterPollerBuilder, Provider};
use alloy::rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest};
use tracing::debug;

use crate::error::TransportError;
use crate::interface::{EventEntry, FunctionEntry};
use crate::provider::HttpProvider;
use crate::transport::{Completion, ContractTransport};
use crate::tx_params::TxParams;

/// Encodes calls with the function's ABI and dispatches them over JSON-RPC.
#[derive(Debug, Clone)]
pub struct AlloyTransport<P = HttpProvider> {
    address: Address,
    provider: P,
}

impl<P: Provider + Clone + 'static> AlloyTransport<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { address, provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn request(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
        params: &TxParams,
    ) -> Result<TransactionRequest, TransportError> {
        let input = function
            .to_alloy()
            .abi_encode_input(args)
            .map_err(TransportError::new)?;

        let mut tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(input);
        if let Some(from) = params.from {
            tx = tx.with_from(from);
        }
        if let Some(gas) = params.gas {
            tx = tx.with_gas_limit(gas);
        }
        if let Some(gas_price) = params.gas_price {
            tx = tx.with_gas_price(gas_price);
        }
        if let Some(value) = params.value {
            tx = tx.with_value(value);
        }
        if let Some(nonce) = params.nonce {
            tx = tx.with_nonce(nonce);
        }
        Ok(tx)
    }
}

impl<P: Provider + Clone + 'static> ContractTransport for AlloyTransport<P> {
    type Receipt = TransactionReceipt;
    type Subscription = FilterPollerBuilder<Log>;

    fn address(&self) -> Address {
        self.address
    }

    async fn call(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, TransportError> {
        let tx = self.request(function, args, &TxParams::default())?;
        let output = self.provider.call(tx).await.map_err(TransportError::new)?;
        function
            .to_alloy()
            .abi_decode_output(&output)
            .map_err(TransportError::new)
    }

    async fn estimate_gas(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
        params: &TxParams,
    ) -> Result<u64, TransportError> {
        let tx = self.request(function, args, params)?;
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(TransportError::new)
    }

    fn send(
        &self,
        function: &FunctionEntry,
        args: Vec<DynSolValue>,
        params: TxParams,
        done: Completion<Self::Receipt>,
    ) {
        let tx = match self.request(function, &args, &params) {
            Ok(tx) => tx,
            Err(err) => return done(Err(err)),
        };

        let provider = self.provider.clone();
        let name = function.name.clone();
        tokio::spawn(async move {
            let outcome = async {
                let pending = provider
                    .send_transaction(tx)
                    .await
                    .map_err(TransportError::new)?;
                debug!(function = %name, tx_hash = %pending.tx_hash(), "transaction submitted");
                pending.get_receipt().await.map_err(TransportError::new)
            }
            .await;
            done(outcome);
        });
    }

    async fn subscribe(&self, event: &EventEntry) -> Result<Self::Subscription, TransportError> {
        let filter = Filter::new()
            .address(self.address)
            .event_signature(event.to_alloy().selector());
        self.provider
            .watch_logs(&filter)
            .await
            .map_err(TransportError::new)
    }
}
