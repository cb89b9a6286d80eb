//! Test helper utilities: an in-memory transport that records every request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{address, Address};
use relay_rs_contracts::{
    Completion, ContractTransport, EventEntry, FunctionEntry, TransportError, TxParams,
};

pub const CONTRACT: Address = address!("48bacb9266a570d521063ef5dd96e61686dbe788");
pub const SENDER: Address = address!("5409ed021d9299bf6814279a6a1411a7e866a631");
pub const RECIPIENT: Address = address!("1234567890123456789012345678901234567890");

/// A token interface with one read, two writes and one event.
pub const TOKEN_ABI: &str = r#"[
    {"type":"function","name":"balanceOf","constant":true,
     "inputs":[{"name":"owner","type":"address"}],
     "outputs":[{"name":"","type":"uint256"}]},
    {"type":"function","name":"transfer","constant":false,
     "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
     "outputs":[{"name":"","type":"bool"}]},
    {"type":"function","name":"approve","stateMutability":"nonpayable",
     "inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],
     "outputs":[{"name":"","type":"bool"}]},
    {"type":"event","name":"Transfer","anonymous":false,"inputs":[
        {"name":"from","type":"address","indexed":true},
        {"name":"to","type":"address","indexed":true},
        {"name":"value","type":"uint256","indexed":false}]},
    {"type":"constructor","inputs":[]}
]"#;

/// One request the mock transport received.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Call {
        function: String,
        args: Vec<DynSolValue>,
    },
    Estimate {
        function: String,
        args: Vec<DynSolValue>,
        params: TxParams,
    },
    Send {
        function: String,
        args: Vec<DynSolValue>,
        params: TxParams,
    },
    Subscribe {
        event: String,
    },
}

/// What a mocked send resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct MockReceipt {
    pub function: String,
    pub params: TxParams,
}

#[derive(Default)]
struct MockState {
    log: Vec<Recorded>,
    estimate: Option<u64>,
    estimate_error: Option<String>,
    read_results: HashMap<String, Vec<DynSolValue>>,
    read_error: Option<String>,
    send_error: Option<String>,
}

/// In-memory transport; clones share the same state.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_estimate(self, estimate: u64) -> Self {
        self.state.lock().unwrap().estimate = Some(estimate);
        self
    }

    pub fn failing_estimates(self, message: &str) -> Self {
        self.state.lock().unwrap().estimate_error = Some(message.to_string());
        self
    }

    pub fn with_read_result(self, function: &str, outputs: Vec<DynSolValue>) -> Self {
        self.state
            .lock()
            .unwrap()
            .read_results
            .insert(function.to_string(), outputs);
        self
    }

    pub fn failing_reads(self, message: &str) -> Self {
        self.state.lock().unwrap().read_error = Some(message.to_string());
        self
    }

    pub fn failing_sends(self, message: &str) -> Self {
        self.state.lock().unwrap().send_error = Some(message.to_string());
        self
    }

    pub fn log(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn estimate_count(&self) -> usize {
        self.log()
            .iter()
            .filter(|r| matches!(r, Recorded::Estimate { .. }))
            .count()
    }

    pub fn sends(&self) -> Vec<Recorded> {
        self.log()
            .into_iter()
            .filter(|r| matches!(r, Recorded::Send { .. }))
            .collect()
    }

    fn record(&self, entry: Recorded) {
        self.state.lock().unwrap().log.push(entry);
    }
}

impl ContractTransport for MockTransport {
    type Receipt = MockReceipt;
    type Subscription = String;

    fn address(&self) -> Address {
        CONTRACT
    }

    async fn call(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, TransportError> {
        self.record(Recorded::Call {
            function: function.name.clone(),
            args: args.to_vec(),
        });
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.read_error {
            return Err(TransportError::msg(message.clone()));
        }
        Ok(state
            .read_results
            .get(&function.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn estimate_gas(
        &self,
        function: &FunctionEntry,
        args: &[DynSolValue],
        params: &TxParams,
    ) -> Result<u64, TransportError> {
        self.record(Recorded::Estimate {
            function: function.name.clone(),
            args: args.to_vec(),
            params: *params,
        });
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.estimate_error {
            return Err(TransportError::msg(message.clone()));
        }
        Ok(state.estimate.unwrap_or(21_000))
    }

    fn send(
        &self,
        function: &FunctionEntry,
        args: Vec<DynSolValue>,
        params: TxParams,
        done: Completion<Self::Receipt>,
    ) {
        self.record(Recorded::Send {
            function: function.name.clone(),
            args,
            params,
        });
        let error = self.state.lock().unwrap().send_error.clone();
        match error {
            Some(message) => done(Err(TransportError::msg(message))),
            None => done(Ok(MockReceipt {
                function: function.name.clone(),
                params,
            })),
        }
    }

    async fn subscribe(&self, event: &EventEntry) -> Result<Self::Subscription, TransportError> {
        self.record(Recorded::Subscribe {
            event: event.name.clone(),
        });
        Ok(event.name.clone())
    }
}
