//! Client for the token registry contract.
//!
//! The registry contract is bound lazily from its ABI on first use and the
//! bound instance is cached until [`TokenRegistry::invalidate_contract_instance`]
//! forgets it.

use std::sync::{Arc, Mutex, PoisonError};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::binder::Contract;
use crate::config::BinderConfig;
use crate::error::{ContractError, Result};
use crate::transport::ContractTransport;

/// ABI of the token registry's read interface.
pub const TOKEN_REGISTRY_ABI: &str = r#"[
    {"type":"function","name":"getTokenAddresses","constant":true,"inputs":[],
     "outputs":[{"name":"","type":"address[]"}]},
    {"type":"function","name":"getTokenMetaData","constant":true,
     "inputs":[{"name":"_token","type":"address"}],
     "outputs":[{"name":"","type":"address"},{"name":"","type":"string"},{"name":"","type":"string"},
                {"name":"","type":"uint8"},{"name":"","type":"bytes"},{"name":"","type":"bytes"}]},
    {"type":"function","name":"getTokenByName","constant":true,
     "inputs":[{"name":"_name","type":"string"}],
     "outputs":[{"name":"","type":"address"},{"name":"","type":"string"},{"name":"","type":"string"},
                {"name":"","type":"uint8"},{"name":"","type":"bytes"},{"name":"","type":"bytes"}]},
    {"type":"function","name":"getTokenBySymbol","constant":true,
     "inputs":[{"name":"_symbol","type":"string"}],
     "outputs":[{"name":"","type":"address"},{"name":"","type":"string"},{"name":"","type":"string"},
                {"name":"","type":"uint8"},{"name":"","type":"bytes"},{"name":"","type":"bytes"}]},
    {"type":"function","name":"getTokenAddressByName","constant":true,
     "inputs":[{"name":"_name","type":"string"}],
     "outputs":[{"name":"","type":"address"}]},
    {"type":"function","name":"getTokenAddressBySymbol","constant":true,
     "inputs":[{"name":"_symbol","type":"string"}],
     "outputs":[{"name":"","type":"address"}]},
    {"type":"event","name":"LogAddToken","anonymous":false,"inputs":[
        {"name":"token","type":"address","indexed":true},
        {"name":"name","type":"string","indexed":false},
        {"name":"symbol","type":"string","indexed":false},
        {"name":"decimals","type":"uint8","indexed":false},
        {"name":"ipfsHash","type":"bytes","indexed":false},
        {"name":"swarmHash","type":"bytes","indexed":false}]},
    {"type":"event","name":"LogRemoveToken","anonymous":false,"inputs":[
        {"name":"token","type":"address","indexed":true},
        {"name":"name","type":"string","indexed":false},
        {"name":"symbol","type":"string","indexed":false},
        {"name":"decimals","type":"uint8","indexed":false},
        {"name":"ipfsHash","type":"bytes","indexed":false},
        {"name":"swarmHash","type":"bytes","indexed":false}]}
]"#;

/// A token listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Typed queries against a token registry contract.
pub struct TokenRegistry<T> {
    transport: T,
    config: BinderConfig,
    contract: Mutex<Option<Arc<Contract<T>>>>,
}

impl<T: ContractTransport + Clone> TokenRegistry<T> {
    /// Create a registry client; `transport` must point at the registry contract.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, BinderConfig::default())
    }

    pub fn with_config(transport: T, config: BinderConfig) -> Self {
        Self {
            transport,
            config,
            contract: Mutex::new(None),
        }
    }

    /// Address of the registry contract.
    pub fn contract_address(&self) -> Address {
        self.transport.address()
    }

    /// Retrieves every token currently listed in the registry.
    ///
    /// Addresses whose metadata has since been removed are skipped.
    pub async fn get_tokens(&self) -> Result<Vec<Token>> {
        let addresses = self.get_token_addresses().await?;
        let tokens = try_join_all(
            addresses
                .into_iter()
                .map(|address| self.get_token_if_exists(address)),
        )
        .await?;
        Ok(tokens.into_iter().flatten().collect())
    }

    /// Retrieves the addresses of every listed token.
    pub async fn get_token_addresses(&self) -> Result<Vec<Address>> {
        let contract = self.contract()?;
        let outputs = contract.read("getTokenAddresses")?.call(&[]).await?;
        let list = single(&outputs, "getTokenAddresses")?
            .as_array()
            .ok_or_else(|| unexpected("getTokenAddresses", "expected an address array"))?;
        list.iter()
            .map(|value| {
                value
                    .as_address()
                    .ok_or_else(|| unexpected("getTokenAddresses", "expected an address"))
            })
            .collect()
    }

    /// Retrieves a token by address, `None` if it is not listed.
    pub async fn get_token_if_exists(&self, address: Address) -> Result<Option<Token>> {
        self.token_query("getTokenMetaData", DynSolValue::Address(address))
            .await
    }

    /// Retrieves a token by symbol, `None` if it is not listed.
    pub async fn get_token_by_symbol_if_exists(&self, symbol: &str) -> Result<Option<Token>> {
        self.token_query("getTokenBySymbol", DynSolValue::String(symbol.to_string()))
            .await
    }

    /// Retrieves a token by name, `None` if it is not listed.
    pub async fn get_token_by_name_if_exists(&self, name: &str) -> Result<Option<Token>> {
        self.token_query("getTokenByName", DynSolValue::String(name.to_string()))
            .await
    }

    /// Looks up a token address by symbol, `None` if it is not listed.
    pub async fn get_token_address_by_symbol_if_exists(
        &self,
        symbol: &str,
    ) -> Result<Option<Address>> {
        self.address_query(
            "getTokenAddressBySymbol",
            DynSolValue::String(symbol.to_string()),
        )
        .await
    }

    /// Looks up a token address by name, `None` if it is not listed.
    pub async fn get_token_address_by_name_if_exists(&self, name: &str) -> Result<Option<Address>> {
        self.address_query("getTokenAddressByName", DynSolValue::String(name.to_string()))
            .await
    }

    /// Forgets the cached contract instance; the next query binds it again.
    pub fn invalidate_contract_instance(&self) {
        debug!(address = %self.transport.address(), "forgetting token registry instance");
        self.cache().take();
    }

    /// Whether a bound contract instance is currently cached.
    pub fn is_contract_cached(&self) -> bool {
        self.cache().is_some()
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<Arc<Contract<T>>>> {
        self.contract.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn contract(&self) -> Result<Arc<Contract<T>>> {
        let mut cache = self.cache();
        if let Some(contract) = cache.as_ref() {
            return Ok(Arc::clone(contract));
        }

        let contract = Arc::new(Contract::from_json(
            self.transport.clone(),
            TOKEN_REGISTRY_ABI,
            self.config.clone(),
        )?);
        *cache = Some(Arc::clone(&contract));
        Ok(contract)
    }

    async fn token_query(&self, function: &str, arg: DynSolValue) -> Result<Option<Token>> {
        let contract = self.contract()?;
        let outputs = contract.read(function)?.call(&[arg]).await?;
        token_from_metadata(function, &outputs)
    }

    async fn address_query(&self, function: &str, arg: DynSolValue) -> Result<Option<Address>> {
        let contract = self.contract()?;
        let outputs = contract.read(function)?.call(&[arg]).await?;
        let address = single(&outputs, function)?
            .as_address()
            .ok_or_else(|| unexpected(function, "expected an address"))?;
        Ok((!address.is_zero()).then_some(address))
    }
}

fn unexpected(function: &str, reason: &str) -> ContractError {
    ContractError::UnexpectedOutput {
        function: function.to_string(),
        reason: reason.to_string(),
    }
}

fn single<'a>(outputs: &'a [DynSolValue], function: &str) -> Result<&'a DynSolValue> {
    match outputs {
        [value] => Ok(value),
        _ => Err(unexpected(function, "expected a single output")),
    }
}

/// Builds a token from `(address, name, symbol, decimals, ipfsHash, swarmHash)`.
///
/// The registry reports unknown tokens with a zero address.
fn token_from_metadata(function: &str, outputs: &[DynSolValue]) -> Result<Option<Token>> {
    let [address, name, symbol, decimals, ..] = outputs else {
        return Err(unexpected(function, "expected token metadata"));
    };

    let address = address
        .as_address()
        .ok_or_else(|| unexpected(function, "token address"))?;
    if address.is_zero() {
        return Ok(None);
    }

    let name = name
        .as_str()
        .ok_or_else(|| unexpected(function, "token name"))?;
    let symbol = symbol
        .as_str()
        .ok_or_else(|| unexpected(function, "token symbol"))?;
    let (decimals, _) = decimals
        .as_uint()
        .ok_or_else(|| unexpected(function, "token decimals"))?;
    let decimals = u8::try_from(decimals).map_err(|_| unexpected(function, "token decimals"))?;

    Ok(Some(Token {
        address,
        name: name.to_string(),
        symbol: symbol.to_string(),
        decimals,
    }))
}
