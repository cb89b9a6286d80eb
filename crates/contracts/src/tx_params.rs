//! Transaction parameters, their layering, and structural validation.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Transaction-level parameters for a write call.
///
/// Every field is optional; `None` means "unset", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TxParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl TxParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Layers `self` over `defaults`, field by field.
    ///
    /// A field set on `self` always wins; a default is only used for fields
    /// `self` leaves unset.
    pub fn merge(self, defaults: &TxParams) -> TxParams {
        TxParams {
            from: self.from.or(defaults.from),
            gas: self.gas.or(defaults.gas),
            gas_price: self.gas_price.or(defaults.gas_price),
            value: self.value.or(defaults.value),
            nonce: self.nonce.or(defaults.nonce),
        }
    }

    /// Returns the parameters without a gas limit.
    pub fn without_gas(self) -> TxParams {
        TxParams { gas: None, ..self }
    }

    /// Converts an untyped candidate into parameters if it passes
    /// [`TxParamsSchema::is_valid`].
    pub fn from_json(candidate: &Value) -> Option<TxParams> {
        let object = TxParamsSchema::validated(candidate)?;
        let mut params = TxParams::default();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "from" => params.from = Some(parse_address(value)?),
                "gas" => params.gas = Some(u64::try_from(parse_quantity(value)?).ok()?),
                "gasPrice" => params.gas_price = Some(u128::try_from(parse_quantity(value)?).ok()?),
                "value" => params.value = Some(parse_quantity(value)?),
                "nonce" => params.nonce = Some(u64::try_from(parse_quantity(value)?).ok()?),
                _ => return None,
            }
        }
        Some(params)
    }
}

/// Primitive type expected for a transaction parameter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Address,
    /// Non-negative integer no wider than the given number of bits.
    Quantity(usize),
}

/// Structural schema for transaction parameter objects.
///
/// Used to classify whether an untyped value is a transaction override; a
/// value that fails the check is not an error, it simply is not a
/// [`TxParams`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TxParamsSchema;

impl TxParamsSchema {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("from", FieldKind::Address),
        ("gas", FieldKind::Quantity(64)),
        ("gasPrice", FieldKind::Quantity(128)),
        ("value", FieldKind::Quantity(256)),
        ("nonce", FieldKind::Quantity(64)),
    ];

    /// Returns whether `candidate` is an object made only of recognized
    /// fields holding values of the expected primitive type.
    pub fn is_valid(candidate: &Value) -> bool {
        Self::validated(candidate).is_some()
    }

    fn validated(candidate: &Value) -> Option<&Map<String, Value>> {
        let object = candidate.as_object()?;
        let valid = object.iter().all(|(key, value)| {
            Self::FIELDS
                .iter()
                .find(|(name, _)| name == key)
                .is_some_and(|(_, kind)| value.is_null() || kind_matches(*kind, value))
        });
        valid.then_some(object)
    }
}

fn kind_matches(kind: FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::Address => parse_address(value).is_some(),
        FieldKind::Quantity(bits) => {
            parse_quantity(value).is_some_and(|quantity| quantity.bit_len() <= bits)
        }
    }
}

fn parse_address(value: &Value) -> Option<Address> {
    let text = value.as_str()?;
    if !text.starts_with("0x") {
        return None;
    }
    text.parse().ok()
}

fn parse_quantity(value: &Value) -> Option<U256> {
    match value {
        Value::Number(number) => number.as_u64().map(U256::from),
        Value::String(text) => match text.strip_prefix("0x") {
            Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
            Some(_) => None,
            None if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                U256::from_str_radix(text, 10).ok()
            }
            None => None,
        },
        _ => None,
    }
}

/// Splits a trailing transaction override off an untyped argument list.
///
/// When the last argument passes [`TxParamsSchema::is_valid`] it is removed
/// and returned; otherwise the list is left untouched and treated entirely
/// as positional arguments.
pub fn split_trailing_override(args: &mut Vec<Value>) -> Option<TxParams> {
    let params = args.last().and_then(TxParams::from_json)?;
    args.pop();
    Some(params)
}
