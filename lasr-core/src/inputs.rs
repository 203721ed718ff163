use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::address::Address;
use crate::amount::parse_amount_to_big_int;
use crate::error::LasrError;
use crate::objects::Account;
use crate::u256::U256;

/// A signed call as the runtime forwards it to a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Caller
    pub from: Address,

    /// Recipient account
    pub to: Address,

    /// Program being called
    pub program_id: Address,

    /// Operation name the program dispatches on
    pub op: String,

    /// Operation arguments, JSON-encoded
    #[serde(default)]
    pub transaction_inputs: String,

    /// Value attached to the call, usually an already-scaled `0x` hex amount
    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub nonce: String,

    #[serde(default)]
    pub transaction_type: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u64>,

    #[serde(default)]
    pub r: String,

    #[serde(default)]
    pub s: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Decode `transactionInputs` into `T`
    pub fn parse_inputs<T: DeserializeOwned>(&self) -> Result<T, LasrError> {
        serde_json::from_str(&self.transaction_inputs)
            .map_err(|e| LasrError::MalformedInput(format!("transactionInputs: {}", e)))
    }

    /// `transactionInputs` as untyped JSON; blank input is an empty object
    pub fn inputs_value(&self) -> Result<Value, LasrError> {
        if self.transaction_inputs.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        self.parse_inputs()
    }

    /// Attached value as an on-chain integer; blank is zero
    pub fn amount(&self) -> Result<U256, LasrError> {
        if self.value.trim().is_empty() {
            return Ok(U256::ZERO);
        }
        parse_amount_to_big_int(self.value.as_str())
    }
}

/// Everything the runtime hands a program for one call.
///
/// Echoed back verbatim (modulo numeric canonicalization) in the program's
/// outputs, so keys this type does not model are carried in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeInputs {
    #[serde(default)]
    pub account_info: Option<Account>,

    pub transaction: Transaction,

    pub op: String,

    #[serde(default)]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_inputs: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComputeInputs {
    /// Decode a raw call payload
    pub fn from_json(raw: &str) -> Result<Self, LasrError> {
        serde_json::from_str(raw).map_err(|e| LasrError::MalformedInput(e.to_string()))
    }

    /// Operation to run: the top-level `op`, or the transaction's when blank
    pub fn operation(&self) -> &str {
        if self.op.is_empty() {
            &self.transaction.op
        } else {
            &self.op
        }
    }

    pub fn account_info(&self) -> Option<&Account> {
        self.account_info.as_ref()
    }
}
