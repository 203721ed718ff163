use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::address::{Address, AddressOrNamespace};
use crate::error::LasrError;
use crate::u256::U256;

/// Opaque string-keyed data attached to tokens and programs
pub type ArbitraryData = BTreeMap<String, String>;

/// Opaque string-keyed metadata attached to tokens and programs
pub type Metadata = BTreeMap<String, String>;

/// Whether a token may currently be moved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The token is frozen and cannot be transferred
    Locked,
    /// The token can be transferred
    #[default]
    Free,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Locked => "locked",
            Status::Free => "free",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"') {
            "locked" => Ok(Status::Locked),
            "free" => Ok(Status::Free),
            other => Err(LasrError::invalid_value(
                "status",
                format!("expected 'locked' or 'free', got '{}'", other),
            )),
        }
    }
}

/// A program's holding inside an account.
///
/// A token carries either a divisible `balance` (fungible) or an ordered set
/// of `tokenIds` (non-fungible), scoped under the program that minted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Program that minted this token
    pub program_id: Address,

    /// Account holding this token
    pub owner_id: Address,

    /// Divisible balance at 18 decimals
    #[serde(default)]
    pub balance: U256,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub data: ArbitraryData,

    /// Non-fungible ids, in the order they were assigned
    #[serde(default)]
    pub token_ids: Vec<U256>,

    /// Spender to the balance it may move
    #[serde(default)]
    pub allowance: BTreeMap<Address, U256>,

    /// Spender to the ids it may move
    #[serde(default)]
    pub approvals: BTreeMap<Address, Vec<U256>>,

    #[serde(default)]
    pub status: Status,

    /// Keys the runtime sends that this type does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    /// Create an empty token for `owner_id` under `program_id`
    pub fn new(program_id: Address, owner_id: Address) -> Self {
        Self {
            program_id,
            owner_id,
            balance: U256::ZERO,
            metadata: Metadata::new(),
            data: ArbitraryData::new(),
            token_ids: Vec::new(),
            allowance: BTreeMap::new(),
            approvals: BTreeMap::new(),
            status: Status::Free,
            extra: Map::new(),
        }
    }

    pub fn holds_id(&self, id: &U256) -> bool {
        self.token_ids.contains(id)
    }

    /// Ids `spender` has been approved to move
    pub fn approved_ids(&self, spender: &Address) -> &[U256] {
        self.approvals
            .get(spender)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_locked(&self) -> bool {
        self.status == Status::Locked
    }
}

/// Kind of account: a user wallet or a deployed program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    #[serde(rename = "user")]
    User,
    /// Program account, carrying the program's own address
    Program(Address),
}

/// Snapshot of an account as the runtime hands it to a program call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default)]
    pub account_type: AccountType,

    #[serde(default)]
    pub nonce: U256,

    pub owner_address: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_namespace: Option<AddressOrNamespace>,

    #[serde(default)]
    pub program_account_data: ArbitraryData,

    #[serde(default)]
    pub program_account_metadata: Metadata,

    #[serde(default)]
    pub program_account_linked_programs: Vec<AddressOrNamespace>,

    /// Holdings keyed by the program that minted them
    #[serde(default)]
    pub programs: BTreeMap<Address, Token>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    pub fn new(owner_address: Address, account_type: AccountType) -> Self {
        Self {
            account_type,
            nonce: U256::ZERO,
            owner_address,
            program_namespace: None,
            program_account_data: ArbitraryData::new(),
            program_account_metadata: Metadata::new(),
            program_account_linked_programs: Vec::new(),
            programs: BTreeMap::new(),
            extra: Map::new(),
        }
    }

    pub fn is_program(&self) -> bool {
        matches!(self.account_type, AccountType::Program(_))
    }

    /// Get the token this account holds for `program_id`
    pub fn token(&self, program_id: &Address) -> Option<&Token> {
        self.programs.get(program_id)
    }

    /// Balance held for `program_id`, zero when the account holds nothing
    pub fn balance_of(&self, program_id: &Address) -> U256 {
        self.token(program_id)
            .map(|token| token.balance)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OWNER: &str = "0x100444c7d04a842d19bc3ee63cb7b96682ff3f43";
    const PROGRAM: &str = "0xa9a5b3e7e0b9b3c0bd6a1b1c0f7f0f8e2a9f7e11";

    fn address(raw: &str) -> Address {
        Address::new(raw).unwrap()
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("locked".parse::<Status>().unwrap(), Status::Locked);
        assert_eq!("\"free\"".parse::<Status>().unwrap(), Status::Free);
        assert!(matches!(
            "frozen".parse::<Status>(),
            Err(LasrError::InvalidValue { .. })
        ));
        assert_eq!(serde_json::to_value(Status::Locked).unwrap(), json!("locked"));
    }

    #[test]
    fn test_token_defaults_and_extra_keys() {
        let raw = json!({
            "programId": PROGRAM,
            "ownerId": OWNER,
            "balance": [5, 0, 0, 0],
            "tokenIds": [[1, 0, 0, 0], "0x2"],
            "approvals": { OWNER: [[1, 0, 0, 0]] },
            "somethingNew": true
        });

        let token: Token = serde_json::from_value(raw).unwrap();
        assert_eq!(token.balance, U256::from(5u64));
        assert_eq!(token.token_ids, vec![U256::from(1u64), U256::from(2u64)]);
        assert!(token.holds_id(&U256::from(2u64)));
        assert_eq!(token.approved_ids(&address(OWNER)), &[U256::from(1u64)]);
        assert_eq!(token.status, Status::Free);
        assert_eq!(token.extra.get("somethingNew"), Some(&json!(true)));

        let echoed = serde_json::to_value(&token).unwrap();
        assert_eq!(echoed["somethingNew"], json!(true));
        assert_eq!(echoed["tokenIds"], json!([[1, 0, 0, 0], [2, 0, 0, 0]]));
    }

    #[test]
    fn test_account_type_wire_shape() {
        assert_eq!(serde_json::to_value(AccountType::User).unwrap(), json!("user"));
        assert_eq!(
            serde_json::to_value(AccountType::Program(address(PROGRAM))).unwrap(),
            json!({ "Program": PROGRAM })
        );
    }

    #[test]
    fn test_account_snapshot() {
        let raw = json!({
            "accountType": { "Program": PROGRAM },
            "nonce": [0, 0, 0, 0],
            "ownerAddress": OWNER,
            "programNamespace": "this",
            "programAccountData": {},
            "programAccountMetadata": { "name": "demo" },
            "programAccountLinkedPrograms": [PROGRAM],
            "programs": {
                PROGRAM: {
                    "programId": PROGRAM,
                    "ownerId": OWNER,
                    "balance": [9, 0, 0, 0]
                }
            }
        });

        let account: Account = serde_json::from_value(raw).unwrap();
        assert!(account.is_program());
        assert_eq!(account.program_namespace, Some(AddressOrNamespace::This));
        assert_eq!(account.balance_of(&address(PROGRAM)), U256::from(9u64));
        assert_eq!(account.balance_of(&address(OWNER)), U256::ZERO);
        assert_eq!(account.program_account_metadata.get("name").unwrap(), "demo");
    }

    #[test]
    fn test_account_requires_owner() {
        let raw = json!({ "accountType": "user" });
        assert!(serde_json::from_value::<Account>(raw).is_err());
    }
}
