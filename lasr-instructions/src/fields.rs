//! Update-field model.
//!
//! One `TokenUpdateField` / `ProgramUpdateField` is exactly one mutation of
//! one field. On the wire it is
//! `{"field": "<field>", "value": {"<field>": {"<action>": <payload>}}}`, so a
//! decoder can dispatch on the (field, action) pair without looking at the
//! payload.
//!
//! The string constructors ([`TokenUpdateField::from_parts`],
//! [`ProgramUpdateField::from_parts`]) check the field, then the action, then
//! the payload, and build nothing unless all three are valid.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use lasr_core::{Address, AddressOrNamespace, LasrError, Status, U256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mutation verbs a field may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateAction {
    /// Replace the whole field
    Value,
    Insert,
    Extend,
    Remove,
    Revoke,
    Push,
    Pop,
}

impl UpdateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateAction::Value => "value",
            UpdateAction::Insert => "insert",
            UpdateAction::Extend => "extend",
            UpdateAction::Remove => "remove",
            UpdateAction::Revoke => "revoke",
            UpdateAction::Push => "push",
            UpdateAction::Pop => "pop",
        }
    }

    fn parse(field: &str, action: &str) -> Result<Self, LasrError> {
        match action {
            "value" => Ok(UpdateAction::Value),
            "insert" => Ok(UpdateAction::Insert),
            "extend" => Ok(UpdateAction::Extend),
            "remove" => Ok(UpdateAction::Remove),
            "revoke" => Ok(UpdateAction::Revoke),
            "push" => Ok(UpdateAction::Push),
            "pop" => Ok(UpdateAction::Pop),
            _ => Err(LasrError::unsupported_action(field, action)),
        }
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MAP_ACTIONS: &[UpdateAction] = &[
    UpdateAction::Value,
    UpdateAction::Insert,
    UpdateAction::Extend,
    UpdateAction::Remove,
];

const ID_ACTIONS: &[UpdateAction] = &[
    UpdateAction::Value,
    UpdateAction::Push,
    UpdateAction::Extend,
    UpdateAction::Insert,
    UpdateAction::Pop,
];

const STATUS_ACTIONS: &[UpdateAction] = &[UpdateAction::Value];

const APPROVAL_ACTIONS: &[UpdateAction] = &[
    UpdateAction::Value,
    UpdateAction::Insert,
    UpdateAction::Extend,
    UpdateAction::Remove,
    UpdateAction::Revoke,
];

/// Mutation of a string-keyed data or metadata map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapUpdate {
    /// Replace the whole map
    Value(BTreeMap<String, String>),
    /// Set one key
    Insert(String, String),
    /// Merge entries into the map
    Extend(BTreeMap<String, String>),
    /// Drop one key
    Remove(String),
}

impl MapUpdate {
    pub fn action(&self) -> UpdateAction {
        match self {
            MapUpdate::Value(_) => UpdateAction::Value,
            MapUpdate::Insert(..) => UpdateAction::Insert,
            MapUpdate::Extend(_) => UpdateAction::Extend,
            MapUpdate::Remove(_) => UpdateAction::Remove,
        }
    }

    fn from_payload(field: &str, action: UpdateAction, payload: Value) -> Result<Self, LasrError> {
        match action {
            UpdateAction::Value => Ok(MapUpdate::Value(string_map(field, payload)?)),
            UpdateAction::Extend => Ok(MapUpdate::Extend(string_map(field, payload)?)),
            UpdateAction::Insert => {
                let (key, value) = single_entry(field, payload)?;
                Ok(MapUpdate::Insert(key, text_of(value)))
            }
            UpdateAction::Remove => match payload {
                Value::String(key) => Ok(MapUpdate::Remove(key)),
                other => Err(LasrError::invalid_value(
                    field,
                    format!("remove expects a key, got {}", other),
                )),
            },
            other => Err(LasrError::unsupported_action(field, other.as_str())),
        }
    }
}

/// Mutation of a token's ordered id collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenIdUpdate {
    /// Replace the whole collection
    Value(Vec<U256>),
    /// Append one id
    Push(U256),
    /// Append several ids, in order
    Extend(Vec<U256>),
    /// Insert one id at a position
    Insert(usize, U256),
    /// Drop the last id
    Pop,
}

impl TokenIdUpdate {
    pub fn action(&self) -> UpdateAction {
        match self {
            TokenIdUpdate::Value(_) => UpdateAction::Value,
            TokenIdUpdate::Push(_) => UpdateAction::Push,
            TokenIdUpdate::Extend(_) => UpdateAction::Extend,
            TokenIdUpdate::Insert(..) => UpdateAction::Insert,
            TokenIdUpdate::Pop => UpdateAction::Pop,
        }
    }

    fn from_payload(field: &str, action: UpdateAction, payload: Value) -> Result<Self, LasrError> {
        match action {
            UpdateAction::Value => Ok(TokenIdUpdate::Value(id_list(field, payload)?)),
            UpdateAction::Extend => Ok(TokenIdUpdate::Extend(id_list(field, payload)?)),
            UpdateAction::Push => Ok(TokenIdUpdate::Push(id_of(field, &payload)?)),
            UpdateAction::Insert => match payload {
                Value::Array(pair) if pair.len() == 2 => {
                    let index = pair[0]
                        .as_u64()
                        .and_then(|index| usize::try_from(index).ok())
                        .ok_or_else(|| {
                            LasrError::invalid_value(field, "insert index must be a non-negative integer")
                        })?;
                    Ok(TokenIdUpdate::Insert(index, id_of(field, &pair[1])?))
                }
                other => Err(LasrError::invalid_value(
                    field,
                    format!("insert expects [index, id], got {}", other),
                )),
            },
            // pop carries no payload
            UpdateAction::Pop => Ok(TokenIdUpdate::Pop),
            other => Err(LasrError::unsupported_action(field, other.as_str())),
        }
    }
}

/// Replacement of a token's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusUpdate {
    Value(Status),
}

impl StatusUpdate {
    pub fn action(&self) -> UpdateAction {
        UpdateAction::Value
    }

    fn from_payload(field: &str, payload: Value) -> Result<Self, LasrError> {
        match payload {
            Value::String(status) => Ok(StatusUpdate::Value(status.parse()?)),
            other => Err(LasrError::invalid_value(
                field,
                format!("expected 'locked' or 'free', got {}", other),
            )),
        }
    }
}

/// Mutation of the spender → approved ids map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApprovalsUpdate {
    /// Replace every approval
    Value(BTreeMap<Address, Vec<U256>>),
    /// Approve ids for one spender
    Insert(Address, Vec<U256>),
    /// Approve ids for several spenders
    Extend(BTreeMap<Address, Vec<U256>>),
    /// Withdraw some ids from one spender
    Remove(Address, Vec<U256>),
    /// Withdraw everything from one spender
    Revoke(Address),
}

impl ApprovalsUpdate {
    pub fn action(&self) -> UpdateAction {
        match self {
            ApprovalsUpdate::Value(_) => UpdateAction::Value,
            ApprovalsUpdate::Insert(..) => UpdateAction::Insert,
            ApprovalsUpdate::Extend(_) => UpdateAction::Extend,
            ApprovalsUpdate::Remove(..) => UpdateAction::Remove,
            ApprovalsUpdate::Revoke(_) => UpdateAction::Revoke,
        }
    }

    fn from_payload(field: &str, action: UpdateAction, payload: Value) -> Result<Self, LasrError> {
        match action {
            UpdateAction::Value => Ok(ApprovalsUpdate::Value(approval_map(field, payload)?)),
            UpdateAction::Extend => Ok(ApprovalsUpdate::Extend(approval_map(field, payload)?)),
            UpdateAction::Insert => {
                let (spender, ids) = single_entry(field, payload)?;
                Ok(ApprovalsUpdate::Insert(address_of(field, &spender)?, id_list(field, ids)?))
            }
            UpdateAction::Remove => {
                let (spender, ids) = single_entry(field, payload)?;
                Ok(ApprovalsUpdate::Remove(address_of(field, &spender)?, id_list(field, ids)?))
            }
            UpdateAction::Revoke => match payload {
                Value::String(spender) => Ok(ApprovalsUpdate::Revoke(address_of(field, &spender)?)),
                other => Err(LasrError::invalid_value(
                    field,
                    format!("revoke expects a spender address, got {}", other),
                )),
            },
            other => Err(LasrError::unsupported_action(field, other.as_str())),
        }
    }
}

/// Mutation of a program's linked programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkedProgramsUpdate {
    Value(Vec<AddressOrNamespace>),
    Insert(AddressOrNamespace),
    Extend(Vec<AddressOrNamespace>),
    Remove(AddressOrNamespace),
}

impl LinkedProgramsUpdate {
    pub fn action(&self) -> UpdateAction {
        match self {
            LinkedProgramsUpdate::Value(_) => UpdateAction::Value,
            LinkedProgramsUpdate::Insert(_) => UpdateAction::Insert,
            LinkedProgramsUpdate::Extend(_) => UpdateAction::Extend,
            LinkedProgramsUpdate::Remove(_) => UpdateAction::Remove,
        }
    }

    fn from_payload(field: &str, action: UpdateAction, payload: Value) -> Result<Self, LasrError> {
        match action {
            UpdateAction::Value => Ok(LinkedProgramsUpdate::Value(program_list(field, payload)?)),
            UpdateAction::Extend => Ok(LinkedProgramsUpdate::Extend(program_list(field, payload)?)),
            UpdateAction::Insert => Ok(LinkedProgramsUpdate::Insert(program_of(field, &payload)?)),
            UpdateAction::Remove => Ok(LinkedProgramsUpdate::Remove(program_of(field, &payload)?)),
            other => Err(LasrError::unsupported_action(field, other.as_str())),
        }
    }
}

/// Token fields an update may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenField {
    Approvals,
    Balance,
    Data,
    Metadata,
    OwnerId,
    ProgramId,
    Status,
    TokenIds,
}

impl TokenField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenField::Approvals => "approvals",
            TokenField::Balance => "balance",
            TokenField::Data => "data",
            TokenField::Metadata => "metadata",
            TokenField::OwnerId => "ownerId",
            TokenField::ProgramId => "programId",
            TokenField::Status => "status",
            TokenField::TokenIds => "tokenIds",
        }
    }

    /// Actions an update of this field may carry.
    ///
    /// Balance, owner and program are only changed by transfers, burns and
    /// creation, so they accept none.
    pub fn actions(&self) -> &'static [UpdateAction] {
        match self {
            TokenField::Data | TokenField::Metadata => MAP_ACTIONS,
            TokenField::TokenIds => ID_ACTIONS,
            TokenField::Status => STATUS_ACTIONS,
            TokenField::Approvals => APPROVAL_ACTIONS,
            TokenField::Balance | TokenField::OwnerId | TokenField::ProgramId => &[],
        }
    }

    pub fn supports(&self, action: UpdateAction) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenField {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approvals" => Ok(TokenField::Approvals),
            "balance" => Ok(TokenField::Balance),
            "data" => Ok(TokenField::Data),
            "metadata" => Ok(TokenField::Metadata),
            "ownerId" => Ok(TokenField::OwnerId),
            "programId" => Ok(TokenField::ProgramId),
            "status" => Ok(TokenField::Status),
            "tokenIds" => Ok(TokenField::TokenIds),
            other => Err(LasrError::UnknownField(other.to_string())),
        }
    }
}

/// The operation carried by a token update, tagged by field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenFieldValue {
    Data(MapUpdate),
    Metadata(MapUpdate),
    TokenIds(TokenIdUpdate),
    Status(StatusUpdate),
    Approvals(ApprovalsUpdate),
}

impl TokenFieldValue {
    /// The field this value mutates
    pub fn field(&self) -> TokenField {
        match self {
            TokenFieldValue::Data(_) => TokenField::Data,
            TokenFieldValue::Metadata(_) => TokenField::Metadata,
            TokenFieldValue::TokenIds(_) => TokenField::TokenIds,
            TokenFieldValue::Status(_) => TokenField::Status,
            TokenFieldValue::Approvals(_) => TokenField::Approvals,
        }
    }

    pub fn action(&self) -> UpdateAction {
        match self {
            TokenFieldValue::Data(update) | TokenFieldValue::Metadata(update) => update.action(),
            TokenFieldValue::TokenIds(update) => update.action(),
            TokenFieldValue::Status(update) => update.action(),
            TokenFieldValue::Approvals(update) => update.action(),
        }
    }
}

#[derive(Deserialize)]
struct RawTokenUpdateField {
    field: TokenField,
    value: TokenFieldValue,
}

/// One mutation of one token field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTokenUpdateField")]
pub struct TokenUpdateField {
    field: TokenField,
    value: TokenFieldValue,
}

impl TokenUpdateField {
    /// Wrap a typed value; the field is taken from the value's tag
    pub fn new(value: TokenFieldValue) -> Self {
        Self {
            field: value.field(),
            value,
        }
    }

    pub fn data(update: MapUpdate) -> Self {
        Self::new(TokenFieldValue::Data(update))
    }

    pub fn metadata(update: MapUpdate) -> Self {
        Self::new(TokenFieldValue::Metadata(update))
    }

    pub fn token_ids(update: TokenIdUpdate) -> Self {
        Self::new(TokenFieldValue::TokenIds(update))
    }

    pub fn status(status: Status) -> Self {
        Self::new(TokenFieldValue::Status(StatusUpdate::Value(status)))
    }

    pub fn approvals(update: ApprovalsUpdate) -> Self {
        Self::new(TokenFieldValue::Approvals(update))
    }

    /// Build from a field name, a JSON-text payload and an action name.
    ///
    /// Fails with `UnknownField`, `UnsupportedAction` or `InvalidValue`, in
    /// that order of checking.
    pub fn from_parts(field: &str, value: &str, action: &str) -> Result<Self, LasrError> {
        let token_field: TokenField = field.parse()?;
        let update_action = UpdateAction::parse(field, action)?;
        if !token_field.supports(update_action) {
            return Err(LasrError::unsupported_action(field, action));
        }

        let payload = parse_payload(value);
        let value = match token_field {
            TokenField::Data => {
                TokenFieldValue::Data(MapUpdate::from_payload(field, update_action, payload)?)
            }
            TokenField::Metadata => {
                TokenFieldValue::Metadata(MapUpdate::from_payload(field, update_action, payload)?)
            }
            TokenField::TokenIds => {
                TokenFieldValue::TokenIds(TokenIdUpdate::from_payload(field, update_action, payload)?)
            }
            TokenField::Status => TokenFieldValue::Status(StatusUpdate::from_payload(field, payload)?),
            TokenField::Approvals => TokenFieldValue::Approvals(ApprovalsUpdate::from_payload(
                field,
                update_action,
                payload,
            )?),
            TokenField::Balance | TokenField::OwnerId | TokenField::ProgramId => {
                return Err(LasrError::unsupported_action(field, action))
            }
        };

        Ok(Self::new(value))
    }

    pub fn field(&self) -> TokenField {
        self.field
    }

    pub fn value(&self) -> &TokenFieldValue {
        &self.value
    }
}

impl TryFrom<RawTokenUpdateField> for TokenUpdateField {
    type Error = LasrError;

    fn try_from(raw: RawTokenUpdateField) -> Result<Self, Self::Error> {
        if raw.value.field() != raw.field {
            return Err(LasrError::invalid_value(
                raw.field.as_str(),
                format!("value is tagged '{}'", raw.value.field()),
            ));
        }
        Ok(Self::new(raw.value))
    }
}

/// Program fields an update may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramField {
    Data,
    Metadata,
    LinkedPrograms,
}

impl ProgramField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramField::Data => "data",
            ProgramField::Metadata => "metadata",
            ProgramField::LinkedPrograms => "linkedPrograms",
        }
    }

    // linked programs share the map verbs
    pub fn actions(&self) -> &'static [UpdateAction] {
        MAP_ACTIONS
    }

    pub fn supports(&self, action: UpdateAction) -> bool {
        self.actions().contains(&action)
    }
}

impl fmt::Display for ProgramField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramField {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(ProgramField::Data),
            "metadata" => Ok(ProgramField::Metadata),
            "linkedPrograms" => Ok(ProgramField::LinkedPrograms),
            other => Err(LasrError::UnknownField(other.to_string())),
        }
    }
}

/// The operation carried by a program update, tagged by field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramFieldValue {
    Data(MapUpdate),
    Metadata(MapUpdate),
    LinkedPrograms(LinkedProgramsUpdate),
}

impl ProgramFieldValue {
    pub fn field(&self) -> ProgramField {
        match self {
            ProgramFieldValue::Data(_) => ProgramField::Data,
            ProgramFieldValue::Metadata(_) => ProgramField::Metadata,
            ProgramFieldValue::LinkedPrograms(_) => ProgramField::LinkedPrograms,
        }
    }

    pub fn action(&self) -> UpdateAction {
        match self {
            ProgramFieldValue::Data(update) | ProgramFieldValue::Metadata(update) => update.action(),
            ProgramFieldValue::LinkedPrograms(update) => update.action(),
        }
    }
}

#[derive(Deserialize)]
struct RawProgramUpdateField {
    field: ProgramField,
    value: ProgramFieldValue,
}

/// One mutation of one program field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgramUpdateField")]
pub struct ProgramUpdateField {
    field: ProgramField,
    value: ProgramFieldValue,
}

impl ProgramUpdateField {
    pub fn new(value: ProgramFieldValue) -> Self {
        Self {
            field: value.field(),
            value,
        }
    }

    pub fn data(update: MapUpdate) -> Self {
        Self::new(ProgramFieldValue::Data(update))
    }

    pub fn metadata(update: MapUpdate) -> Self {
        Self::new(ProgramFieldValue::Metadata(update))
    }

    pub fn linked_programs(update: LinkedProgramsUpdate) -> Self {
        Self::new(ProgramFieldValue::LinkedPrograms(update))
    }

    /// Build from a field name, a JSON-text payload and an action name
    pub fn from_parts(field: &str, value: &str, action: &str) -> Result<Self, LasrError> {
        let program_field: ProgramField = field.parse()?;
        let update_action = UpdateAction::parse(field, action)?;
        if !program_field.supports(update_action) {
            return Err(LasrError::unsupported_action(field, action));
        }

        let payload = parse_payload(value);
        let value = match program_field {
            ProgramField::Data => {
                ProgramFieldValue::Data(MapUpdate::from_payload(field, update_action, payload)?)
            }
            ProgramField::Metadata => {
                ProgramFieldValue::Metadata(MapUpdate::from_payload(field, update_action, payload)?)
            }
            ProgramField::LinkedPrograms => ProgramFieldValue::LinkedPrograms(
                LinkedProgramsUpdate::from_payload(field, update_action, payload)?,
            ),
        };

        Ok(Self::new(value))
    }

    pub fn field(&self) -> ProgramField {
        self.field
    }

    pub fn value(&self) -> &ProgramFieldValue {
        &self.value
    }
}

impl TryFrom<RawProgramUpdateField> for ProgramUpdateField {
    type Error = LasrError;

    fn try_from(raw: RawProgramUpdateField) -> Result<Self, Self::Error> {
        if raw.value.field() != raw.field {
            return Err(LasrError::invalid_value(
                raw.field.as_str(),
                format!("value is tagged '{}'", raw.value.field()),
            ));
        }
        Ok(Self::new(raw.value))
    }
}

/// Payloads that are not JSON are taken as a bare string
fn parse_payload(value: &str) -> Value {
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn object_of(field: &str, payload: Value) -> Result<Map<String, Value>, LasrError> {
    match payload {
        Value::Object(members) => Ok(members),
        other => Err(LasrError::invalid_value(
            field,
            format!("expected a JSON object, got {}", other),
        )),
    }
}

fn string_map(field: &str, payload: Value) -> Result<BTreeMap<String, String>, LasrError> {
    Ok(object_of(field, payload)?
        .into_iter()
        .map(|(key, value)| (key, text_of(value)))
        .collect())
}

fn single_entry(field: &str, payload: Value) -> Result<(String, Value), LasrError> {
    let members = object_of(field, payload)?;
    if members.len() != 1 {
        return Err(LasrError::invalid_value(
            field,
            format!("expected exactly one entry, got {}", members.len()),
        ));
    }
    members
        .into_iter()
        .next()
        .ok_or_else(|| LasrError::invalid_value(field, "expected exactly one entry"))
}

/// Ids are taken literally, never amount-scaled
fn id_of(field: &str, value: &Value) -> Result<U256, LasrError> {
    match value {
        Value::String(text) => text
            .parse()
            .map_err(|e| LasrError::invalid_value(field, format!("bad token id '{}': {}", text, e))),
        Value::Number(number) => number
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| LasrError::invalid_value(field, format!("bad token id {}", number))),
        other => Err(LasrError::invalid_value(field, format!("bad token id {}", other))),
    }
}

fn id_list(field: &str, payload: Value) -> Result<Vec<U256>, LasrError> {
    match payload {
        Value::Array(ids) => ids.iter().map(|id| id_of(field, id)).collect(),
        other => Err(LasrError::invalid_value(
            field,
            format!("expected an array of ids, got {}", other),
        )),
    }
}

fn address_of(field: &str, raw: &str) -> Result<Address, LasrError> {
    Address::new(raw).map_err(|e| LasrError::invalid_value(field, e.to_string()))
}

fn approval_map(field: &str, payload: Value) -> Result<BTreeMap<Address, Vec<U256>>, LasrError> {
    object_of(field, payload)?
        .into_iter()
        .map(|(spender, ids)| Ok((address_of(field, &spender)?, id_list(field, ids)?)))
        .collect()
}

fn program_of(field: &str, value: &Value) -> Result<AddressOrNamespace, LasrError> {
    match value {
        Value::String(raw) => raw
            .parse()
            .map_err(|e: LasrError| LasrError::invalid_value(field, e.to_string())),
        other => Err(LasrError::invalid_value(
            field,
            format!("expected an address or namespace, got {}", other),
        )),
    }
}

fn program_list(field: &str, payload: Value) -> Result<Vec<AddressOrNamespace>, LasrError> {
    match payload {
        Value::Array(programs) => programs.iter().map(|program| program_of(field, program)).collect(),
        other => Err(LasrError::invalid_value(
            field,
            format!("expected an array of programs, got {}", other),
        )),
    }
}
