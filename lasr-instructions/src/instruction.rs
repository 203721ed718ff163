use lasr_core::u256::hex_amount;
use lasr_core::{Address, AddressOrNamespace, U256};
use serde::{Deserialize, Serialize};

use crate::fields::TokenUpdateField;
use crate::updates::TokenOrProgramUpdate;

/// A state mutation a program asks the runtime to apply.
///
/// Serializes externally tagged: `{"create": {...}}`, `{"transfer": {...}}`.
/// Instructions are built through the `build_*` functions, which validate
/// their inputs, and are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Instruction {
    Create(CreateInstruction),
    Update(UpdateInstruction),
    Transfer(TransferInstruction),
    Burn(BurnInstruction),
    Log(LogInstruction),
}

impl Instruction {
    /// Wire tag of this instruction
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Create(_) => "create",
            Instruction::Update(_) => "update",
            Instruction::Transfer(_) => "transfer",
            Instruction::Burn(_) => "burn",
            Instruction::Log(_) => "log",
        }
    }
}

/// Registers a program and mints its initial supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstruction {
    program_namespace: AddressOrNamespace,
    program_id: AddressOrNamespace,
    program_owner: Address,
    total_supply: String,
    initialized_supply: String,
    distribution: Vec<TokenDistribution>,
}

impl CreateInstruction {
    pub(crate) fn new(
        program_namespace: AddressOrNamespace,
        program_id: AddressOrNamespace,
        program_owner: Address,
        total_supply: String,
        initialized_supply: String,
        distribution: Vec<TokenDistribution>,
    ) -> Self {
        Self {
            program_namespace,
            program_id,
            program_owner,
            total_supply,
            initialized_supply,
            distribution,
        }
    }

    pub fn program_namespace(&self) -> &AddressOrNamespace {
        &self.program_namespace
    }

    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn program_owner(&self) -> &Address {
        &self.program_owner
    }

    pub fn total_supply(&self) -> &str {
        &self.total_supply
    }

    pub fn initialized_supply(&self) -> &str {
        &self.initialized_supply
    }

    pub fn distribution(&self) -> &[TokenDistribution] {
        &self.distribution
    }
}

/// Initial allocation of a token, applied as part of a create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDistribution {
    program_id: AddressOrNamespace,
    to: AddressOrNamespace,
    /// Fungible supply; `None` for non-fungible distributions
    #[serde(with = "hex_amount", default)]
    amount: Option<U256>,
    /// Non-fungible ids; empty for fungible distributions
    token_ids: Vec<U256>,
    update_fields: Vec<TokenUpdateField>,
}

impl TokenDistribution {
    pub(crate) fn new(
        program_id: AddressOrNamespace,
        to: AddressOrNamespace,
        amount: Option<U256>,
        token_ids: Vec<U256>,
        update_fields: Vec<TokenUpdateField>,
    ) -> Self {
        Self {
            program_id,
            to,
            amount,
            token_ids,
            update_fields,
        }
    }

    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn to(&self) -> &AddressOrNamespace {
        &self.to
    }

    pub fn amount(&self) -> Option<U256> {
        self.amount
    }

    pub fn token_ids(&self) -> &[U256] {
        &self.token_ids
    }

    pub fn update_fields(&self) -> &[TokenUpdateField] {
        &self.update_fields
    }

    pub fn is_non_fungible(&self) -> bool {
        self.amount.is_none()
    }
}

/// Applies token and program updates, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInstruction {
    updates: Vec<TokenOrProgramUpdate>,
}

impl UpdateInstruction {
    pub(crate) fn new(updates: Vec<TokenOrProgramUpdate>) -> Self {
        Self { updates }
    }

    pub fn updates(&self) -> &[TokenOrProgramUpdate] {
        &self.updates
    }
}

/// Moves a balance and/or ids of `token` between accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstruction {
    token: Address,
    from: AddressOrNamespace,
    to: AddressOrNamespace,
    #[serde(with = "hex_amount", default)]
    amount: Option<U256>,
    ids: Vec<U256>,
}

impl TransferInstruction {
    pub(crate) fn new(
        token: Address,
        from: AddressOrNamespace,
        to: AddressOrNamespace,
        amount: Option<U256>,
        ids: Vec<U256>,
    ) -> Self {
        Self {
            token,
            from,
            to,
            amount,
            ids,
        }
    }

    pub fn token(&self) -> &Address {
        &self.token
    }

    pub fn from(&self) -> &AddressOrNamespace {
        &self.from
    }

    pub fn to(&self) -> &AddressOrNamespace {
        &self.to
    }

    pub fn amount(&self) -> Option<U256> {
        self.amount
    }

    pub fn ids(&self) -> &[U256] {
        &self.ids
    }
}

/// Destroys a balance and/or ids of `token` held by `from`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnInstruction {
    caller: Address,
    program_id: AddressOrNamespace,
    token: Address,
    from: AddressOrNamespace,
    #[serde(with = "hex_amount", default)]
    amount: Option<U256>,
    ids: Vec<U256>,
}

impl BurnInstruction {
    pub(crate) fn new(
        caller: Address,
        program_id: AddressOrNamespace,
        token: Address,
        from: AddressOrNamespace,
        amount: Option<U256>,
        ids: Vec<U256>,
    ) -> Self {
        Self {
            caller,
            program_id,
            token,
            from,
            amount,
            ids,
        }
    }

    pub fn caller(&self) -> &Address {
        &self.caller
    }

    pub fn program_id(&self) -> &AddressOrNamespace {
        &self.program_id
    }

    pub fn token(&self) -> &Address {
        &self.token
    }

    pub fn from(&self) -> &AddressOrNamespace {
        &self.from
    }

    pub fn amount(&self) -> Option<U256> {
        self.amount
    }

    pub fn ids(&self) -> &[U256] {
        &self.ids
    }
}

/// Carries nothing; serializes as `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInstruction {}

impl From<CreateInstruction> for Instruction {
    fn from(instruction: CreateInstruction) -> Self {
        Instruction::Create(instruction)
    }
}

impl From<UpdateInstruction> for Instruction {
    fn from(instruction: UpdateInstruction) -> Self {
        Instruction::Update(instruction)
    }
}

impl From<TransferInstruction> for Instruction {
    fn from(instruction: TransferInstruction) -> Self {
        Instruction::Transfer(instruction)
    }
}

impl From<BurnInstruction> for Instruction {
    fn from(instruction: BurnInstruction) -> Self {
        Instruction::Burn(instruction)
    }
}

impl From<LogInstruction> for Instruction {
    fn from(instruction: LogInstruction) -> Self {
        Instruction::Log(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "0xa9a5b3e7e0b9b3c0bd6a1b1c0f7f0f8e2a9f7e11";
    const CALLER: &str = "0x100444c7d04a842d19bc3ee63cb7b96682ff3f43";

    fn address(raw: &str) -> Address {
        Address::new(raw).unwrap()
    }

    #[test]
    fn test_log_is_empty_object() {
        let json = serde_json::to_value(Instruction::from(LogInstruction::default())).unwrap();
        assert_eq!(json, json!({ "log": {} }));
    }

    #[test]
    fn test_transfer_wire_keys_in_order() {
        let transfer = TransferInstruction::new(
            address(TOKEN),
            AddressOrNamespace::This,
            AddressOrNamespace::from(address(CALLER)),
            Some(U256::from(1u64)),
            vec![],
        );
        let text = serde_json::to_string(&Instruction::from(transfer)).unwrap();
        let expected = format!(
            r#"{{"transfer":{{"token":"{}","from":"this","to":"{}","amount":"0x{:0>64}","ids":[]}}}}"#,
            TOKEN, CALLER, "1"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_burn_ids_are_limbs_and_amount_null() {
        let burn = BurnInstruction::new(
            address(CALLER),
            AddressOrNamespace::This,
            address(TOKEN),
            AddressOrNamespace::from(address(CALLER)),
            None,
            vec![U256::from(3u64)],
        );
        let json = serde_json::to_value(Instruction::from(burn.clone())).unwrap();
        assert_eq!(json["burn"]["amount"], json!(null));
        assert_eq!(json["burn"]["ids"], json!([[3, 0, 0, 0]]));
        assert_eq!(json["burn"]["programId"], json!("this"));

        let back: Instruction = serde_json::from_value(json).unwrap();
        assert_eq!(back, Instruction::Burn(burn));
    }

    #[test]
    fn test_kind_matches_tag() {
        let instruction = Instruction::from(UpdateInstruction::new(vec![]));
        assert_eq!(instruction.kind(), "update");
        let json = serde_json::to_value(&instruction).unwrap();
        assert!(json.get(instruction.kind()).is_some());
    }
}
