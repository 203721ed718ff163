//! Validating constructors for instructions.
//!
//! Builders take the loosely typed values a program pulls out of a call
//! (strings, numbers, JSON text), check every required input, and either
//! return a finished [`Instruction`] or fail without building anything.
//! When several required inputs are absent they are reported together in one
//! `MissingRequiredField`.

use lasr_core::consts::{MAX_DISTRIBUTION_IDS, THIS};
use lasr_core::{
    parse_amount_to_big_int, validate, validate_and_create_json_string, Address,
    AddressOrNamespace, AmountInput, LasrError, U256,
};
use log::{debug, warn};
use serde_json::Value;

use crate::fields::{ProgramUpdateField, TokenUpdateField};
use crate::instruction::{
    BurnInstruction, CreateInstruction, Instruction, TokenDistribution, TransferInstruction,
    UpdateInstruction,
};
use crate::updates::{ProgramUpdate, TokenOrProgramUpdate, TokenUpdate};

/// Inputs for [`build_create_instruction`]
#[derive(Debug, Clone, Default)]
pub struct CreateInstructionArgs {
    /// Caller creating the program
    pub from: Option<String>,
    /// Address or namespace of the program being created
    pub program_id: Option<String>,
    pub program_owner: Option<String>,
    pub program_namespace: Option<String>,
    /// Carried as given; must parse as an amount
    pub total_supply: Option<String>,
    /// Carried as given; must parse as an amount
    pub initialized_supply: Option<String>,
    pub distribution: Option<Vec<TokenDistribution>>,
}

/// Inputs for [`build_token_distribution_instruction`]
#[derive(Debug, Clone, Default)]
pub struct TokenDistributionArgs {
    pub program_id: Option<String>,
    /// Recipient of the initial supply
    pub to: Option<String>,
    /// Divisible amount, or the number of ids when `non_fungible` is set
    pub initialized_supply: Option<AmountInput>,
    /// Applied to the recipient's token, in order
    pub token_updates: Vec<TokenUpdateField>,
    pub non_fungible: bool,
}

/// Inputs for [`build_transfer_instruction`]
#[derive(Debug, Clone, Default)]
pub struct TransferInstructionArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Program whose token moves
    pub token_address: Option<String>,
    pub amount: Option<AmountInput>,
    /// Literal ids, `0x` hex or decimal
    pub token_ids: Option<Vec<String>>,
}

/// Inputs for [`build_burn_instruction`]
#[derive(Debug, Clone, Default)]
pub struct BurnInstructionArgs {
    pub caller: Option<String>,
    pub program_id: Option<String>,
    pub token_address: Option<String>,
    pub from: Option<String>,
    pub amount: Option<AmountInput>,
    pub token_ids: Option<Vec<String>>,
}

/// Inputs for [`build_mint_instructions`]
#[derive(Debug, Clone, Default)]
pub struct MintInstructionArgs {
    /// Caller paying for and receiving the mint
    pub from: Option<String>,
    /// Program whose token is minted
    pub program_id: Option<String>,
    pub payment_token_address: Option<String>,
    /// Amount of the payment token sent to the program
    pub input_value: Option<AmountInput>,
    /// Amount of the minted token sent back
    pub returned_value: Option<AmountInput>,
    /// Ids of the minted token sent back
    pub returned_token_ids: Option<Vec<String>>,
}

/// Fail listing every required input that is absent
fn require(inputs: &[(&str, bool)]) -> Result<(), LasrError> {
    let missing: Vec<String> = inputs
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LasrError::MissingRequiredField(missing))
    }
}

fn address_or_namespace(raw: &str) -> Result<AddressOrNamespace, LasrError> {
    raw.parse()
}

fn token_ids(raw: Option<Vec<String>>) -> Result<Vec<U256>, LasrError> {
    raw.unwrap_or_default()
        .iter()
        .map(|id| {
            id.parse::<U256>()
                .map_err(|e| LasrError::invalid_value("tokenIds", format!("'{}': {}", id, e)))
        })
        .collect()
}

/// Resolve the amount / ids pair shared by transfers and burns
fn amount_and_ids(
    kind: &str,
    amount: Option<AmountInput>,
    ids: Option<Vec<String>>,
) -> Result<(Option<U256>, Vec<U256>), LasrError> {
    let ids = token_ids(ids)?;
    let amount = amount.map(parse_amount_to_big_int).transpose()?;

    match (&amount, ids.is_empty()) {
        (None, true) => Err(LasrError::missing("amount or tokenIds")),
        (Some(_), false) => {
            warn!(
                "{} carries both an amount and {} token ids; passing both to the runtime",
                kind,
                ids.len()
            );
            Ok((amount, ids))
        }
        _ => Ok((amount, ids)),
    }
}

/// Number of ids a non-fungible distribution creates
fn id_count(supply: AmountInput) -> Result<u64, LasrError> {
    let count = match &supply {
        AmountInput::Integer(n) => Some(*n),
        AmountInput::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
            Some(*f as u64)
        }
        AmountInput::Float(_) => None,
        AmountInput::Text(text) => text.trim().parse::<U256>().ok().and_then(|n| n.to_u64()),
        AmountInput::Raw(n) => n.to_u64(),
    };

    let count = count.ok_or_else(|| {
        LasrError::invalid_value("initializedSupply", format!("{:?} is not a whole id count", supply))
    })?;
    if count > MAX_DISTRIBUTION_IDS {
        return Err(LasrError::invalid_value(
            "initializedSupply",
            format!("{} ids exceeds the limit of {}", count, MAX_DISTRIBUTION_IDS),
        ));
    }
    Ok(count)
}

/// Build a create instruction registering a program and its initial supply
pub fn build_create_instruction(args: CreateInstructionArgs) -> Result<Instruction, LasrError> {
    require(&[
        ("from", args.from.is_some()),
        ("programId", args.program_id.is_some()),
        ("programOwner", args.program_owner.is_some()),
        ("programNamespace", args.program_namespace.is_some()),
        ("totalSupply", args.total_supply.is_some()),
        ("initializedSupply", args.initialized_supply.is_some()),
        ("distribution", args.distribution.is_some()),
    ])?;

    let from = Address::new(validate(args.from, "from")?)?;
    let program_id = address_or_namespace(&validate(args.program_id, "programId")?)?;
    let program_owner = Address::new(validate(args.program_owner, "programOwner")?)?;
    let program_namespace =
        address_or_namespace(&validate(args.program_namespace, "programNamespace")?)?;
    let total_supply = validate(args.total_supply, "totalSupply")?;
    let initialized_supply = validate(args.initialized_supply, "initializedSupply")?;
    let distribution = validate(args.distribution, "distribution")?;

    parse_amount_to_big_int(total_supply.as_str())?;
    parse_amount_to_big_int(initialized_supply.as_str())?;

    debug!(
        "Building create for program {} from {} with {} distributions",
        program_id,
        from,
        distribution.len()
    );

    Ok(CreateInstruction::new(
        program_namespace,
        program_id,
        program_owner,
        total_supply,
        initialized_supply,
        distribution,
    )
    .into())
}

/// Build the initial allocation carried by a create instruction.
///
/// Fungible supply is scaled like any amount. Non-fungible supply is a plain
/// count `n` and produces the ids `0..n` with no amount.
pub fn build_token_distribution_instruction(
    args: TokenDistributionArgs,
) -> Result<TokenDistribution, LasrError> {
    require(&[
        ("programId", args.program_id.is_some()),
        ("to", args.to.is_some()),
        ("initializedSupply", args.initialized_supply.is_some()),
    ])?;

    let program_id = address_or_namespace(&validate(args.program_id, "programId")?)?;
    let to = address_or_namespace(&validate(args.to, "to")?)?;
    let supply = validate(args.initialized_supply, "initializedSupply")?;

    let (amount, ids) = if args.non_fungible {
        let count = id_count(supply)?;
        (None, (0..count).map(U256::from).collect())
    } else {
        (Some(parse_amount_to_big_int(supply)?), Vec::new())
    };

    debug!(
        "Building distribution of {} to {} ({} ids, {} updates)",
        program_id,
        to,
        ids.len(),
        args.token_updates.len()
    );

    Ok(TokenDistribution::new(
        program_id,
        to,
        amount,
        ids,
        args.token_updates,
    ))
}

/// Build an update instruction; updates are applied in the order given
pub fn build_update_instruction(
    updates: Vec<TokenOrProgramUpdate>,
) -> Result<Instruction, LasrError> {
    if updates.is_empty() {
        return Err(LasrError::missing("updates"));
    }
    debug!("Building update with {} updates", updates.len());
    Ok(UpdateInstruction::new(updates).into())
}

/// Build a transfer of an amount and/or ids of one token
pub fn build_transfer_instruction(args: TransferInstructionArgs) -> Result<Instruction, LasrError> {
    require(&[
        ("from", args.from.is_some()),
        ("to", args.to.is_some()),
        ("tokenAddress", args.token_address.is_some()),
    ])?;

    let from = address_or_namespace(&validate(args.from, "from")?)?;
    let to = address_or_namespace(&validate(args.to, "to")?)?;
    let token = Address::new(validate(args.token_address, "tokenAddress")?)?;
    let (amount, ids) = amount_and_ids("transfer", args.amount, args.token_ids)?;

    debug!("Building transfer of {} from {} to {}", token, from, to);
    Ok(TransferInstruction::new(token, from, to, amount, ids).into())
}

/// Build a burn of an amount and/or ids of one token
pub fn build_burn_instruction(args: BurnInstructionArgs) -> Result<Instruction, LasrError> {
    require(&[
        ("caller", args.caller.is_some()),
        ("programId", args.program_id.is_some()),
        ("tokenAddress", args.token_address.is_some()),
        ("from", args.from.is_some()),
    ])?;

    let caller = Address::new(validate(args.caller, "caller")?)?;
    let program_id = address_or_namespace(&validate(args.program_id, "programId")?)?;
    let token = Address::new(validate(args.token_address, "tokenAddress")?)?;
    let from = address_or_namespace(&validate(args.from, "from")?)?;
    let (amount, ids) = amount_and_ids("burn", args.amount, args.token_ids)?;

    debug!("Building burn of {} from {} by {}", token, from, caller);
    Ok(BurnInstruction::new(caller, program_id, token, from, amount, ids).into())
}

/// Build the two transfers that make up a mint.
///
/// The first moves the payment from the caller to the program, the second
/// moves the minted token from the program back to the caller.
pub fn build_mint_instructions(args: MintInstructionArgs) -> Result<Vec<Instruction>, LasrError> {
    require(&[
        ("from", args.from.is_some()),
        ("programId", args.program_id.is_some()),
        ("paymentTokenAddress", args.payment_token_address.is_some()),
        ("inputValue", args.input_value.is_some()),
        (
            "returnedValue or returnedTokenIds",
            args.returned_value.is_some()
                || args.returned_token_ids.as_ref().is_some_and(|ids| !ids.is_empty()),
        ),
    ])?;

    let from = validate(args.from, "from")?;
    let payment = build_transfer_instruction(TransferInstructionArgs {
        from: Some(from.clone()),
        to: Some(THIS.to_string()),
        token_address: args.payment_token_address,
        amount: args.input_value,
        token_ids: None,
    })?;
    let minted = build_transfer_instruction(TransferInstructionArgs {
        from: Some(THIS.to_string()),
        to: Some(from),
        token_address: args.program_id,
        amount: args.returned_value,
        token_ids: args.returned_token_ids,
    })?;

    Ok(vec![payment, minted])
}

/// Build one token field mutation from its field name, JSON-text payload and
/// action name
pub fn build_token_update_field(
    field: &str,
    value: &str,
    action: &str,
) -> Result<TokenUpdateField, LasrError> {
    TokenUpdateField::from_parts(field, value, action)
}

/// Build one program field mutation from its field name, JSON-text payload
/// and action name
pub fn build_program_update_field(
    field: &str,
    value: &str,
    action: &str,
) -> Result<ProgramUpdateField, LasrError> {
    ProgramUpdateField::from_parts(field, value, action)
}

fn program_map_extend(
    account: AddressOrNamespace,
    field: &str,
    entries: &Value,
) -> Result<Instruction, LasrError> {
    let payload = validate_and_create_json_string(entries)?;
    let update = ProgramUpdate::new(
        account,
        vec![build_program_update_field(field, &payload, "extend")?],
    );
    build_update_instruction(vec![update.into()])
}

/// Extend a program's metadata with the members of a JSON object
pub fn build_program_metadata_update_instruction(
    account: AddressOrNamespace,
    metadata: &Value,
) -> Result<Instruction, LasrError> {
    program_map_extend(account, "metadata", metadata)
}

/// Extend a program's data with the members of a JSON object
pub fn build_program_data_update_instruction(
    account: AddressOrNamespace,
    data: &Value,
) -> Result<Instruction, LasrError> {
    program_map_extend(account, "data", data)
}

/// Extend the metadata of `account`'s `token` with the members of a JSON object
pub fn build_token_metadata_update_instruction(
    account: AddressOrNamespace,
    token: AddressOrNamespace,
    metadata: &Value,
) -> Result<Instruction, LasrError> {
    let payload = validate_and_create_json_string(metadata)?;
    let update = TokenUpdate::new(
        account,
        token,
        vec![build_token_update_field("metadata", &payload, "extend")?],
    );
    build_update_instruction(vec![update.into()])
}

/// Accumulates token and program updates into one update instruction
#[derive(Debug, Clone, Default)]
pub struct UpdateInstructionBuilder {
    updates: Vec<TokenOrProgramUpdate>,
}

impl UpdateInstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_update(mut self, update: impl Into<TokenOrProgramUpdate>) -> Self {
        self.updates.push(update.into());
        self
    }

    pub fn add_updates<I>(mut self, updates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TokenOrProgramUpdate>,
    {
        self.updates.extend(updates.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn build(self) -> Result<Instruction, LasrError> {
        build_update_instruction(self.updates)
    }
}
