//! Operations every program answers.
//!
//! `create` registers the program and mints its initial supply to the caller,
//! `update` extends the program's own metadata and data. Both read their
//! arguments from the call's `transactionInputs`.

use anyhow::anyhow;
use lasr_core::consts::THIS;
use lasr_core::{
    check_if_values_are_undefined, format_amount_to_hex, parse_amount_to_big_int,
    validate_and_create_json_string, AddressOrNamespace, AmountInput, ComputeInputs, LasrError,
};
use lasr_instructions::{
    build_create_instruction, build_program_metadata_update_instruction,
    build_program_update_field, build_token_distribution_instruction, build_token_update_field,
    CreateInstructionArgs, Outputs, ProgramUpdate, TokenDistributionArgs, UpdateInstructionBuilder,
};
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::program::ProgramError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInputs {
    name: Option<String>,
    symbol: Option<String>,
    total_supply: Option<Value>,
    initialized_supply: Option<Value>,
    /// Recipient of the initial supply, defaults to the transaction recipient
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateInputs {
    metadata: Option<Value>,
    data: Option<Value>,
}

fn hex_supply(name: &str, value: &Value) -> Result<(String, AmountInput), LasrError> {
    let input = AmountInput::try_from(value)
        .map_err(|e| LasrError::invalid_value(name, e.to_string()))?;
    Ok((format_amount_to_hex(input.clone())?, input))
}

/// Register the calling program and mint `initializedSupply` to the recipient
pub fn create(inputs: &ComputeInputs) -> Result<Outputs, ProgramError> {
    let transaction = &inputs.transaction;
    let args: CreateInputs = transaction.parse_inputs()?;

    check_if_values_are_undefined(&json!({
        "name": &args.name,
        "symbol": &args.symbol,
        "totalSupply": &args.total_supply,
        "initializedSupply": &args.initialized_supply,
    }))?;
    let (Some(name), Some(symbol), Some(total_supply), Some(initialized_supply)) = (
        args.name,
        args.symbol,
        args.total_supply,
        args.initialized_supply,
    ) else {
        return Err(LasrError::missing("name, symbol, totalSupply, initializedSupply").into());
    };

    let (total_supply, total) = hex_supply("totalSupply", &total_supply)?;
    let (initialized_supply, initialized) = hex_supply("initializedSupply", &initialized_supply)?;

    if parse_amount_to_big_int(initialized)? > parse_amount_to_big_int(total)? {
        return Err(anyhow!(
            "initializedSupply {} exceeds totalSupply {}",
            initialized_supply,
            total_supply
        )
        .into());
    }

    let metadata = json!({
        "symbol": symbol,
        "name": name,
        "totalSupply": total_supply,
    });
    let token_metadata =
        build_token_update_field("metadata", &validate_and_create_json_string(&metadata)?, "extend")?;

    let to = args.to.unwrap_or_else(|| transaction.to.to_string());
    let distribution = build_token_distribution_instruction(TokenDistributionArgs {
        program_id: Some(THIS.to_string()),
        to: Some(to),
        initialized_supply: Some(AmountInput::Text(initialized_supply.clone())),
        token_updates: vec![token_metadata],
        non_fungible: false,
    })?;

    let create = build_create_instruction(CreateInstructionArgs {
        from: Some(transaction.from.to_string()),
        program_id: Some(THIS.to_string()),
        program_owner: Some(transaction.from.to_string()),
        program_namespace: Some(THIS.to_string()),
        total_supply: Some(total_supply),
        initialized_supply: Some(initialized_supply),
        distribution: Some(vec![distribution]),
    })?;
    let program_metadata = build_program_metadata_update_instruction(AddressOrNamespace::This, &metadata)?;

    debug!("create: registered {} ({})", name, symbol);
    Ok(Outputs::new(inputs.clone(), vec![create, program_metadata]))
}

/// Extend the calling program's metadata and/or data
pub fn update(inputs: &ComputeInputs) -> Result<Outputs, ProgramError> {
    let args: UpdateInputs = inputs.transaction.parse_inputs()?;

    let mut fields = Vec::new();
    if let Some(metadata) = &args.metadata {
        let payload = validate_and_create_json_string(metadata)?;
        fields.push(build_program_update_field("metadata", &payload, "extend")?);
    }
    if let Some(data) = &args.data {
        let payload = validate_and_create_json_string(data)?;
        fields.push(build_program_update_field("data", &payload, "extend")?);
    }
    if fields.is_empty() {
        return Err(LasrError::missing("metadata or data").into());
    }

    let instruction = UpdateInstructionBuilder::new()
        .add_update(ProgramUpdate::new(AddressOrNamespace::This, fields))
        .build()?;

    Ok(Outputs::new(inputs.clone(), vec![instruction]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALLER: &str = "0x100444c7d04a842d19bc3ee63cb7b96682ff3f43";

    fn inputs(op: &str, transaction_inputs: Value) -> ComputeInputs {
        let raw = json!({
            "transaction": {
                "from": CALLER,
                "to": CALLER,
                "programId": "0xa9a5b3e7e0b9b3c0bd6a1b1c0f7f0f8e2a9f7e11",
                "op": op,
                "transactionInputs": transaction_inputs.to_string()
            },
            "op": op,
            "version": 1
        });
        ComputeInputs::from_json(&raw.to_string()).unwrap()
    }

    #[test]
    fn test_create() {
        let call = inputs(
            "create",
            json!({ "name": "Demo", "symbol": "DMO", "totalSupply": "1000", "initializedSupply": 100 }),
        );
        let outputs = create(&call).unwrap();
        assert_eq!(outputs.instructions().len(), 2);

        let json = outputs.to_json().unwrap();
        let create = &json["instructions"][0]["create"];
        assert_eq!(create["programId"], json!("this"));
        assert_eq!(create["programOwner"], json!(CALLER));
        assert_eq!(create["totalSupply"], json!(format_amount_to_hex("1000").unwrap()));

        let dist = &create["distribution"][0];
        assert_eq!(dist["to"], json!(CALLER));
        assert_eq!(dist["amount"], json!(format_amount_to_hex("100").unwrap()));
        assert_eq!(dist["updateFields"][0]["field"], json!("metadata"));

        assert!(json["instructions"][1]["update"].is_object());
    }

    #[test]
    fn test_create_reports_missing_inputs() {
        let call = inputs("create", json!({ "symbol": "DMO", "initializedSupply": "1" }));
        let err = create(&call).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following properties are undefined: name, totalSupply"
        );
    }

    #[test]
    fn test_create_rejects_oversupply() {
        let call = inputs(
            "create",
            json!({ "name": "Demo", "symbol": "DMO", "totalSupply": "1", "initializedSupply": "2" }),
        );
        assert!(matches!(create(&call), Err(ProgramError::Context(_))));
    }

    #[test]
    fn test_create_rejects_lossy_supply_number() {
        let raw = r#"{"name":"Demo","symbol":"DMO","totalSupply":18446744073709551617,"initializedSupply":"1"}"#;
        let transaction_inputs: Value = serde_json::from_str(raw).unwrap();
        let err = create(&inputs("create", transaction_inputs)).unwrap_err();
        assert!(matches!(
            err,
            ProgramError::Sdk(LasrError::InvalidValue { field, .. }) if field == "totalSupply"
        ));
    }

    #[test]
    fn test_update_keeps_metadata_then_data() {
        let call = inputs(
            "update",
            json!({ "metadata": { "name": "Demo" }, "data": { "imgUrl": "https://x" } }),
        );
        let json = update(&call).unwrap().to_json().unwrap();
        let fields = &json["instructions"][0]["update"]["updates"][0]["programUpdate"]["updates"];
        assert_eq!(fields[0]["field"], json!("metadata"));
        assert_eq!(fields[1]["field"], json!("data"));
    }

    #[test]
    fn test_update_needs_something() {
        let err = update(&inputs("update", json!({}))).unwrap_err();
        assert!(matches!(err, ProgramError::Sdk(LasrError::MissingRequiredField(_))));

        let err = update(&inputs("update", json!({ "metadata": "flat" }))).unwrap_err();
        assert!(matches!(err, ProgramError::Sdk(LasrError::InvalidValue { .. })));
    }
}
