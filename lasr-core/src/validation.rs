//! Input checks shared by builders and programs.

use serde_json::Value;

use crate::error::LasrError;

/// Names of the members of `inputs` that are `null`.
///
/// Anything other than a JSON object has no named members and yields nothing.
pub fn get_undefined_properties(inputs: &Value) -> Vec<String> {
    match inputs {
        Value::Object(members) => members
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(name, _)| name.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// Fail with every `null` member of `inputs` listed at once
pub fn check_if_values_are_undefined(inputs: &Value) -> Result<(), LasrError> {
    let missing = get_undefined_properties(inputs);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LasrError::MissingRequiredField(missing))
    }
}

/// Unwrap a required input or fail naming it
pub fn validate<T>(value: Option<T>, name: &str) -> Result<T, LasrError> {
    value.ok_or_else(|| LasrError::missing(name))
}

/// Render `inputs` as JSON object text, refusing `null` members.
///
/// Used to build the payloads handed to the string update-field builders.
pub fn validate_and_create_json_string(inputs: &Value) -> Result<String, LasrError> {
    if !inputs.is_object() {
        return Err(LasrError::invalid_value("inputs", "expected a JSON object"));
    }
    check_if_values_are_undefined(inputs)?;
    Ok(serde_json::to_string(inputs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_undefined_properties_keeps_order() {
        let inputs = json!({ "from": null, "to": "0x1", "programId": null });
        assert_eq!(get_undefined_properties(&inputs), vec!["from", "programId"]);
        assert!(get_undefined_properties(&json!([null])).is_empty());
    }

    #[test]
    fn test_check_reports_every_name() {
        let inputs = json!({ "name": null, "symbol": null });
        let err = check_if_values_are_undefined(&inputs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following properties are undefined: name, symbol"
        );
        assert!(check_if_values_are_undefined(&json!({ "name": "x" })).is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(Some(3), "count").unwrap(), 3);
        assert!(matches!(
            validate::<u8>(None, "count"),
            Err(LasrError::MissingRequiredField(names)) if names == vec!["count".to_string()]
        ));
    }

    #[test]
    fn test_validate_and_create_json_string() {
        let text = validate_and_create_json_string(&json!({ "symbol": "DMO", "name": "Demo" })).unwrap();
        assert_eq!(text, r#"{"symbol":"DMO","name":"Demo"}"#);

        assert!(validate_and_create_json_string(&json!({ "symbol": null })).is_err());
        assert!(validate_and_create_json_string(&json!("symbol")).is_err());
    }
}
