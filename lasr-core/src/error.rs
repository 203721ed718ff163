use thiserror::Error;

/// Represents all possible errors raised while building LASR instructions
#[derive(Error, Debug)]
pub enum LasrError {
    /// Numeric input that cannot be represented as an on-chain amount
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// String that is not `0x` followed by 40 hex characters
    #[error("Invalid address: '{0}'")]
    InvalidAddress(String),

    /// Operation not valid for the target field
    #[error("Unsupported action '{action}' for field '{field}'")]
    UnsupportedAction { field: String, action: String },

    /// Field name that no entity defines
    #[error("Unknown field: '{0}'")]
    UnknownField(String),

    /// Payload does not have the shape the (field, action) pair requires
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// A builder's required inputs are absent
    #[error("The following properties are undefined: {}", .0.join(", "))]
    MissingRequiredField(Vec<String>),

    /// The top-level call payload is not valid JSON or lacks the transaction envelope
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors that don't fit in other categories
    #[error("Other error: {0}")]
    Other(String),
}

impl LasrError {
    pub fn invalid_amount(input: impl Into<String>, reason: impl Into<String>) -> Self {
        LasrError::InvalidAmount {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_action(field: impl Into<String>, action: impl Into<String>) -> Self {
        LasrError::UnsupportedAction {
            field: field.into(),
            action: action.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        LasrError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Missing-field error for a single input name
    pub fn missing(name: impl Into<String>) -> Self {
        LasrError::MissingRequiredField(vec![name.into()])
    }
}

impl From<String> for LasrError {
    fn from(err: String) -> Self {
        LasrError::Other(err)
    }
}

impl From<&str> for LasrError {
    fn from(err: &str) -> Self {
        LasrError::Other(err.to_string())
    }
}
