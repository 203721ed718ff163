pub mod address;
pub mod amount;
pub mod consts;
pub mod error;
pub mod inputs;
pub mod objects;
pub mod u256;
pub mod validation;

// Re-export the main types for convenience
pub use address::{Address, AddressOrNamespace};
pub use amount::{
    format_amount_to_hex, format_big_int_to_hex, format_hex_to_amount, parse_amount_to_big_int,
    AmountInput,
};
pub use error::LasrError;
pub use inputs::{ComputeInputs, Transaction};
pub use objects::{Account, AccountType, ArbitraryData, Metadata, Status, Token};
pub use u256::U256;
pub use validation::{
    check_if_values_are_undefined, get_undefined_properties, validate,
    validate_and_create_json_string,
};
