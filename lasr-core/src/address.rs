use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::consts::{ADDRESS_LENGTH, ETH_PROGRAM_ADDRESS, THIS, ZERO, ZERO_VALUE};
use crate::error::LasrError;

// Address identifies a ledger account or program.
// It is a 20 byte value written as `0x` followed by 40 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    raw: String,
    bytes: [u8; ADDRESS_LENGTH],
}

impl Address {
    /// Validate and wrap an address string.
    ///
    /// The string is kept exactly as given, so serializing returns the input
    /// unchanged (including letter case).
    pub fn new(raw: impl Into<String>) -> Result<Self, LasrError> {
        let raw = raw.into();
        let digits = match raw.strip_prefix("0x") {
            Some(digits) if digits.len() == ADDRESS_LENGTH * 2 => digits,
            _ => return Err(LasrError::InvalidAddress(raw)),
        };

        let mut bytes = [0u8; ADDRESS_LENGTH];
        if hex::decode_to_slice(digits, &mut bytes).is_err() {
            return Err(LasrError::InvalidAddress(raw));
        }

        Ok(Self { raw, bytes })
    }

    /// The canonical null address
    pub fn zero() -> Self {
        Self {
            raw: ETH_PROGRAM_ADDRESS.to_string(),
            bytes: [0; ADDRESS_LENGTH],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get a reference to the decoded bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.bytes
    }

    pub fn is_zero(&self) -> bool {
        self.bytes == [0; ADDRESS_LENGTH]
    }

    /// Compare the underlying bytes, ignoring how the hex was cased
    pub fn same_account(&self, other: &Address) -> bool {
        self.bytes == other.bytes
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Address {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = LasrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::new(value)
    }
}

impl TryFrom<&str> for Address {
    type Error = LasrError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Address::new(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.raw
    }
}

/// A concrete address or one of the namespaces the runtime resolves.
///
/// Serializes as a bare string: the address itself, `"this"` or `"zero"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AddressOrNamespace {
    /// A concrete account or program address
    Address(Address),
    /// The calling program's own address
    This,
    /// The canonical null/burn address
    Zero,
}

impl AddressOrNamespace {
    /// Get the address if this is not a namespace
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            AddressOrNamespace::Address(address) => Some(address),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        !matches!(self, AddressOrNamespace::Address(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AddressOrNamespace::Address(address) => address.as_str(),
            AddressOrNamespace::This => THIS,
            AddressOrNamespace::Zero => ZERO,
        }
    }
}

impl fmt::Display for AddressOrNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Address> for AddressOrNamespace {
    fn from(address: Address) -> Self {
        AddressOrNamespace::Address(address)
    }
}

impl FromStr for AddressOrNamespace {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            THIS => Ok(AddressOrNamespace::This),
            ZERO | ZERO_VALUE => Ok(AddressOrNamespace::Zero),
            _ => Address::new(s).map(AddressOrNamespace::Address),
        }
    }
}

impl TryFrom<String> for AddressOrNamespace {
    type Error = LasrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AddressOrNamespace> for String {
    fn from(value: AddressOrNamespace) -> Self {
        match value {
            AddressOrNamespace::Address(address) => address.into(),
            namespace => namespace.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "0x100444c7D04A842D19bc3eE63cB7b96682FF3f43";

    #[test]
    fn test_address_round_trip_is_identity() {
        let address = Address::new(SAMPLE).unwrap();
        assert_eq!(address.as_str(), SAMPLE);
        assert_eq!(address.to_string(), SAMPLE);

        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_address_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "100444c7D04A842D19bc3eE63cB7b96682FF3f43",
            "0x100444c7D04A842D19bc3eE63cB7b96682FF3f4",
            "0x100444c7D04A842D19bc3eE63cB7b96682FF3f433",
            "0x100444c7D04A842D19bc3eE63cB7b96682FF3fZZ",
        ] {
            assert!(matches!(Address::new(bad), Err(LasrError::InvalidAddress(_))), "{}", bad);
        }
        assert!(serde_json::from_str::<Address>("\"0x12\"").is_err());
    }

    #[test]
    fn test_address_bytes() {
        let address = Address::new(SAMPLE).unwrap();
        assert_eq!(address.as_bytes()[0], 0x10);
        assert_eq!(address.as_bytes()[19], 0x43);

        let lower = Address::new(SAMPLE.to_lowercase()).unwrap();
        assert_ne!(address, lower);
        assert!(address.same_account(&lower));
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());
        assert_eq!(zero, Address::new(ETH_PROGRAM_ADDRESS).unwrap());
    }

    #[test]
    fn test_namespace_parsing() {
        assert_eq!("this".parse::<AddressOrNamespace>().unwrap(), AddressOrNamespace::This);
        assert_eq!("zero".parse::<AddressOrNamespace>().unwrap(), AddressOrNamespace::Zero);
        assert_eq!("zero-value".parse::<AddressOrNamespace>().unwrap(), AddressOrNamespace::Zero);

        let parsed: AddressOrNamespace = SAMPLE.parse().unwrap();
        assert_eq!(parsed.as_address().unwrap().as_str(), SAMPLE);
        assert!(!parsed.is_namespace());

        assert!(matches!(
            "that".parse::<AddressOrNamespace>(),
            Err(LasrError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_namespace_serializes_as_bare_string() {
        let this = serde_json::to_value(AddressOrNamespace::This).unwrap();
        assert_eq!(this, serde_json::json!("this"));

        let zero = serde_json::to_value(AddressOrNamespace::Zero).unwrap();
        assert_eq!(zero, serde_json::json!("zero"));

        let address = AddressOrNamespace::from(Address::new(SAMPLE).unwrap());
        assert_eq!(serde_json::to_value(&address).unwrap(), serde_json::json!(SAMPLE));
    }

    #[test]
    fn test_structural_equality() {
        let a = AddressOrNamespace::from(Address::new(SAMPLE).unwrap());
        let b: AddressOrNamespace = SAMPLE.parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, AddressOrNamespace::This);
        assert_ne!(AddressOrNamespace::This, AddressOrNamespace::Zero);
    }

    proptest! {
        #[test]
        fn prop_address_round_trip_is_identity(raw in "0x[0-9a-fA-F]{40}") {
            let address = Address::new(raw.as_str()).unwrap();
            prop_assert_eq!(address.as_str(), raw.as_str());

            let json = serde_json::to_string(&address).unwrap();
            let back: Address = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.as_str(), raw.as_str());

            let namespaced: AddressOrNamespace = raw.parse().unwrap();
            prop_assert_eq!(namespaced.to_string(), raw);
        }
    }
}
