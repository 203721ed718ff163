use std::fmt;
use std::str::FromStr;

use ethereum_types::U256 as Word;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::HEX_WIDTH;
use crate::error::LasrError;

/// 256-bit unsigned integer as the ledger carries it.
///
/// On the wire a `U256` is an array of four `u64` limbs, least significant
/// limb first. Deserialization also accepts a `0x` hex string or a plain JSON
/// integer so account snapshots from older runtimes still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U256(Word);

impl U256 {
    pub const ZERO: U256 = U256(Word([0; 4]));

    /// Build from limbs, least significant first
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        U256(Word(limbs))
    }

    /// Limbs, least significant first
    pub fn limbs(&self) -> [u64; 4] {
        self.0 .0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `10^exp`, used for fixed-point scaling
    pub fn exp10(exp: u32) -> Self {
        U256(Word::exp10(exp as usize))
    }

    /// Parse a `0x`-prefixed hex string of at most 64 significant digits
    pub fn from_hex(raw: &str) -> Result<Self, LasrError> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(|| LasrError::invalid_amount(raw, "missing 0x prefix"))?;
        if digits.is_empty() {
            return Err(LasrError::invalid_amount(raw, "no hex digits"));
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > HEX_WIDTH {
            return Err(LasrError::invalid_amount(raw, "exceeds 256 bits"));
        }

        let padded = format!("{:0>width$}", significant, width = HEX_WIDTH);
        let bytes = hex::decode(&padded)
            .map_err(|e| LasrError::invalid_amount(raw, format!("invalid hex: {}", e)))?;
        Ok(U256(Word::from_big_endian(&bytes)))
    }

    /// Parse a base-10 integer string (no sign, no fraction)
    pub fn from_dec_str(raw: &str) -> Result<Self, LasrError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LasrError::invalid_amount(raw, "not a base-10 integer"));
        }
        Word::from_dec_str(raw)
            .map(U256)
            .map_err(|_| LasrError::invalid_amount(raw, "exceeds 256 bits"))
    }

    /// `0x` followed by exactly 64 lowercase hex digits
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        format!("0x{}", hex::encode(bytes))
    }

    pub fn checked_add(self, other: U256) -> Option<U256> {
        self.0.checked_add(other.0).map(U256)
    }

    pub fn checked_mul(self, other: U256) -> Option<U256> {
        self.0.checked_mul(other.0).map(U256)
    }

    /// Quotient and remainder; `None` when `other` is zero
    pub fn checked_div_mod(self, other: U256) -> Option<(U256, U256)> {
        if other.is_zero() {
            return None;
        }
        let (quotient, remainder) = self.0.div_mod(other.0);
        Some((U256(quotient), U256(remainder)))
    }

    /// Narrow to `u64` if the value fits
    pub fn to_u64(&self) -> Option<u64> {
        let [low, rest @ ..] = self.limbs();
        rest.iter().all(|limb| *limb == 0).then_some(low)
    }

    pub fn as_word(&self) -> &Word {
        &self.0
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256(Word::from(value))
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        U256(Word::from(value))
    }
}

impl From<Word> for U256 {
    fn from(value: Word) -> Self {
        U256(value)
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Hex when `0x`-prefixed, base-10 otherwise. Never applies decimal scaling.
impl FromStr for U256 {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            U256::from_hex(s)
        } else {
            U256::from_dec_str(s)
        }
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.limbs().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U256Repr {
    Limbs([u64; 4]),
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match U256Repr::deserialize(deserializer)? {
            U256Repr::Limbs(limbs) => Ok(U256::from_limbs(limbs)),
            U256Repr::Text(text) => text.parse().map_err(D::Error::custom),
            U256Repr::Number(n) => Ok(U256::from(n)),
        }
    }
}

/// Serde adapter for optional amounts, written as fixed-width `0x` hex strings.
///
/// Use with `#[serde(with = "lasr_core::u256::hex_amount")]`.
pub mod hex_amount {
    use super::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(amount) => serializer.serialize_str(&amount.to_hex()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
        Option::<U256>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limbs_are_least_significant_first() {
        let one = U256::from(1u64);
        assert_eq!(one.limbs(), [1, 0, 0, 0]);

        let big = U256::from(1u128 << 64);
        assert_eq!(big.limbs(), [0, 1, 0, 0]);
    }

    #[test]
    fn test_hex_is_fixed_width() {
        let value = U256::from(255u64);
        let hex = value.to_hex();
        assert_eq!(hex.len(), 2 + HEX_WIDTH);
        assert!(hex.ends_with("ff"));
        assert_eq!(U256::from_hex(&hex).unwrap(), value);
    }

    #[test]
    fn test_from_hex_accepts_short_and_rejects_garbage() {
        assert_eq!(U256::from_hex("0x1").unwrap(), U256::from(1u64));
        assert_eq!(U256::from_hex("0xabc").unwrap(), U256::from(0xabcu64));
        assert!(U256::from_hex("0x").is_err());
        assert!(U256::from_hex("0xzz").is_err());
        assert!(U256::from_hex("12").is_err());

        let too_wide = format!("0x1{}", "0".repeat(HEX_WIDTH));
        assert!(U256::from_hex(&too_wide).is_err());
    }

    #[test]
    fn test_from_str_never_scales() {
        assert_eq!("42".parse::<U256>().unwrap(), U256::from(42u64));
        assert_eq!("0x2a".parse::<U256>().unwrap(), U256::from(42u64));
        assert!("4.2".parse::<U256>().is_err());
        assert!("-1".parse::<U256>().is_err());
    }

    #[test]
    fn test_serializes_as_limbs() {
        let value = U256::from_limbs([7, 0, 0, 1]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "[7,0,0,1]");

        let back: U256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserializes_hex_and_numbers() {
        let from_hex: U256 = serde_json::from_str("\"0x10\"").unwrap();
        assert_eq!(from_hex, U256::from(16u64));

        let from_number: U256 = serde_json::from_str("16").unwrap();
        assert_eq!(from_number, U256::from(16u64));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = U256::from_limbs([u64::MAX; 4]);
        assert!(max.checked_add(U256::from(1u64)).is_none());
        assert!(max.checked_mul(U256::from(2u64)).is_none());
        assert!(U256::from(1u64).checked_div_mod(U256::ZERO).is_none());

        let (q, r) = U256::from(17u64).checked_div_mod(U256::from(5u64)).unwrap();
        assert_eq!(q, U256::from(3u64));
        assert_eq!(r, U256::from(2u64));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(U256::from(9u64).to_u64(), Some(9));
        assert_eq!(U256::from(1u128 << 64).to_u64(), None);
    }
}
