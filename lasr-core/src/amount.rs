//! Amount codec.
//!
//! Converts between human decimal amounts (`"1.1234123"`) and the fixed-point
//! integers the ledger stores, scaled by `10^DECIMALS`.
//!
//! Input accepted by [`parse_amount_to_big_int`] is dual-mode: a decimal
//! number or string is scaled by `10^18`, while a `0x`-prefixed hex string is
//! taken as the already-scaled on-chain integer and is NOT scaled again.
//! `parse_amount_to_big_int("1")` is `10^18` but
//! `parse_amount_to_big_int("0x1")` is `1`.

use log::debug;
use serde_json::Value;

use crate::consts::DECIMALS;
use crate::error::LasrError;
use crate::u256::U256;

/// Raw amount as a caller extracts it from a call
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    /// Whole units, scaled by `10^18`
    Integer(u64),
    /// Decimal number, scaled by `10^18` via its shortest decimal rendering
    Float(f64),
    /// Decimal string (scaled) or `0x` hex string (literal)
    Text(String),
    /// Already-scaled on-chain integer, used as is
    Raw(U256),
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Integer(value)
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        AmountInput::Integer(value as u64)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Float(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

impl From<&String> for AmountInput {
    fn from(value: &String) -> Self {
        AmountInput::Text(value.clone())
    }
}

impl From<U256> for AmountInput {
    fn from(value: U256) -> Self {
        AmountInput::Raw(value)
    }
}

const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Amounts pulled out of decoded call arguments: JSON strings and numbers
impl TryFrom<&Value> for AmountInput {
    type Error = LasrError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(AmountInput::Text(text.clone())),
            Value::Number(number) => {
                if let Some(units) = number.as_u64() {
                    return Ok(AmountInput::Integer(units));
                }
                match number.as_f64() {
                    // whole numbers past u64 have already lost digits to f64
                    Some(value) if value.fract() == 0.0 && value.abs() >= U64_LIMIT => {
                        Err(LasrError::invalid_amount(
                            number.to_string(),
                            "integer too large for a JSON number, pass it as a string",
                        ))
                    }
                    Some(value) => Ok(AmountInput::Float(value)),
                    None => Err(LasrError::invalid_amount(number.to_string(), "not representable")),
                }
            }
            other => Err(LasrError::invalid_amount(
                other.to_string(),
                "expected a number or a string",
            )),
        }
    }
}

/// Convert an amount to its on-chain fixed-point integer.
///
/// Hex input (`0x...`) is returned literally without scaling.
pub fn parse_amount_to_big_int(input: impl Into<AmountInput>) -> Result<U256, LasrError> {
    match input.into() {
        AmountInput::Integer(units) => U256::from(units)
            .checked_mul(scale())
            .ok_or_else(|| LasrError::invalid_amount(units.to_string(), "exceeds 256 bits")),
        AmountInput::Float(value) => {
            if !value.is_finite() || value < 0.0 {
                return Err(LasrError::invalid_amount(
                    value.to_string(),
                    "must be a finite, non-negative number",
                ));
            }
            // f64 Display never uses exponent notation
            parse_decimal(&value.to_string())
        }
        AmountInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(LasrError::invalid_amount(text, "empty amount"));
            }
            if text.starts_with("0x") || text.starts_with("0X") {
                debug!("Amount {} is hex, taking it as an unscaled integer", text);
                U256::from_hex(text)
            } else {
                parse_decimal(text)
            }
        }
        AmountInput::Raw(value) => Ok(value),
    }
}

/// Encode an amount as a fixed-width `0x` hex string for the wire
pub fn format_amount_to_hex(input: impl Into<AmountInput>) -> Result<String, LasrError> {
    parse_amount_to_big_int(input).map(|value| value.to_hex())
}

/// Encode an already-scaled integer as a fixed-width `0x` hex string
pub fn format_big_int_to_hex(value: U256) -> String {
    value.to_hex()
}

/// Decode a `0x` hex integer back to its canonical decimal string.
///
/// The result has no trailing fractional zeros and no `.` for whole amounts.
pub fn format_hex_to_amount(hex: &str) -> Result<String, LasrError> {
    let value = U256::from_hex(hex.trim())?;
    let (whole, fraction) = value
        .checked_div_mod(scale())
        .ok_or_else(|| LasrError::invalid_amount(hex, "zero scale"))?;

    if fraction.is_zero() {
        return Ok(whole.to_string());
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = DECIMALS as usize);
    Ok(format!("{}.{}", whole, fraction.trim_end_matches('0')))
}

fn scale() -> U256 {
    U256::exp10(DECIMALS)
}

fn parse_decimal(text: &str) -> Result<U256, LasrError> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(LasrError::invalid_amount(text, "no digits"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(LasrError::invalid_amount(text, "contains non-numeric characters"));
    }
    if fraction.len() > DECIMALS as usize {
        return Err(LasrError::invalid_amount(
            text,
            format!("more than {} fractional digits", DECIMALS),
        ));
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_dec_str(whole)?
    };
    let fraction = if fraction.is_empty() {
        U256::ZERO
    } else {
        // right-pad so the fraction is expressed in base units
        let padded = format!("{:0<width$}", fraction, width = DECIMALS as usize);
        U256::from_dec_str(&padded)?
    };

    whole
        .checked_mul(scale())
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| LasrError::invalid_amount(text, "exceeds 256 bits"))
}
