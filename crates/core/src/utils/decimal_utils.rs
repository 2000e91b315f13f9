//! Fail-soft numeric decoding.
//!
//! Catalog documents are edited by hand in admin forms, so numeric fields may
//! arrive as numbers, numeric strings, empty strings or not at all. Anything
//! that cannot be read as a decimal decodes to "absent", and aggregation code
//! treats absent values as zero.
//!
//! Stored documents always write decimals as strings so every digit survives
//! a save and reload.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Parses a decimal, accepting plain and scientific notation.
/// Returns `None` for blank or unparseable input.
pub fn parse_decimal_lenient(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parses a decimal, falling back to zero.
pub fn decimal_or_zero(raw: &str) -> Decimal {
    parse_decimal_lenient(raw).unwrap_or(Decimal::ZERO)
}

/// Reads a decimal out of a JSON number or numeric string.
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_lenient(&n.to_string()),
        Value::String(s) => parse_decimal_lenient(s),
        _ => None,
    }
}

/// Serde helper for `Option<Decimal>` fields that must never fail decoding.
pub fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_decimal))
}

/// Serde helper for `Decimal` fields where absent or garbage input means zero.
pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_lenient_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Decimal written as a string. Reads numbers or numeric strings and rejects anything else.
pub mod decimal_serde {
    use super::*;
    use serde::de::Error;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        value_to_decimal(&value)
            .ok_or_else(|| D::Error::custom(format!("Invalid decimal: {}", value)))
    }
}

/// Decimal written as a string; absent or unreadable input reads as zero.
pub mod decimal_serde_or_zero {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        decimal_serde::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_decimal_or_zero(deserializer)
    }
}

/// `Option<Decimal>` written as a string or null; unreadable input reads as `None`.
pub mod decimal_serde_option {
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_lenient_decimal(deserializer)
    }
}
