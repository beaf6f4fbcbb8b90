// src/utils/lenient.rs

//! Deserializers for fields that older data files and clients send either as
//! JSON strings or as numbers (`"jahrgang": 2025` vs `"2025"`).
//! Values are always written back in their canonical type.

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

/// Text of a string or number value.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer held by a number (without fraction) or a numeric string.
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_string<E: Error>(value: Value) -> Result<Option<String>, E> {
    if value.is_null() {
        return Ok(None);
    }
    text(&value)
        .map(Some)
        .ok_or_else(|| E::custom(format!("expected a string or a number, found {}", value)))
}

fn value_to_integer<E: Error>(value: Value) -> Result<Option<i64>, E> {
    if value.is_null() {
        return Ok(None);
    }
    integer_value(&value)
        .map(Some)
        .ok_or_else(|| E::custom(format!("expected an integer, found {}", value)))
}

/// String or number into `String`; `null` becomes the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value)?.unwrap_or_default())
}

/// String or number into `Option<String>`; `null` becomes `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_string(value)
}

/// Integer, or a string holding one, into `i64`; `null` becomes `0`.
pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_integer(value)?.unwrap_or_default())
}

/// Integer, or a string holding one, into `Option<i64>`; `null` becomes `None`.
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_integer(value)
}
