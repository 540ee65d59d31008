//! Forgiving `deserialize_with` helpers.
//!
//! Discipline documents come out of a best-effort document analyzer: hours arrive as numbers or
//! numeric strings, optional text fields arrive as `null`, and lists occasionally contain junk.
//! None of that is allowed to fail deserialization; each helper coerces to a safe default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value into a non-negative hour count.
///
/// Numbers are truncated toward zero, numeric strings are parsed after trimming, and everything
/// else (negative values, garbage, `null`) becomes `0`.
pub fn coerce_hours(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return u32::try_from(u).unwrap_or(u32::MAX);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= 0.0 => f.trunc().min(f64::from(u32::MAX)) as u32,
                _ => 0,
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(u) = s.parse::<u64>() {
                return u32::try_from(u).unwrap_or(u32::MAX);
            }
            match s.replace(',', ".").parse::<f64>() {
                Ok(f) if f.is_finite() && f >= 0.0 => f.trunc().min(f64::from(u32::MAX)) as u32,
                _ => 0,
            }
        }
        _ => 0,
    }
}

/// Coerces a JSON scalar into text. `null`, arrays and objects become the empty string.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Keeps only the string items of a JSON array; anything that is not an array is empty.
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn hours<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_hours(&value))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string(&value))
}

pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string_list(&value))
}

/// Like [`string`], but an empty or missing value becomes `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let s = coerce_string(&value);
    Ok(if s.trim().is_empty() { None } else { Some(s) })
}

/// Deserializes `T`, falling back to `T::default()` when the value has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserializes a list item by item, dropping the items that fail.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}
