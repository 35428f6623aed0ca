//! Lenient field deserializers.
//!
//! Persisted carts and catalog payloads are not always well-formed. Each helper
//! here accepts any JSON value and coerces what it cannot use into a default,
//! so one bad field never rejects the surrounding record.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON number or numeric string as a decimal.
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Interpret a JSON value as a whole, non-negative quantity.
#[must_use]
pub fn quantity_from_value(value: &Value) -> Option<u32> {
    let amount = decimal_from_value(value)?;
    if amount.fract().is_zero() {
        amount.to_u32()
    } else {
        None
    }
}

/// Interpret a JSON string or number as text.
#[must_use]
pub fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decimal field; missing or invalid values become zero.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value).unwrap_or(Decimal::ZERO))
}

/// Optional decimal field; invalid values become `None`.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// Quantity field; fractional, negative or invalid values become zero.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn quantity_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value).unwrap_or(0))
}

/// Text field; `null` and non-scalar values become an empty string.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value).unwrap_or_default())
}

/// Optional text field; blank and non-scalar values become `None`.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value).filter(|s| !s.trim().is_empty()))
}

/// Boolean field; anything but `true` is `false`.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Nested record; values that do not decode as `T` become `T::default()`.
///
/// # Errors
///
/// Only fails if the input is not valid JSON at all.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decimal_from_number_and_string() {
        assert_eq!(decimal_from_value(&json!(15)), Some(Decimal::from(15)));
        assert_eq!(
            decimal_from_value(&json!(59.99)),
            Some(Decimal::from_str("59.99").unwrap())
        );
        assert_eq!(
            decimal_from_value(&json!(" 12.50 ")),
            Some(Decimal::from_str("12.5").unwrap())
        );
    }

    #[test]
    fn test_decimal_rejects_non_numeric() {
        assert_eq!(decimal_from_value(&json!(null)), None);
        assert_eq!(decimal_from_value(&json!("abc")), None);
        assert_eq!(decimal_from_value(&json!("")), None);
        assert_eq!(decimal_from_value(&json!({"amount": 1})), None);
    }

    #[test]
    fn test_quantity_requires_whole_non_negative() {
        assert_eq!(quantity_from_value(&json!(3)), Some(3));
        assert_eq!(quantity_from_value(&json!("4")), Some(4));
        assert_eq!(quantity_from_value(&json!(2.0)), Some(2));
        assert_eq!(quantity_from_value(&json!(2.5)), None);
        assert_eq!(quantity_from_value(&json!(-1)), None);
        assert_eq!(quantity_from_value(&json!(true)), None);
    }

    #[test]
    fn test_string_from_scalar() {
        assert_eq!(string_from_value(&json!("abc")), Some("abc".to_string()));
        assert_eq!(string_from_value(&json!(2011)), Some("2011".to_string()));
        assert_eq!(string_from_value(&json!(null)), None);
        assert_eq!(string_from_value(&json!(["a"])), None);
    }
}
