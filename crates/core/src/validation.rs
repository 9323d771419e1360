//! Required-field rules for incoming form data.
//!
//! Browser forms submit whatever the inputs hold: numbers arrive as JSON
//! numbers or as numeric strings, and an untouched input arrives as `""`.
//! A required field counts as present only when its raw value is *truthy*
//! (see [`is_truthy`]); falsy values are treated exactly like an absent key.
//!
//! The [`lenient`] deserializers apply that rule while decoding, so input
//! DTOs can use plain `Option<T>` fields and let [`required`] turn `None`
//! into a [`CoreError::Validation`].

use serde_json::Value;

use crate::error::CoreError;

/// JavaScript-style truthiness of a raw JSON value.
///
/// `null`, `false`, numeric zero and the empty string are falsy. Everything
/// else is truthy, including the string `"0"`, empty arrays and objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Unwrap a required field, failing with the entity's validation message.
pub fn required<T>(field: Option<T>, message: &str) -> Result<T, CoreError> {
    field.ok_or_else(|| CoreError::Validation(message.to_string()))
}

/// `deserialize_with` helpers that map falsy values to `None` and coerce
/// truthy values into the target type.
///
/// Fields using these must also carry `#[serde(default)]` so that an absent
/// key decodes to `None` instead of a missing-field error.
pub mod lenient {
    use std::str::FromStr;

    use chrono::{DateTime, NaiveDate};
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::is_truthy;

    fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Decode the raw value, returning `None` when it is falsy.
    fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(is_truthy(&value).then_some(value))
    }

    /// Free text. Numbers are accepted and kept in their decimal form.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match truthy(deserializer)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected text, found {}",
                kind(&other)
            ))),
        }
    }

    /// Whole numbers (`quantity`, `stock`, foreign keys).
    pub fn integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<i64>,
    {
        let out_of_range = |raw: &str| D::Error::custom(format!("integer out of range: {raw}"));
        match truthy(deserializer)? {
            None => Ok(None),
            Some(Value::Number(n)) => {
                let whole = n
                    .as_i64()
                    .ok_or_else(|| D::Error::custom(format!("expected an integer, found {n}")))?;
                T::try_from(whole)
                    .map(Some)
                    .map_err(|_| out_of_range(&n.to_string()))
            }
            Some(Value::String(s)) => s
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, found \"{s}\""))),
            Some(other) => Err(D::Error::custom(format!(
                "expected an integer, found {}",
                kind(&other)
            ))),
        }
    }

    /// Monetary amounts. Plain and scientific notation are both accepted.
    pub fn decimal<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let raw = match truthy(deserializer)? {
            None => return Ok(None),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "expected a number, found {}",
                    kind(&other)
                )))
            }
        };
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, found \"{raw}\"")))
    }

    /// Calendar dates as `YYYY-MM-DD`, or an RFC 3339 timestamp whose date
    /// part is kept.
    pub fn date<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match truthy(deserializer)? {
            None => Ok(None),
            Some(Value::String(s)) => {
                let s = s.trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("expected a date, found \"{s}\"")))
            }
            Some(other) => Err(D::Error::custom(format!(
                "expected a date, found {}",
                kind(&other)
            ))),
        }
    }
}
