//! Lenient numeric coercion.
//!
//! Catalog payloads are produced by admin forms and third-party feeds, so
//! numbers arrive as JSON numbers, numeric strings, `null`, or garbage.
//! Everything here resolves to a finite value or a caller-supplied fallback
//! and never fails.

use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Numbers and numeric strings (surrounding whitespace allowed) are accepted.
/// `null`, booleans, arrays, objects, the empty string and anything that
/// parses to NaN or an infinity yield `None`.
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Convert `value` to a finite number, or return `fallback`.
pub fn to_number(value: &Value, fallback: f64) -> f64 {
    coerce(value).unwrap_or(fallback)
}

/// Return `value` when finite, otherwise `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Coerce with fallback 0 and floor the result at 0.
pub fn non_negative(value: &Value) -> f64 {
    to_number(value, 0.0).max(0.0)
}

/// Coerce to a whole, non-negative unit count (stock, quantities).
pub fn to_count(value: &Value) -> u32 {
    let n = non_negative(value).trunc();
    if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n as u32
    }
}

/// `deserialize_with` adapters that run catalog fields through coercion.
///
/// Pair each with `#[serde(default)]` so missing keys behave like `null`.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Non-negative amount, falling back to 0.
    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::non_negative(&value))
    }

    /// Optional non-negative amount; unusable input becomes `None`.
    pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::coerce(&value).map(|v| v.max(0.0)))
    }

    /// Whole unit count, falling back to 0.
    pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::to_count(&value))
    }

    /// Optional whole unit count; `null` or unusable input becomes `None`.
    pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(super::coerce(&value).map(|_| super::to_count(&value)))
    }
}
