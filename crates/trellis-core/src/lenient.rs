//! Forgiving deserializers for numeric fields typed in by hand.
//!
//! Values arrive either as JSON numbers or as the raw text of an input box.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Grid width in `1..=12`; anything unparsable becomes 12.
pub(crate) fn width<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match as_f64(&value) {
        Some(n) if n.is_finite() => n.trunc().clamp(1.0, 12.0) as u8,
        _ => 12,
    })
}

/// Non-negative integer or `None` when absent or unparsable.
pub(crate) fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.trunc().min(u32::MAX as f64) as u32))
}

/// String field that tolerates numbers and null.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Sequence that tolerates `null` and non-arrays; unreadable elements are skipped.
pub(crate) fn vec_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(element).collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(found = %other, "expected a list, using an empty one");
            Vec::new()
        }
    })
}

/// Like [`vec_or_default`], keeping absence distinguishable.
pub(crate) fn opt_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.into_iter().filter_map(element).collect()),
        _ => None,
    })
}

fn element<T: DeserializeOwned>(item: Value) -> Option<T> {
    serde_json::from_value(item)
        .map_err(|err| tracing::warn!(%err, "skipping unreadable list element"))
        .ok()
}

/// Optional string; numbers are kept as text, anything else becomes `None`.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// String-to-string map; entries with non-scalar values are dropped.
pub(crate) fn opt_string_map<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(
            map.into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) => Some((key, s)),
                    Value::Number(n) => Some((key, n.to_string())),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Any serde type, falling back to its default when the value does not fit.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).unwrap_or_else(|err| {
        tracing::warn!(%err, "unreadable value, using default");
        T::default()
    }))
}

/// Flag given as a bool, a number, or text such as `"true"` / `"yes"`.
pub(crate) fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        _ => false,
    })
}
