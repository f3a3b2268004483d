//! Lenient deserializers for the quirks of the export format.
//!
//! Amounts and quantities arrive as numbers, numeric strings, or nothing at
//! all depending on which client wrote the record. These helpers mirror the
//! `parseFloat(x) || 0` reading the rest of the system applies, so one bad
//! field zeroes itself out instead of rejecting the whole snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{EventDate, OrderItem};

/// Deserialize a numeric field as `f64`, coercing anything unusable to 0.
pub(super) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Deserialize an optional timestamp string into a parsed [EventDate].
///
/// Missing, null, and unparseable values all become `None`; the record is
/// then invisible to every reporting window.
pub(super) fn lenient_event_date<'de, D>(deserializer: D) -> Result<Option<EventDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(EventDate::parse))
}

/// Deserialize an order's item list.
///
/// The SQLite-backed API stores the list as a JSON string inside the row,
/// while browser-created records embed a real array. Accept both.
pub(super) fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect(),
        Value::String(text) => serde_json::from_str(&text).unwrap_or_default(),
        _ => Vec::new(),
    })
}
