//! Raw `search_read` records and the coercion rules applied to their fields.
//!
//! Odoo encodes "no value" as `false` for most field types, so every accessor
//! here treats `false`, `null` and a missing key alike where that matters.

use serde_json::{Map, Value};

use salesbridge_core::ValueObject;

/// One record as returned by `search_read`: field name to loosely typed value.
pub type RawRecord = Map<String, Value>;

/// A many2one field resolved to its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationalRef {
    Absent,
    Present(String),
}

impl ValueObject for RelationalRef {}

impl RelationalRef {
    /// Resolve `[id, "Display Name"]`; anything else (usually `false`) is absent.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) if items.len() >= 2 => {
                RelationalRef::Present(display_string(&items[1]))
            }
            _ => RelationalRef::Absent,
        }
    }

    pub fn into_name(self) -> Option<String> {
        match self {
            RelationalRef::Absent => None,
            RelationalRef::Present(name) => Some(name),
        }
    }
}

/// Truthiness as the remote service means it: empty, zero, false and null are falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Integer coercion: numbers truncate, numeric strings parse, `true` is 1.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Float coercion for amounts.
pub fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Render a value for display; strings are taken verbatim, null is empty.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
