use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// One input item: a flat field-name → value mapping.
///
/// Records are supplied by the caller and read-only to the query engine;
/// projection builds new records rather than mutating these.
pub type Record = HashMap<String, Value>;

/// A dynamically-typed field value.
///
/// There is a single numeric type: arithmetic runs on `f64` with its natural
/// semantics (division by zero gives infinity, NaN propagates).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Date(NaiveDate),
    /// The result of referencing a field the record does not have.
    ///
    /// Distinct from an explicit `Null` field: it is loose-equal to null,
    /// but coerces to NaN numerically, so every ordering comparison against
    /// it is false, while a null field coerces to 0.
    Absent,
}

impl Value {
    /// Truthiness, as used by WHERE filtering and NOT/AND/OR.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Date(_) => true,
            Value::Absent => false,
        }
    }

    /// Numeric coercion for arithmetic and ordering comparisons.
    ///
    /// Strings parse as a number or coerce to NaN; dates coerce to their
    /// midnight-UTC timestamp in milliseconds.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Date(d) => d.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64,
            Value::Absent => f64::NAN,
        }
    }

    /// String form, used by LIKE and string concatenation.
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Absent => "undefined".to_string(),
        }
    }

    /// Convert a flat JSON value. Arrays and objects have no place in a
    /// record field and yield `None`.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Value::Absent => serde_json::Value::Null,
        }
    }
}
