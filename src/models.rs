use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored programming language entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Language {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Body fields as sent. Any JSON value is accepted; `null` counts as absent.
#[derive(Debug, Deserialize)]
struct RawFields {
    name: Option<Value>,
    color: Option<Value>,
}

impl RawFields {
    fn into_text(self) -> (Option<String>, Option<String>) {
        (self.name.and_then(value_text), self.color.and_then(value_text))
    }
}

/// Text stored for a submitted value: strings verbatim, anything else as JSON
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Fields required to insert a new language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLanguage {
    pub name: String,
    pub color: String,
}

impl NewLanguage {
    /// Parse a create body. Returns `None` when the body is absent,
    /// unparseable, or missing `name` or `color`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let Value::Object(map) = serde_json::from_slice::<Value>(body).ok()? else {
            return None;
        };
        let raw: RawFields = serde_json::from_value(Value::Object(map)).ok()?;
        match raw.into_text() {
            (Some(name), Some(color)) => Some(Self { name, color }),
            _ => None,
        }
    }
}

/// Partial update: only fields that are `Some` get written
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateLanguage {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl UpdateLanguage {
    /// Parse an update body. Returns `None` when the body is absent,
    /// unparseable, not an object, or an empty object.
    ///
    /// Unknown keys are ignored, so `{"foo": 1}` parses to an update that
    /// changes nothing.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            Value::Object(map) if !map.is_empty() => {
                let raw: RawFields = serde_json::from_value(Value::Object(map)).ok()?;
                let (name, color) = raw.into_text();
                Some(Self { name, color })
            }
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}
