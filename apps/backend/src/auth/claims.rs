use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded token payload.
///
/// The gate hands this back exactly as it was signed; nothing about its
/// shape is checked there. Handlers that need `id` or `roles_id` go through
/// the accessors below and decide what to do when they are missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `id` claim, accepting either a JSON number or a numeric string.
    pub fn subject_id(&self) -> Option<i32> {
        self.get("id").and_then(as_i32)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn role_id(&self) -> Option<i32> {
        self.get("roles_id").and_then(as_i32)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
