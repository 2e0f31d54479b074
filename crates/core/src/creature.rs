//! Creature catalog records.
//!
//! Catalog entries arrive as loosely-typed JSON. Ids may be strings or
//! numbers; both are coerced to their string form so lookups are uniform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// String-coerced creature identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(String);

impl CreatureId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Coerce a JSON value into an id.
    ///
    /// Whole numbers are keyed without a fractional part (`1.0` and `1`
    /// share the key `"1"`), and `true` is keyed as `"true"`. Empty strings,
    /// zero, `false`, `null` and non-scalar values carry no usable id.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => number_key(n).map(Self),
            Value::Bool(true) => Some(Self("true".to_string())),
            _ => None,
        }
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn number_key(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 {
        None
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        Some(format!("{f:.0}"))
    } else {
        Some(f.to_string())
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CreatureId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CreatureId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One entry of the creature catalog.
///
/// Only `id` and `sound` are interpreted; every other field is kept in
/// `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatureRecord {
    /// Creature identifier, if the entry carried a usable one.
    pub id: Option<CreatureId>,
    /// Sound file name relative to the sound prefix.
    pub sound: Option<String>,
    /// Fields this system does not use.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreatureRecord {
    /// Build a record with both fields set.
    pub fn new(id: impl Into<CreatureId>, sound: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            sound: Some(sound.into()),
            extra: Map::new(),
        }
    }

    /// Interpret an arbitrary JSON value as a record.
    ///
    /// Non-object values produce an empty record.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let id = fields.remove("id").as_ref().and_then(CreatureId::from_json);
        let sound = match fields.remove("sound") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        Self {
            id,
            sound,
            extra: fields,
        }
    }

    /// Id and sound, when both are present.
    pub fn playable(&self) -> Option<(&CreatureId, &str)> {
        match (&self.id, &self.sound) {
            (Some(id), Some(sound)) => Some((id, sound.as_str())),
            _ => None,
        }
    }
}
