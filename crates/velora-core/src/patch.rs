use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, Result};

/// A sparse update payload.
///
/// Only fields explicitly set on the patch are serialized; the server
/// treats absent fields as "unchanged". Presence is tracked by the map, not
/// by truthiness, so an explicit `false` or `0` survives to the wire — a
/// naive truthy filter would drop exactly the values users toggle off.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch {
    fields: IndexMap<String, Value>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Serializable values only; serialization failure is a
    /// programming error surfaced as `InvalidEntity`.
    pub fn set(mut self, field: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        self.fields.insert(field.into(), value);
        Ok(self)
    }

    /// Set a string field after trimming; empty-after-trim is skipped so
    /// the server falls back to "unchanged"/default semantics.
    pub fn set_trimmed(mut self, field: impl Into<String>, value: &str) -> Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.fields
                .insert(field.into(), Value::String(trimmed.to_string()));
        }
        self
    }

    /// Set an optional field only when present. `None` means "not edited",
    /// which is different from an explicit `null`.
    pub fn set_opt(self, field: impl Into<String>, value: Option<impl Serialize>) -> Result<Self> {
        match value {
            Some(v) => self.set(field, v),
            None => Ok(self),
        }
    }

    /// Set a field whose JSON representation is infallible (bools, numbers,
    /// strings). The usual path for form fields.
    pub fn set_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// [`Patch::set_value`] for optionals: `None` means "not edited".
    pub fn set_opt_value(
        self,
        field: impl Into<String>,
        value: Option<impl Into<Value>>,
    ) -> Self {
        match value {
            Some(v) => self.set_value(field, v),
            None => self,
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Wire body for a PUT. Rejects an empty patch — sending `{}` would be
    /// a no-op round trip the caller almost certainly did not intend.
    pub fn into_body(self) -> Result<Value> {
        if self.fields.is_empty() {
            return Err(CoreError::EmptyPatch);
        }
        Ok(Value::Object(self.fields.into_iter().collect()))
    }
}
