//! Embedded JSON config blobs.
//!
//! Several entities carry a loosely-typed config sub-document stored as a
//! JSON string on the wire. These blobs are merged with documented defaults
//! at read time; a malformed blob is never fatal to the record that carries
//! it, let alone the page it arrived on.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Merge a blob over its defaults.
///
/// Object keys present in `overlay` win, recursively; any non-object
/// overlay value replaces the default wholesale. Pure function, so the
/// merge semantics can be tested without any entity in sight.
pub fn merge_with_defaults(defaults: &Value, overlay: &Value) -> Value {
    match (defaults, overlay) {
        (Value::Object(base), Value::Object(over)) => {
            let mut merged = base.clone();
            for (key, value) in over {
                match merged.get(key) {
                    Some(existing) => {
                        merged.insert(key.clone(), merge_with_defaults(existing, value));
                    }
                    None => {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(merged)
        }
        (_, over) => over.clone(),
    }
}

/// Parse a JSON-string-encoded blob into `T`, merged over `T::default()`
/// via [`merge_with_defaults`]; substitutes the plain default when the
/// blob is missing, unparsable, or does not match the schema after the
/// merge.
///
/// Failures are logged at `warn` with the owning entity's identity so a
/// malformed record is visible in logs without breaking the list render.
pub fn parse_blob_or_default<T>(raw: Option<&str>, resource: &str, id: &str) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return T::default();
    };
    if raw.trim().is_empty() {
        return T::default();
    }
    let overlay: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                resource,
                id,
                error = %err,
                "malformed embedded config blob, substituting defaults"
            );
            return T::default();
        }
    };
    let defaults = match serde_json::to_value(T::default()) {
        Ok(value) => value,
        Err(_) => return T::default(),
    };
    match serde_json::from_value(merge_with_defaults(&defaults, &overlay)) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                resource,
                id,
                error = %err,
                "embedded config blob does not match its schema, substituting defaults"
            );
            T::default()
        }
    }
}
