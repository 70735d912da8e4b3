use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Server-assigned timestamps attached to every entity.
///
/// Both fields are read-only from the client's perspective: they are set by
/// the backend on create/update and never sent back in mutation payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl EntityMeta {
    /// Meta stamped with the current instant, for test fixtures and fakes.
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

/// Contract for a REST-managed entity.
///
/// An entity is a flat record with a server-assigned, immutable `id` and a
/// `meta` block of server timestamps. The client never assigns identity;
/// drafts sent on create carry no id and the server mints one.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// REST resource path segment, e.g. `"patients"` for `/api/patients`.
    const RESOURCE: &'static str;

    /// Server-assigned identifier.
    fn id(&self) -> &str;

    /// Decode one wire record.
    ///
    /// The default implementation is plain serde. Entities carrying embedded
    /// JSON blobs override this to substitute documented defaults when a
    /// blob fails to parse, so one malformed record cannot break a page.
    fn from_wire(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
