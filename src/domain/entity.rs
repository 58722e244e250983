use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Common contract for every persisted kind: an opaque string id plus
/// creation/update timestamps. The id is assigned once at creation and never
/// changes; `created_at` is immutable after creation; `updated_at` is bumped
/// on every successful mutation.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// Merge-patch companion type: all domain fields optional, protected
    /// fields (id, owner, timestamps) absent entirely.
    type Patch: EntityPatch;

    /// Physical collection (table) name backing this kind.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn created_at(&self) -> DateTime<Utc>;
    fn set_created_at(&mut self, at: DateTime<Utc>);

    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Partial update payload. Only fields present in the serialized form are
/// merged into the stored row; absent or null fields never clear stored
/// values.
pub trait EntityPatch: Serialize + DeserializeOwned + Send + Sync {
    /// Optional id carried in the payload, checked against the path id at
    /// the transport layer.
    fn id(&self) -> Option<&str>;
}

/// Kinds that belong to an authenticated subject. Implemented only by owned
/// kinds; global kinds (logs, settings) never implement it, so ownership
/// enforcement is a compile-time property rather than a runtime lookup.
pub trait Owned {
    fn owner_id(&self) -> &str;
    fn set_owner_id(&mut self, owner: String);
}
