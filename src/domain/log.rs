use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityPatch};

/// Audit trail entry. Global scope - logs carry no owner and are written by
/// the audit sink, never directly by request handlers.
///
/// `old_values`/`new_values` are opaque JSON-encoded snapshots. The fields
/// are part of the stored shape but no call site populates them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    #[serde(default)]
    pub id: String,
    pub action: String,
    pub message: String,
    #[serde(default)]
    pub old_values: Option<String>,
    #[serde(default)]
    pub new_values: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Log {
    /// New unsaved entry for the given action tag; the service assigns id and
    /// timestamps on create.
    pub fn record(action: impl Into<String>, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            action: action.into(),
            message: message.into(),
            old_values: None,
            new_values: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Entity for Log {
    type Patch = LogPatch;

    const COLLECTION: &'static str = "logs";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = at;
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl EntityPatch for LogPatch {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
