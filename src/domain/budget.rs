use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, EntityPatch, Owned};

/// Monthly spending budget owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a budget. Id, owner and timestamps are deliberately not
/// part of the patch; anything the client sends for them is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Entity for Budget {
    type Patch = BudgetPatch;

    const COLLECTION: &'static str = "budgets";

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

impl Owned for Budget {
    fn owner_id(&self) -> &str {
        &self.user_id
    }

    fn set_owner_id(&mut self, owner: String) {
        self.user_id = owner;
    }
}

impl EntityPatch for BudgetPatch {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
