pub mod budget;
pub mod entity;
pub mod expense;
pub mod log;
pub mod setting;

pub use budget::{Budget, BudgetPatch};
pub use entity::{Entity, EntityPatch, Owned};
pub use expense::{Expense, ExpensePatch};
pub use log::{Log, LogPatch};
pub use setting::{Setting, SettingPatch};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn budget_deserializes_from_client_payload() {
        // Typical POST body: no id, owner or timestamps supplied
        let budget: Budget =
            serde_json::from_str(r#"{"name":"Groceries","amount":"500"}"#).unwrap();
        assert_eq!(budget.name, "Groceries");
        assert_eq!(budget.amount, Decimal::from(500));
        assert!(budget.id.is_empty());
        assert!(budget.user_id.is_empty());
    }

    #[test]
    fn patch_skips_absent_fields_when_serialized() {
        let patch = BudgetPatch {
            amount: Some(Decimal::from(1200)),
            ..Default::default()
        };
        let v = serde_json::to_value(&patch).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("amount"));
    }

    #[test]
    fn patch_ignores_protected_fields_in_payload() {
        // Client-supplied owner and timestamps have no corresponding patch
        // fields, so they are dropped at deserialization
        let patch: ExpensePatch = serde_json::from_str(
            r#"{"name":"Rent","user_id":"someone-else","created_at":"2001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("Rent"));
        let v = serde_json::to_value(&patch).unwrap();
        assert!(v.get("user_id").is_none());
        assert!(v.get("created_at").is_none());
    }

    #[test]
    fn log_record_starts_without_snapshots() {
        let log = Log::record("EmailSent", "Email sent via SMTP");
        assert_eq!(log.action, "EmailSent");
        assert!(log.old_values.is_none());
        assert!(log.new_values.is_none());
        assert!(log.id.is_empty());
    }
}
