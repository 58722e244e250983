pub mod email;
pub mod entity;

pub use entity::{EntityService, OwnedEntityService};

use crate::domain::{Budget, Expense, Log, Setting};
use crate::store::{PgCollection, StoreError, StoreManager};

pub type BudgetService = OwnedEntityService<PgCollection<Budget>, Budget>;
pub type ExpenseService = OwnedEntityService<PgCollection<Expense>, Expense>;
pub type LogService = EntityService<PgCollection<Log>, Log>;
pub type SettingService = EntityService<PgCollection<Setting>, Setting>;

pub async fn budgets() -> Result<BudgetService, StoreError> {
    Ok(OwnedEntityService::new(PgCollection::new(
        StoreManager::pool().await?,
    )))
}

pub async fn expenses() -> Result<ExpenseService, StoreError> {
    Ok(OwnedEntityService::new(PgCollection::new(
        StoreManager::pool().await?,
    )))
}

pub async fn logs() -> Result<LogService, StoreError> {
    Ok(EntityService::new(PgCollection::new(
        StoreManager::pool().await?,
    )))
}

pub async fn settings() -> Result<SettingService, StoreError> {
    Ok(EntityService::new(PgCollection::new(
        StoreManager::pool().await?,
    )))
}
