//! A budget collection persisted as one JSON array in a single slot.
//!
//! The same layout backs two tiers: the repository's local mirror and the
//! remote service's own storage.

use uuid::Uuid;

use crate::{
    EngineError,
    budget::Budget,
    storage::{SlotStore, read_slot, write_slot},
};

/// Slot key of the local mirror of finalized budgets.
pub const MIRROR_KEY: &str = "budgets_backup";

/// List/get/upsert/remove over one budgets slot.
#[derive(Debug)]
pub struct BudgetCollection<S: SlotStore> {
    store: S,
    key: String,
}

impl<S: SlotStore> BudgetCollection<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// All budgets in stored order. A missing or corrupt slot is an empty
    /// collection.
    pub fn list(&self) -> Result<Vec<Budget>, EngineError> {
        Ok(read_slot(&self.store, &self.key)?.unwrap_or_default())
    }

    /// All budgets, most recent date first. The query order of the
    /// budgets service.
    pub fn list_by_date_desc(&self) -> Result<Vec<Budget>, EngineError> {
        let mut budgets = self.list()?;
        budgets.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(budgets)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Budget>, EngineError> {
        Ok(self.list()?.into_iter().find(|budget| budget.id == id))
    }

    /// Inserts or replaces by id. A replaced budget keeps its position.
    pub fn upsert(&self, budget: &Budget) -> Result<(), EngineError> {
        let mut budgets = self.list()?;
        match budgets.iter_mut().find(|b| b.id == budget.id) {
            Some(slot) => *slot = budget.clone(),
            None => budgets.push(budget.clone()),
        }
        write_slot(&self.store, &self.key, &budgets)
    }

    /// Removes by id; `false` when absent.
    pub fn remove(&self, id: Uuid) -> Result<bool, EngineError> {
        let mut budgets = self.list()?;
        let before = budgets.len();
        budgets.retain(|budget| budget.id != id);
        let removed = budgets.len() != before;
        write_slot(&self.store, &self.key, &budgets)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, Utc};

    fn collection() -> BudgetCollection<MemoryStore> {
        BudgetCollection::new(MemoryStore::default(), MIRROR_KEY)
    }

    #[test]
    fn upsert_inserts_then_replaces_in_place() {
        let budgets = collection();
        let mut first = Budget::new();
        first.number = "2026-001".to_string();
        let second = Budget::new();

        budgets.upsert(&first).unwrap();
        budgets.upsert(&second).unwrap();

        first.number = "2026-001-R".to_string();
        budgets.upsert(&first).unwrap();

        let stored = budgets.list().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].number, "2026-001-R");
    }

    #[test]
    fn list_by_date_desc_orders_newest_first() {
        let budgets = collection();
        let mut old = Budget::new();
        old.date = Utc::now() - Duration::days(30);
        let recent = Budget::new();

        budgets.upsert(&old).unwrap();
        budgets.upsert(&recent).unwrap();

        let stored = budgets.list_by_date_desc().unwrap();
        assert_eq!(stored[0].id, recent.id);
        assert_eq!(stored[1].id, old.id);
    }

    #[test]
    fn remove_reports_presence() {
        let budgets = collection();
        let budget = Budget::new();
        budgets.upsert(&budget).unwrap();

        assert!(budgets.remove(budget.id).unwrap());
        assert!(!budgets.remove(budget.id).unwrap());
        assert!(budgets.get(budget.id).unwrap().is_none());
    }
}
