//! The durable working draft: the budget being edited right now.
//!
//! One slot, overwritten on every mutation, read back once when the
//! editing surface starts. Independent of the finalized-budget stores.

use crate::{
    EngineError,
    budget::Budget,
    storage::{SlotStore, read_slot, write_slot},
};

/// Slot key of the working draft.
pub const DRAFT_KEY: &str = "current_budget_draft";

/// Single-slot persistence for the in-progress budget.
#[derive(Debug)]
pub struct DraftStore<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> DraftStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists the draft. Called after every mutation.
    pub fn save(&self, budget: &Budget) -> Result<(), EngineError> {
        write_slot(&self.store, DRAFT_KEY, budget)
    }

    /// Resolves the budget to edit.
    ///
    /// An explicitly supplied budget wins; otherwise the slot is read, and
    /// absence or corruption (logged by the slot reader) yields a fresh
    /// empty draft. Total: storage trouble also degrades to a fresh draft.
    #[must_use]
    pub fn load_or_create(&self, existing: Option<Budget>) -> Budget {
        if let Some(budget) = existing {
            return budget;
        }

        match read_slot(&self.store, DRAFT_KEY) {
            Ok(Some(budget)) => budget,
            Ok(None) => Budget::new(),
            Err(err) => {
                tracing::warn!(%err, "failed to read draft slot, starting fresh");
                Budget::new()
            }
        }
    }

    /// Discards the draft. The caller must rebuild its in-memory state
    /// afterwards so stale state is not re-persisted.
    pub fn clear(&self) -> Result<(), EngineError> {
        self.store.remove(DRAFT_KEY)
    }
}
