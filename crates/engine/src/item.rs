//! The module contains the `LineItem` type, one quoted unit of work or
//! material within a budget.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a budget: a trade group, a category within it, and the
/// quantity × unit price math.
///
/// `amount` is derived and kept equal to `quantity * unit_price` by every
/// constructor and mutation path; it is never set on its own.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub group: String,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    pub amount: f64,
}

/// Input for a new line item. Id and amount are derived on insert.
#[derive(Clone, Debug, Default)]
pub struct ItemDraft {
    pub group: String,
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub cost_price: Option<f64>,
}

/// Partial update for an existing item; only the set fields change.
///
/// `cost_price` is doubly optional so a patch can clear it.
#[derive(Clone, Debug, Default)]
pub struct ItemPatch {
    pub group: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub cost_price: Option<Option<f64>>,
}

impl LineItem {
    pub fn new(draft: ItemDraft) -> Self {
        let amount = draft.quantity * draft.unit_price;
        Self {
            id: Uuid::new_v4(),
            group: draft.group,
            category: draft.category,
            description: draft.description,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            cost_price: draft.cost_price,
            amount,
        }
    }

    /// Applies a partial update, recomputing `amount` when quantity or
    /// unit price changed. Other fields leave the amount untouched.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(cost_price) = patch.cost_price {
            self.cost_price = cost_price;
        }

        let retotal = patch.quantity.is_some() || patch.unit_price.is_some();
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
        if retotal {
            self.amount = self.quantity * self.unit_price;
        }
    }

    /// Margin over cost as a percentage; `0` when no positive cost price
    /// is recorded. Derived view, never persisted.
    #[must_use]
    pub fn profit_percent(&self) -> f64 {
        match self.cost_price {
            Some(cost) if cost > 0.0 => (self.unit_price - cost) / cost * 100.0,
            _ => 0.0,
        }
    }
}
