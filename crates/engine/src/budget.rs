//! The `Budget` aggregate: an itemized project quote and the rules that
//! keep its derived totals consistent with its line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    client::Client,
    item::{ItemDraft, ItemPatch, LineItem},
    master_data::MasterData,
    numbers,
};

/// Tax rate a fresh budget starts with.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// VAT rates offered by editing surfaces. A selection convenience only:
/// the field itself accepts any rate in `[0, 1]`.
pub const TAX_RATES: [f64; 4] = [0.21, 0.10, 0.04, 0.0];

/// Lifecycle label of a budget.
///
/// A plain tag: any value may be set directly, there is no enforced
/// transition graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    #[default]
    Draft,
    Pending,
    Accepted,
    Rejected,
}

impl BudgetStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = crate::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(crate::EngineError::InvalidValue(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

/// An itemized project quote.
///
/// Items keep insertion order; that order is the display/print order.
/// `subtotal`, `tax_amount` and `total` are derived and refreshed by
/// [`recompute_totals`] after every mutation that can affect them. The
/// plain fields (`number`, `notes`, `status`, `client`, ...) carry no
/// validation and can be assigned directly.
///
/// [`recompute_totals`]: Budget::recompute_totals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub number: String,
    pub client: Client,
    pub date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub notes: String,
    pub status: BudgetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_signature: Option<String>,
}

impl Budget {
    /// Creates an empty draft budget with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            number: String::new(),
            client: Client::default(),
            date: Utc::now(),
            items: Vec::new(),
            subtotal: 0.0,
            tax_rate: DEFAULT_TAX_RATE,
            tax_amount: 0.0,
            total: 0.0,
            notes: String::new(),
            status: BudgetStatus::Draft,
            client_signature: None,
        }
    }

    /// Appends a new line item and refreshes the totals.
    ///
    /// Returns the id assigned to the item.
    pub fn add_item(&mut self, draft: ItemDraft) -> Uuid {
        let item = LineItem::new(draft);
        let id = item.id;
        self.items.push(item);
        self.recompute_totals();
        id
    }

    /// Applies a partial update to the item with the given id.
    ///
    /// Returns `false` when no item matches; an unknown id is a silent
    /// no-op, not an error.
    pub fn update_item(&mut self, id: Uuid, patch: ItemPatch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.apply(patch);
        self.recompute_totals();
        true
    }

    /// Removes the item with the given id; `false` when absent.
    pub fn remove_item(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.recompute_totals();
        true
    }

    /// Sets the tax rate, clamped to `[0, 1]`, and refreshes the totals.
    pub fn set_tax_rate(&mut self, rate: f64) {
        self.tax_rate = rate.clamp(0.0, 1.0);
        self.recompute_totals();
    }

    /// Rederives `subtotal`, `tax_amount` and `total` from the items.
    ///
    /// Returns whether anything observably changed. The comparison uses
    /// the monetary tolerance, so recomputing an already-consistent
    /// budget is a no-op and float noise cannot retrigger an update loop.
    pub fn recompute_totals(&mut self) -> bool {
        let subtotal: f64 = self.items.iter().map(|item| item.amount).sum();
        let tax_amount = subtotal * self.tax_rate;
        let total = subtotal + tax_amount;

        if numbers::approx_eq(subtotal, self.subtotal)
            && numbers::approx_eq(tax_amount, self.tax_amount)
            && numbers::approx_eq(total, self.total)
        {
            return false;
        }

        self.subtotal = subtotal;
        self.tax_amount = tax_amount;
        self.total = total;
        true
    }

    /// Trade groups to display, in order: master-data groups first, then
    /// any group name found only on items (legacy data is tolerated, never
    /// a validation failure).
    #[must_use]
    pub fn display_groups(&self, master: &MasterData) -> Vec<String> {
        let mut groups: Vec<String> = master
            .groups
            .iter()
            .map(|group| group.name.clone())
            .collect();
        for item in &self.items {
            if !groups.iter().any(|name| name == &item.group) {
                groups.push(item.group.clone());
            }
        }
        groups
    }

    /// Items belonging to one trade group, in insertion order.
    pub fn items_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a LineItem> {
        self.items.iter().filter(move |item| item.group == group)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbers::approx_eq;

    fn draft(group: &str, quantity: f64, unit_price: f64) -> ItemDraft {
        ItemDraft {
            group: group.to_string(),
            category: "Albañilería".to_string(),
            description: "Partida".to_string(),
            quantity,
            unit_price,
            cost_price: None,
        }
    }

    fn assert_consistent(budget: &Budget) {
        let expected: f64 = budget.items.iter().map(|item| item.amount).sum();
        assert!(approx_eq(budget.subtotal, expected));
        assert!(approx_eq(budget.tax_amount, budget.subtotal * budget.tax_rate));
        assert!(approx_eq(budget.total, budget.subtotal + budget.tax_amount));
    }

    #[test]
    fn new_budget_is_an_empty_draft() {
        let budget = Budget::new();
        assert_eq!(budget.status, BudgetStatus::Draft);
        assert_eq!(budget.tax_rate, DEFAULT_TAX_RATE);
        assert!(budget.items.is_empty());
        assert_eq!(budget.total, 0.0);
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut budget = Budget::new();

        let id = budget.add_item(draft("OBRA CIVIL", 2.0, 100.0));
        assert_consistent(&budget);

        budget.add_item(draft("VARIOS", 1.0, 50.0));
        assert_consistent(&budget);

        budget.update_item(
            id,
            ItemPatch {
                unit_price: Some(120.0),
                ..ItemPatch::default()
            },
        );
        assert_consistent(&budget);

        budget.set_tax_rate(0.10);
        assert_consistent(&budget);

        budget.remove_item(id);
        assert_consistent(&budget);
    }

    #[test]
    fn quote_example_totals() {
        let mut budget = Budget::new();
        budget.add_item(draft("OBRA CIVIL", 2.0, 100.0));
        budget.add_item(draft("OBRA CIVIL", 1.0, 50.0));
        budget.set_tax_rate(0.21);

        assert!(approx_eq(budget.subtotal, 250.0));
        assert!(approx_eq(budget.tax_amount, 52.5));
        assert!(approx_eq(budget.total, 302.5));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut budget = Budget::new();
        budget.add_item(draft("OBRA CIVIL", 3.0, 33.33));

        assert!(!budget.recompute_totals());
        assert!(!budget.recompute_totals());
    }

    #[test]
    fn unknown_item_id_is_a_silent_noop() {
        let mut budget = Budget::new();
        budget.add_item(draft("OBRA CIVIL", 1.0, 10.0));
        let before = budget.clone();

        assert!(!budget.update_item(
            Uuid::new_v4(),
            ItemPatch {
                quantity: Some(9.0),
                ..ItemPatch::default()
            }
        ));
        assert!(!budget.remove_item(Uuid::new_v4()));
        assert_eq!(budget.items.len(), before.items.len());
        assert!(approx_eq(budget.total, before.total));
    }

    #[test]
    fn tax_rate_is_clamped_to_unit_interval() {
        let mut budget = Budget::new();
        budget.set_tax_rate(1.5);
        assert_eq!(budget.tax_rate, 1.0);
        budget.set_tax_rate(-0.2);
        assert_eq!(budget.tax_rate, 0.0);
    }

    #[test]
    fn legacy_groups_survive_in_display_order() {
        let master = MasterData::default();
        let mut budget = Budget::new();
        budget.add_item(draft("REFORMA 2019", 1.0, 10.0));

        let groups = budget.display_groups(&master);
        assert_eq!(groups[0], "OBRA CIVIL");
        assert!(groups.contains(&"REFORMA 2019".to_string()));
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            BudgetStatus::Draft,
            BudgetStatus::Pending,
            BudgetStatus::Accepted,
            BudgetStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BudgetStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<BudgetStatus>().is_err());
    }
}
