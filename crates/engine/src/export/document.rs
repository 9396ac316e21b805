//! Printable-document assembly.
//!
//! Builds the read-only data a page renderer consumes: issuer and client
//! blocks, items grouped by category, totals, the payment schedule and the
//! notes page. Layout and styling belong to the renderer, not here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    budget::Budget,
    client::Client,
    company::CompanyConfig,
    payment_terms::{self, PaymentLine},
};

/// One item row of the printable table.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentLine {
    pub description: String,
    pub quantity: f64,
    pub amount: f64,
}

/// Items of one category, in insertion order.
#[derive(Clone, Debug, Serialize)]
pub struct CategorySection {
    pub category: String,
    pub lines: Vec<DocumentLine>,
}

/// Everything a page renderer needs, read-only.
#[derive(Clone, Debug, Serialize)]
pub struct PrintableDocument {
    pub number: String,
    pub date: DateTime<Utc>,
    pub issuer: CompanyConfig,
    pub client: Client,
    pub sections: Vec<CategorySection>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub payment_schedule: Vec<PaymentLine>,
    /// Budget notes, falling back to the company default text.
    pub notes: String,
    pub has_seal: bool,
    pub client_signature: Option<String>,
}

impl PrintableDocument {
    /// Assembles the printable view of a budget.
    ///
    /// Items are grouped by category in first-appearance order; an item
    /// without a category lands under "Varios".
    #[must_use]
    pub fn assemble(budget: &Budget, company: &CompanyConfig) -> Self {
        let mut sections: Vec<CategorySection> = Vec::new();

        for item in &budget.items {
            let category = if item.category.is_empty() {
                "Varios"
            } else {
                item.category.as_str()
            };
            let line = DocumentLine {
                description: item.description.clone(),
                quantity: item.quantity,
                amount: item.amount,
            };

            match sections
                .iter_mut()
                .find(|section| section.category == category)
            {
                Some(section) => section.lines.push(line),
                None => sections.push(CategorySection {
                    category: category.to_string(),
                    lines: vec![line],
                }),
            }
        }

        let notes = if budget.notes.is_empty() {
            company.default_notes.clone()
        } else {
            budget.notes.clone()
        };

        Self {
            number: budget.number.clone(),
            date: budget.date,
            issuer: company.clone(),
            client: budget.client.clone(),
            sections,
            subtotal: budget.subtotal,
            tax_rate: budget.tax_rate,
            tax_amount: budget.tax_amount,
            total: budget.total,
            payment_schedule: payment_terms::breakdown(&company.payment_terms, budget.total),
            notes,
            has_seal: company.seal_url.is_some(),
            client_signature: budget.client_signature.clone(),
        }
    }
}
