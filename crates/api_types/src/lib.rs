//! Wire types shared by the budgets service and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod budget {
    use super::*;

    /// Condensed view of a budget, used by list displays.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BudgetSummary {
        pub id: Uuid,
        pub number: String,
        pub client_name: String,
        pub date: DateTime<Utc>,
        pub total: f64,
        /// Status label (`draft`, `pending`, `accepted`, `rejected`).
        pub status: String,
    }
}

pub mod error {
    use super::*;

    /// JSON error envelope of the budgets service.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
    }
}
