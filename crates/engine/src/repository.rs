//! The finalized-budget repository: remote primary, local mirror.
//!
//! The local mirror is the durability guarantee of record; the remote
//! collection is an optional synchronization target that must never block
//! or fail a user-visible operation. The whole fallback policy lives here,
//! not in the callers.

use uuid::Uuid;

use crate::{EngineError, budget::Budget, collection::BudgetCollection, storage::SlotStore};

/// Errors a remote budgets collection can produce.
///
/// These never cross the repository boundary: the repository logs them and
/// answers from the mirror.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("remote unavailable: {0}")]
    Unavailable(String),
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// A remote "budgets" collection, one document per budget keyed by id.
pub trait RemoteCollection {
    /// Lists all budgets, most recent date first.
    fn list(&self) -> impl Future<Output = Result<Vec<Budget>, RemoteError>>;

    /// Fetches one budget; absence is [`RemoteError::NotFound`].
    fn get(&self, id: Uuid) -> impl Future<Output = Result<Budget, RemoteError>>;

    /// Inserts or replaces one budget.
    fn upsert(&self, budget: &Budget) -> impl Future<Output = Result<(), RemoteError>>;

    /// Deletes one budget.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<(), RemoteError>>;
}

/// CRUD over finalized budgets with the two-tier storage policy.
#[derive(Debug)]
pub struct BudgetRepository<R, S: SlotStore> {
    remote: R,
    mirror: BudgetCollection<S>,
}

impl<R: RemoteCollection, S: SlotStore> BudgetRepository<R, S> {
    pub fn new(remote: R, mirror: BudgetCollection<S>) -> Self {
        Self { remote, mirror }
    }

    /// All finalized budgets.
    ///
    /// A remote answer wins, except that an *empty* remote result also
    /// falls back to the mirror: a reachable-but-empty collection is
    /// indistinguishable in practice from an unconfigured one, and the
    /// mirror is the safer answer. Deliberately conflated.
    pub async fn get_all(&self) -> Result<Vec<Budget>, EngineError> {
        match self.remote.list().await {
            Ok(budgets) if !budgets.is_empty() => Ok(budgets),
            Ok(_) => {
                tracing::warn!("remote returned no budgets, using local mirror");
                self.mirror.list()
            }
            Err(err) => {
                tracing::warn!(%err, "remote fetch failed, using local mirror");
                self.mirror.list()
            }
        }
    }

    /// One budget by id, trying the remote first, then the mirror.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Budget>, EngineError> {
        match self.remote.get(id).await {
            Ok(budget) => Ok(Some(budget)),
            Err(RemoteError::NotFound) => self.mirror.get(id),
            Err(err) => {
                tracing::warn!(%err, %id, "remote get failed, using local mirror");
                self.mirror.get(id)
            }
        }
    }

    /// Saves a budget: best-effort remote upsert, unconditional mirror
    /// upsert. The operation succeeds iff the mirror write succeeds.
    pub async fn save(&self, budget: &Budget) -> Result<(), EngineError> {
        if let Err(err) = self.remote.upsert(budget).await {
            tracing::warn!(%err, id = %budget.id, "remote save failed, keeping local copy");
        }
        self.mirror.upsert(budget)
    }

    /// Deletes a budget: best-effort remote delete, unconditional mirror
    /// removal. Returns whether the mirror held it.
    pub async fn delete(&self, id: Uuid) -> Result<bool, EngineError> {
        if let Err(err) = self.remote.delete(id).await {
            tracing::warn!(%err, %id, "remote delete failed");
        }
        self.mirror.remove(id)
    }
}
