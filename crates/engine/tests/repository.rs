//! Two-tier repository behavior: remote primary, local mirror fallback.

use std::sync::Mutex;

use uuid::Uuid;

use engine::{
    Budget, BudgetCollection, BudgetRepository, ItemDraft, MIRROR_KEY, MemoryStore,
    RemoteCollection, RemoteError,
};

/// Remote stub that always fails with the configured error.
struct DownRemote;

impl RemoteCollection for DownRemote {
    async fn list(&self) -> Result<Vec<Budget>, RemoteError> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _id: Uuid) -> Result<Budget, RemoteError> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }

    async fn upsert(&self, _budget: &Budget) -> Result<(), RemoteError> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RemoteError> {
        Err(RemoteError::Unavailable("connection refused".to_string()))
    }
}

/// Remote stub backed by a plain in-memory list.
#[derive(Default)]
struct FakeRemote {
    budgets: Mutex<Vec<Budget>>,
}

impl FakeRemote {
    fn with(budgets: Vec<Budget>) -> Self {
        Self {
            budgets: Mutex::new(budgets),
        }
    }
}

impl RemoteCollection for FakeRemote {
    async fn list(&self) -> Result<Vec<Budget>, RemoteError> {
        Ok(self.budgets.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Budget, RemoteError> {
        self.budgets
            .lock()
            .unwrap()
            .iter()
            .find(|budget| budget.id == id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn upsert(&self, budget: &Budget) -> Result<(), RemoteError> {
        let mut budgets = self.budgets.lock().unwrap();
        budgets.retain(|b| b.id != budget.id);
        budgets.push(budget.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RemoteError> {
        self.budgets.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}

fn mirror() -> BudgetCollection<MemoryStore> {
    BudgetCollection::new(MemoryStore::default(), MIRROR_KEY)
}

fn budget(number: &str) -> Budget {
    let mut budget = Budget::new();
    budget.number = number.to_string();
    budget.add_item(ItemDraft {
        group: "OBRA CIVIL".to_string(),
        category: "Albañilería".to_string(),
        description: "Partida".to_string(),
        quantity: 2.0,
        unit_price: 100.0,
        cost_price: None,
    });
    budget
}

#[tokio::test]
async fn failing_remote_falls_back_to_mirror() {
    let mirror = mirror();
    let local = budget("2026-001");
    mirror.upsert(&local).unwrap();

    let repository = BudgetRepository::new(DownRemote, mirror);
    let budgets = repository.get_all().await.unwrap();

    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].id, local.id);
}

#[tokio::test]
async fn empty_remote_also_falls_back_to_mirror() {
    let mirror = mirror();
    let local = budget("2026-002");
    mirror.upsert(&local).unwrap();

    let repository = BudgetRepository::new(FakeRemote::default(), mirror);
    let budgets = repository.get_all().await.unwrap();

    // A reachable-but-empty remote is treated like an unreachable one.
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].id, local.id);
}

#[tokio::test]
async fn populated_remote_wins_over_mirror() {
    let mirror = mirror();
    mirror.upsert(&budget("local-only")).unwrap();

    let remote_budget = budget("2026-003");
    let repository = BudgetRepository::new(FakeRemote::with(vec![remote_budget.clone()]), mirror);

    let budgets = repository.get_all().await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].id, remote_budget.id);
}

#[tokio::test]
async fn save_reaches_mirror_even_when_remote_rejects() {
    let repository = BudgetRepository::new(DownRemote, mirror());
    let saved = budget("2026-004");

    repository.save(&saved).await.unwrap();

    let found = repository.get_by_id(saved.id).await.unwrap();
    assert_eq!(found.map(|b| b.id), Some(saved.id));
}

#[tokio::test]
async fn get_by_id_searches_mirror_on_remote_miss() {
    let mirror = mirror();
    let local = budget("2026-005");
    mirror.upsert(&local).unwrap();

    // Remote is reachable but does not know this budget.
    let repository = BudgetRepository::new(FakeRemote::default(), mirror);
    let found = repository.get_by_id(local.id).await.unwrap();
    assert_eq!(found.map(|b| b.id), Some(local.id));

    let missing = repository.get_by_id(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_clears_mirror_despite_remote_failure() {
    let mirror = mirror();
    let local = budget("2026-006");
    mirror.upsert(&local).unwrap();

    let repository = BudgetRepository::new(DownRemote, mirror);
    assert!(repository.delete(local.id).await.unwrap());
    assert!(repository.get_by_id(local.id).await.unwrap().is_none());
}

#[tokio::test]
async fn save_synchronizes_both_tiers_when_remote_is_up() {
    let remote = FakeRemote::default();
    let saved = budget("2026-007");

    let repository = BudgetRepository::new(remote, mirror());
    repository.save(&saved).await.unwrap();

    // The remote copy now answers get_by_id directly.
    let found = repository.get_by_id(saved.id).await.unwrap();
    assert_eq!(found.map(|b| b.number), Some("2026-007".to_string()));
}
