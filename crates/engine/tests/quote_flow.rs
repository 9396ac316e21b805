//! End-to-end quote flow: edit a draft, survive a reload, finalize
//! against a dead remote, export.

use uuid::Uuid;

use engine::{
    Budget, BudgetCollection, BudgetRepository, CompanyConfig, DraftStore, ItemDraft, MIRROR_KEY,
    MemoryStore, PrintableDocument, RemoteCollection, RemoteError, export,
    numbers::approx_eq,
};

struct OfflineRemote;

impl RemoteCollection for OfflineRemote {
    async fn list(&self) -> Result<Vec<Budget>, RemoteError> {
        Err(RemoteError::Unavailable("offline".to_string()))
    }

    async fn get(&self, _id: Uuid) -> Result<Budget, RemoteError> {
        Err(RemoteError::Unavailable("offline".to_string()))
    }

    async fn upsert(&self, _budget: &Budget) -> Result<(), RemoteError> {
        Err(RemoteError::Unavailable("offline".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RemoteError> {
        Err(RemoteError::Unavailable("offline".to_string()))
    }
}

fn item(quantity: f64, unit_price: f64) -> ItemDraft {
    ItemDraft {
        group: "OBRA CIVIL".to_string(),
        category: "Albañilería".to_string(),
        description: "Reforma de baño".to_string(),
        quantity,
        unit_price,
        cost_price: None,
    }
}

#[tokio::test]
async fn edit_reload_finalize_and_export() {
    let drafts = DraftStore::new(MemoryStore::default());

    // Edit session: two items at 21% VAT.
    let mut budget = drafts.load_or_create(None);
    budget.number = "2026-010".to_string();
    budget.client.name = "Comunidad García".to_string();
    budget.add_item(item(2.0, 100.0));
    budget.add_item(item(1.0, 50.0));
    drafts.save(&budget).unwrap();

    // Restart: the reloaded draft carries identical derived totals.
    let reloaded = drafts.load_or_create(None);
    assert_eq!(reloaded.id, budget.id);
    assert!(approx_eq(reloaded.subtotal, 250.0));
    assert!(approx_eq(reloaded.tax_amount, 52.5));
    assert!(approx_eq(reloaded.total, 302.5));

    // Finalize with the remote down: the mirror still records it.
    let repository = BudgetRepository::new(
        OfflineRemote,
        BudgetCollection::new(MemoryStore::default(), MIRROR_KEY),
    );
    repository.save(&reloaded).await.unwrap();
    let listed = repository.get_all().await.unwrap();
    assert_eq!(listed.len(), 1);

    // The JSON export round-trips through import.
    let raw = export::json::export_budget(&reloaded).unwrap();
    let imported = export::json::import_budget(&raw).unwrap();
    assert!(approx_eq(imported.total, 302.5));

    // Spreadsheet and printable views agree on the totals.
    let company = CompanyConfig::default();
    let sheet = export::sheet::export_sheet(&reloaded, &company).unwrap();
    assert!(sheet.contains("TOTAL:,302.50"));

    let document = PrintableDocument::assemble(&reloaded, &company);
    assert!(approx_eq(document.total, 302.5));
    assert!(approx_eq(document.payment_schedule[0].amount.unwrap(), 151.25));
}
