//! JSON export/import of a whole budget.
//!
//! Export is the budget object verbatim. Import is deliberately lax: any
//! payload with line items and a client block loads as-is, so quotes can
//! be moved between installations without a schema version dance. The
//! shape check is the only validation; a rejection is user-visible and
//! leaves the current draft untouched.

use crate::{EngineError, budget::Budget};

/// Serializes the budget verbatim.
pub fn export_budget(budget: &Budget) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(budget)?)
}

/// Parses an exported budget.
///
/// Accepts any object carrying a non-empty `items` array and a `client`
/// object; everything else is rejected with [`EngineError::ImportRejected`].
pub fn import_budget(raw: &str) -> Result<Budget, EngineError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| EngineError::ImportRejected(format!("not valid JSON: {err}")))?;

    let has_items = value
        .get("items")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|items| !items.is_empty());
    let has_client = value.get("client").is_some_and(serde_json::Value::is_object);

    if !has_items || !has_client {
        return Err(EngineError::ImportRejected(
            "payload has no line items or no client data".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|err| EngineError::ImportRejected(format!("unreadable budget: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{item::ItemDraft, numbers::approx_eq};

    fn sample() -> Budget {
        let mut budget = Budget::new();
        budget.number = "2026-014".to_string();
        budget.client.name = "Comunidad García".to_string();
        budget.add_item(ItemDraft {
            group: "OBRA CIVIL".to_string(),
            category: "Electricidad".to_string(),
            description: "Cuadro eléctrico".to_string(),
            quantity: 1.0,
            unit_price: 480.0,
            cost_price: Some(310.0),
        });
        budget
    }

    #[test]
    fn export_import_round_trip() {
        let budget = sample();
        let raw = export_budget(&budget).unwrap();
        let imported = import_budget(&raw).unwrap();

        assert_eq!(imported.id, budget.id);
        assert_eq!(imported.items.len(), 1);
        assert!(approx_eq(imported.total, budget.total));
    }

    #[test]
    fn import_rejects_missing_shape() {
        assert!(matches!(
            import_budget("{}"),
            Err(EngineError::ImportRejected(_))
        ));
        assert!(matches!(
            import_budget("{\"items\": [], \"client\": {}}"),
            Err(EngineError::ImportRejected(_))
        ));
        assert!(matches!(
            import_budget("not json at all"),
            Err(EngineError::ImportRejected(_))
        ));
    }
}
