//! Issuer configuration: the contractor's own identity block, printed on
//! every exported document.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    storage::{SlotStore, read_slot, write_slot},
};

pub const COMPANY_KEY: &str = "company_config";

/// Company identity and document defaults.
///
/// `logo_url`/`seal_url` hold inline data-URLs so the whole configuration
/// lives in one slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seal_url: Option<String>,
    pub default_notes: String,
    pub payment_terms: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            tax_id: String::new(),
            logo_url: None,
            seal_url: None,
            default_notes: "El presupuesto tiene una validez de 30 días.\n\
                            Forma de pago: 50% al aceptar, 50% al finalizar."
                .to_string(),
            payment_terms: "50% A la aceptación del presupuesto\n\
                            50% A la finalización de los trabajos"
                .to_string(),
        }
    }
}

/// Persistence for the single company-config slot.
#[derive(Debug)]
pub struct CompanyStore<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> CompanyStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the configuration; a missing or corrupt slot yields defaults.
    #[must_use]
    pub fn load(&self) -> CompanyConfig {
        read_slot(&self.store, COMPANY_KEY)
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to read company config");
                None
            })
            .unwrap_or_default()
    }

    pub fn save(&self, config: &CompanyConfig) -> Result<(), EngineError> {
        write_slot(&self.store, COMPANY_KEY, config)
    }
}
