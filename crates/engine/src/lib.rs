//! Core of presu: budget computation and synchronization.
//!
//! The engine owns the quote math (line items, derived totals, the
//! recompute rules), the configuration slots (company identity, trade
//! groups), the durable working draft, and the two-tier repository that
//! keeps finalized budgets on a remote service with a local mirror as the
//! durability guarantee. Rendering and transport live in the other
//! workspace crates.

pub use budget::{Budget, BudgetStatus, DEFAULT_TAX_RATE, TAX_RATES};
pub use client::{Client, ClientField};
pub use collection::{BudgetCollection, MIRROR_KEY};
pub use company::{CompanyConfig, CompanyStore};
pub use draft::{DRAFT_KEY, DraftStore};
pub use error::EngineError;
pub use item::{ItemDraft, ItemPatch, LineItem};
pub use master_data::{GroupCategory, MasterData, MasterDataStore};
pub use repository::{BudgetRepository, RemoteCollection, RemoteError};
pub use storage::{JsonFileStore, MemoryStore, SlotStore};

mod budget;
pub mod client;
mod collection;
mod company;
mod draft;
mod error;
pub mod export;
mod item;
mod master_data;
pub mod numbers;
pub mod payment_terms;
mod repository;
mod storage;

pub use export::document::PrintableDocument;
