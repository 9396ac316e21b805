//! Command implementations, one module per surface.

use engine::{
    BudgetCollection, BudgetRepository, CompanyStore, DraftStore, JsonFileStore, MIRROR_KEY,
    MasterDataStore,
};

use crate::{client::HttpRemote, config::AppConfig, error::Result};

pub mod budget;
pub mod company;
pub mod export;
pub mod groups;
pub mod item;

/// Everything a command needs: the slot-backed stores and the two-tier
/// repository, all rooted in the configured data directory.
pub struct Context {
    pub drafts: DraftStore<JsonFileStore>,
    pub company: CompanyStore<JsonFileStore>,
    pub master: MasterDataStore<JsonFileStore>,
    pub repository: BudgetRepository<HttpRemote, JsonFileStore>,
    pub http: reqwest::Client,
}

impl Context {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store = JsonFileStore::new(config.data_dir.as_str());
        let remote = HttpRemote::new(&config.base_url, &config.username, &config.password)?;

        Ok(Self {
            drafts: DraftStore::new(store.clone()),
            company: CompanyStore::new(store.clone()),
            master: MasterDataStore::new(store.clone()),
            repository: BudgetRepository::new(remote, BudgetCollection::new(store, MIRROR_KEY)),
            http: reqwest::Client::new(),
        })
    }
}
