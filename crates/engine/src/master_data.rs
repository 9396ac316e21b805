//! Trade group / category registry used to classify line items.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    storage::{SlotStore, read_slot, write_slot},
};

pub const MASTER_DATA_KEY: &str = "master_data";

/// A trade group and its sub-trade categories.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupCategory {
    pub name: String,
    pub categories: Vec<String>,
}

/// The two-level classification master list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MasterData {
    pub groups: Vec<GroupCategory>,
}

impl Default for MasterData {
    fn default() -> Self {
        let group = |name: &str, categories: &[&str]| GroupCategory {
            name: name.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
        };

        Self {
            groups: vec![
                group(
                    "OBRA CIVIL",
                    &[
                        "Albañilería",
                        "Demoliciones",
                        "Fontanería",
                        "Electricidad",
                        "Carpintería Metálica",
                        "Carpintería Madera",
                    ],
                ),
                group(
                    "DECORACION",
                    &[
                        "Mobiliario Cocina",
                        "Mobiliario Baño",
                        "Iluminación",
                        "Textil",
                        "Pintura Decorativa",
                    ],
                ),
                group("VARIOS", &["Limpieza", "Transporte", "Tasas", "Otros"]),
            ],
        }
    }
}

impl MasterData {
    /// Adds a group; an existing name is left untouched.
    pub fn add_group(&mut self, name: &str) {
        if self.groups.iter().any(|group| group.name == name) {
            return;
        }
        self.groups.push(GroupCategory {
            name: name.to_string(),
            categories: Vec::new(),
        });
    }

    /// Removes a group by name; `false` when absent.
    pub fn remove_group(&mut self, name: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.name != name);
        self.groups.len() != before
    }

    /// Adds a category to a group; duplicates and unknown groups are
    /// ignored.
    pub fn add_category(&mut self, group_name: &str, category: &str) {
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.name == group_name)
            && !group.categories.iter().any(|c| c == category)
        {
            group.categories.push(category.to_string());
        }
    }

    /// Removes a category from a group; `false` when nothing matched.
    pub fn remove_category(&mut self, group_name: &str, category: &str) -> bool {
        let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.name == group_name)
        else {
            return false;
        };
        let before = group.categories.len();
        group.categories.retain(|c| c != category);
        group.categories.len() != before
    }

    /// Categories of one group, when it exists.
    #[must_use]
    pub fn categories_of(&self, group_name: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|group| group.name == group_name)
            .map(|group| group.categories.as_slice())
    }
}

/// Persistence for the single master-data slot.
#[derive(Debug)]
pub struct MasterDataStore<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> MasterDataStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the master list; a missing or corrupt slot yields the seeded
    /// default groups.
    #[must_use]
    pub fn load(&self) -> MasterData {
        read_slot(&self.store, MASTER_DATA_KEY)
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to read master data");
                None
            })
            .unwrap_or_default()
    }

    pub fn save(&self, data: &MasterData) -> Result<(), EngineError> {
        write_slot(&self.store, MASTER_DATA_KEY, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_seed_three_groups() {
        let data = MasterData::default();
        let names: Vec<&str> = data.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["OBRA CIVIL", "DECORACION", "VARIOS"]);
        assert!(data.categories_of("VARIOS").unwrap().contains(&"Otros".to_string()));
    }

    #[test]
    fn group_and_category_ops() {
        let mut data = MasterData::default();

        data.add_group("EXTERIORES");
        data.add_group("EXTERIORES"); // duplicate ignored
        assert_eq!(data.groups.len(), 4);

        data.add_category("EXTERIORES", "Jardinería");
        data.add_category("EXTERIORES", "Jardinería");
        assert_eq!(data.categories_of("EXTERIORES").unwrap().len(), 1);

        assert!(data.remove_category("EXTERIORES", "Jardinería"));
        assert!(!data.remove_category("EXTERIORES", "Jardinería"));
        assert!(data.remove_group("EXTERIORES"));
        assert!(!data.remove_group("EXTERIORES"));
    }

    #[test]
    fn store_round_trip() {
        let store = MasterDataStore::new(MemoryStore::default());
        let mut data = MasterData::default();
        data.add_group("EXTERIORES");
        store.save(&data).unwrap();

        assert_eq!(store.load().groups.len(), 4);
    }
}
