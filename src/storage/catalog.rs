//! Category catalog repository for JSON storage
//!
//! Manages loading and saving categories and subcategories to catalog.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Category, CategoryId, Subcategory, SubcategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

/// Serializable catalog file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub next_category_id: u64,
    #[serde(default)]
    pub next_subcategory_id: u64,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Default)]
struct CatalogState {
    next_category_id: u64,
    next_subcategory_id: u64,
    categories: BTreeMap<CategoryId, Category>,
    subcategories: BTreeMap<SubcategoryId, Subcategory>,
}

impl CatalogState {
    fn allocate_category_id(&mut self) -> CategoryId {
        let floor = self.categories.keys().next_back().map_or(0, |id| id.get());
        self.next_category_id = self.next_category_id.max(floor) + 1;
        CategoryId::new(self.next_category_id)
    }

    fn allocate_subcategory_id(&mut self) -> SubcategoryId {
        let floor = self.subcategories.keys().next_back().map_or(0, |id| id.get());
        self.next_subcategory_id = self.next_subcategory_id.max(floor) + 1;
        SubcategoryId::new(self.next_subcategory_id)
    }
}

/// Repository for category and subcategory persistence
pub struct CatalogRepository {
    path: PathBuf,
    state: RwLock<CatalogState>,
}

impl CatalogRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Load the catalog from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: CatalogData = read_json(&self.path)?;
        let mut state = self.state.write().map_err(poisoned)?;

        *state = CatalogState {
            next_category_id: file_data.next_category_id,
            next_subcategory_id: file_data.next_subcategory_id,
            categories: file_data
                .categories
                .into_iter()
                .map(|c| (c.id, c))
                .collect(),
            subcategories: file_data
                .subcategories
                .into_iter()
                .map(|s| (s.id, s))
                .collect(),
        };

        Ok(())
    }

    /// Save the catalog to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let state = self.state.read().map_err(poisoned)?;

        let file_data = CatalogData {
            next_category_id: state.next_category_id,
            next_subcategory_id: state.next_subcategory_id,
            categories: state.categories.values().cloned().collect(),
            subcategories: state.subcategories.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    // Category operations

    pub fn get_category(&self, id: CategoryId) -> Result<Option<Category>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.categories.get(&id).cloned())
    }

    /// Get a category by exact name
    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.categories.values().find(|c| c.name == name).cloned())
    }

    /// Get all categories sorted by name
    pub fn get_all_categories(&self) -> Result<Vec<Category>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        let mut list: Vec<_> = state.categories.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Insert a new category under a freshly allocated ID
    pub fn insert_category(&self, name: &str) -> Result<Category, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        let category = Category::new(state.allocate_category_id(), name);
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Insert or replace a category under its existing ID
    pub fn upsert_category(&self, category: Category) -> Result<(), LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category. Its subcategories are left in place.
    pub fn delete_category(&self, id: CategoryId) -> Result<bool, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.categories.remove(&id).is_some())
    }

    // Subcategory operations

    /// Find a subcategory by owning category and exact name
    pub fn get_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> Result<Option<Subcategory>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .subcategories
            .values()
            .find(|s| s.category_id == category_id && s.name == name)
            .cloned())
    }

    /// Get the subcategories of a category sorted by name
    pub fn get_subcategories_of(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Subcategory>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        let mut list: Vec<_> = state
            .subcategories
            .values()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Subcategories whose owning category no longer exists
    pub fn get_orphaned_subcategories(&self) -> Result<Vec<Subcategory>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .subcategories
            .values()
            .filter(|s| !state.categories.contains_key(&s.category_id))
            .cloned()
            .collect())
    }

    /// Insert a new subcategory under a freshly allocated ID
    pub fn insert_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> Result<Subcategory, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        let subcategory = Subcategory::new(state.allocate_subcategory_id(), category_id, name);
        state
            .subcategories
            .insert(subcategory.id, subcategory.clone());
        Ok(subcategory)
    }

    pub fn category_count(&self) -> Result<usize, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.categories.len())
    }

    pub fn subcategory_count(&self) -> Result<usize, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.subcategories.len())
    }
}
