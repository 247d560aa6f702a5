//! Category service
//!
//! Business logic for the category catalog: the lenient resolve-or-create
//! paths used while recording entries, and the strict create/rename/delete
//! operations used for catalog management.

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, Subcategory, SubcategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// A category with its subcategories
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryWithSubcategories {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    // === Lenient operations ===

    /// Return the ID of the category named `name`, creating it when absent
    pub fn resolve_or_create_category(&self, name: &str) -> LedgerResult<CategoryId> {
        let name = validated_name(name)?;

        if let Some(existing) = self.storage.catalog.get_category_by_name(name)? {
            return Ok(existing.id);
        }

        let category = self.storage.catalog.insert_category(name)?;
        self.storage.catalog.save()?;
        info!(id = %category.id, name = %category.name, "created category");
        Ok(category.id)
    }

    /// Return the ID of the subcategory `name` under `category_id`, creating
    /// it when absent. An existing pair is returned unchanged.
    pub fn resolve_or_create_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> LedgerResult<SubcategoryId> {
        let name = validated_name(name)?;

        if self.storage.catalog.get_category(category_id)?.is_none() {
            return Err(LedgerError::category_not_found(category_id.to_string()));
        }

        if let Some(existing) = self.storage.catalog.get_subcategory(category_id, name)? {
            return Ok(existing.id);
        }

        let subcategory = self.storage.catalog.insert_subcategory(category_id, name)?;
        self.storage.catalog.save()?;
        info!(
            id = %subcategory.id,
            category_id = %category_id,
            name = %subcategory.name,
            "created subcategory"
        );
        Ok(subcategory.id)
    }

    // === Strict operations ===

    /// Create a category, failing if the name is taken
    pub fn create_category(&self, name: &str) -> LedgerResult<Category> {
        let name = validated_name(name)?;

        if self.storage.catalog.get_category_by_name(name)?.is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = self.storage.catalog.insert_category(name)?;
        self.storage.catalog.save()?;
        info!(id = %category.id, name = %category.name, "created category");
        Ok(category)
    }

    /// Add a subcategory under an existing category
    ///
    /// Fails with NotFound when the category is unknown and with Duplicate
    /// when the pair already exists.
    pub fn add_subcategory(&self, category_name: &str, name: &str) -> LedgerResult<Subcategory> {
        let name = validated_name(name)?;
        let category = self.require_category(category_name)?;

        if self
            .storage
            .catalog
            .get_subcategory(category.id, name)?
            .is_some()
        {
            return Err(LedgerError::Duplicate {
                entity_type: "Subcategory",
                identifier: format!("{}/{}", category.name, name),
            });
        }

        let subcategory = self.storage.catalog.insert_subcategory(category.id, name)?;
        self.storage.catalog.save()?;
        info!(
            id = %subcategory.id,
            category = %category.name,
            name = %subcategory.name,
            "created subcategory"
        );
        Ok(subcategory)
    }

    /// Rename a category
    ///
    /// Entries keep the name they were recorded with.
    pub fn rename_category(&self, current: &str, new_name: &str) -> LedgerResult<Category> {
        let new_name = validated_name(new_name)?;
        let mut category = self.require_category(current)?;

        if let Some(existing) = self.storage.catalog.get_category_by_name(new_name)? {
            if existing.id != category.id {
                return Err(LedgerError::Duplicate {
                    entity_type: "Category",
                    identifier: new_name.to_string(),
                });
            }
        }

        let old_name = std::mem::replace(&mut category.name, new_name.to_string());
        self.storage.catalog.upsert_category(category.clone())?;
        self.storage.catalog.save()?;
        info!(id = %category.id, from = %old_name, to = %category.name, "renamed category");
        Ok(category)
    }

    /// Delete a category. Its subcategories stay behind, orphaned.
    pub fn delete_category(&self, name: &str) -> LedgerResult<Category> {
        let category = self.require_category(name)?;

        self.storage.catalog.delete_category(category.id)?;
        self.storage.catalog.save()?;

        let orphaned = self
            .storage
            .catalog
            .get_orphaned_subcategories()?
            .iter()
            .filter(|s| s.category_id == category.id)
            .count();

        if orphaned > 0 {
            warn!(
                id = %category.id,
                name = %category.name,
                orphaned,
                "deleted category left subcategories without a parent"
            );
        } else {
            info!(id = %category.id, name = %category.name, "deleted category");
        }
        Ok(category)
    }

    // === Queries ===

    /// Find a category by exact name
    pub fn find_category(&self, name: &str) -> LedgerResult<Option<Category>> {
        self.storage.catalog.get_category_by_name(name.trim())
    }

    /// List all categories sorted by name
    pub fn list_categories(&self) -> LedgerResult<Vec<Category>> {
        self.storage.catalog.get_all_categories()
    }

    /// List all categories with their subcategories
    pub fn list_with_subcategories(&self) -> LedgerResult<Vec<CategoryWithSubcategories>> {
        let categories = self.storage.catalog.get_all_categories()?;
        let mut result = Vec::with_capacity(categories.len());

        for category in categories {
            let subcategories = self.storage.catalog.get_subcategories_of(category.id)?;
            result.push(CategoryWithSubcategories {
                category,
                subcategories,
            });
        }

        Ok(result)
    }

    /// Subcategory names of a category, sorted. Unknown categories have none.
    pub fn list_subcategories(&self, category_name: &str) -> LedgerResult<Vec<String>> {
        let Some(category) = self.find_category(category_name)? else {
            return Ok(Vec::new());
        };

        Ok(self
            .storage
            .catalog
            .get_subcategories_of(category.id)?
            .into_iter()
            .map(|s| s.name)
            .collect())
    }

    fn require_category(&self, name: &str) -> LedgerResult<Category> {
        self.find_category(name)?
            .ok_or_else(|| LedgerError::category_not_found(name.trim()))
    }
}

fn validated_name(name: &str) -> LedgerResult<&str> {
    let name = name.trim();
    Category::new(CategoryId::new(0), name)
        .validate()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_resolve_or_create_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let first = service.resolve_or_create_category("Pets").unwrap();
        let second = service.resolve_or_create_category(" Pets ").unwrap();
        assert_eq!(first, second);
        assert_eq!(storage.catalog.category_count().unwrap(), 1);

        let a = service.resolve_or_create_subcategory(first, "Vet").unwrap();
        let b = service.resolve_or_create_subcategory(first, "Vet").unwrap();
        assert_eq!(a, b);
        assert_eq!(storage.catalog.subcategory_count().unwrap(), 1);
    }

    #[test]
    fn test_resolve_subcategory_requires_parent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service
            .resolve_or_create_subcategory(CategoryId::new(42), "Vet")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.catalog.subcategory_count().unwrap(), 0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let upper = service.resolve_or_create_category("Food").unwrap();
        let lower = service.resolve_or_create_category("food").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_create_category_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create_category("Food").unwrap();
        let err = service.create_category("Food").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(storage.catalog.category_count().unwrap(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert!(service.create_category("   ").unwrap_err().is_validation());
        assert!(service
            .resolve_or_create_category("")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_add_subcategory_strict() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.add_subcategory("Nowhere", "Snacks").unwrap_err();
        assert!(err.is_not_found());

        service.create_category("Food").unwrap();
        service.add_subcategory("Food", "Snacks").unwrap();
        let err = service.add_subcategory("Food", "Snacks").unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(storage.catalog.subcategory_count().unwrap(), 1);
    }

    #[test]
    fn test_list_subcategories_sorted() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create_category("Food").unwrap();
        service.add_subcategory("Food", "Snacks").unwrap();
        service.add_subcategory("Food", "Beverages").unwrap();
        service.add_subcategory("Food", "Groceries").unwrap();

        assert_eq!(
            service.list_subcategories("Food").unwrap(),
            vec!["Beverages", "Groceries", "Snacks"]
        );
        assert!(service.list_subcategories("Unknown").unwrap().is_empty());
    }

    #[test]
    fn test_rename_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create_category("Food").unwrap();
        service.create_category("Bills").unwrap();

        let renamed = service.rename_category("Food", "Groceries").unwrap();
        assert_eq!(renamed.name, "Groceries");
        assert!(service.find_category("Food").unwrap().is_none());

        let err = service.rename_category("Groceries", "Bills").unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_delete_category_orphans_subcategories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create_category("Food").unwrap();
        service.add_subcategory("Food", "Snacks").unwrap();

        service.delete_category("Food").unwrap();
        assert!(service.find_category("Food").unwrap().is_none());
        assert_eq!(storage.catalog.subcategory_count().unwrap(), 1);
        assert!(service.delete_category("Food").unwrap_err().is_not_found());
    }
}
