//! Storage initialization
//!
//! Handles first-run setup and the default catalog

use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::DEFAULT_CATALOG;

use super::catalog::CatalogRepository;

/// Initialize storage for a fresh installation
///
/// Seeds the default catalog unless catalog.json already exists. Existing
/// catalogs are never touched, so re-running this is harmless.
pub fn initialize_storage(paths: &LedgerPaths) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        seed_default_catalog(paths)?;
    }

    Ok(())
}

fn seed_default_catalog(paths: &LedgerPaths) -> Result<(), LedgerError> {
    let repo = CatalogRepository::new(paths.catalog_file());

    for (name, subcategories) in DEFAULT_CATALOG {
        let category = repo.insert_category(name)?;
        for sub in subcategories.iter() {
            repo.insert_subcategory(category.id, sub)?;
        }
    }

    repo.save()?;
    info!(
        categories = DEFAULT_CATALOG.len(),
        "seeded default category catalog"
    );
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &LedgerPaths) -> bool {
    !paths.catalog_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_seeds_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        let repo = CatalogRepository::new(paths.catalog_file());
        repo.load().unwrap();
        assert_eq!(repo.category_count().unwrap(), 7);

        let food = repo.get_category_by_name("Food").unwrap().unwrap();
        let subs = repo.get_subcategories_of(food.id).unwrap();
        assert!(subs.iter().any(|s| s.name == "Groceries"));
    }

    #[test]
    fn test_initialize_keeps_existing_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let repo = CatalogRepository::new(paths.catalog_file());
        repo.insert_category("Pets").unwrap();
        repo.save().unwrap();

        initialize_storage(&paths).unwrap();

        let repo = CatalogRepository::new(paths.catalog_file());
        repo.load().unwrap();
        assert_eq!(repo.category_count().unwrap(), 1);
    }
}
