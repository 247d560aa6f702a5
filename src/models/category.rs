//! Category and Subcategory models
//!
//! The catalog is a suggestion list for entry forms. Expense entries copy the
//! category and subcategory names as plain text, so nothing here constrains
//! what an entry may cite.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ids::{CategoryId, SubcategoryId};

/// Maximum length for category and subcategory names
pub const MAX_NAME_LEN: usize = 100;

/// A top-level expense category (e.g., "Food", "Bills")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (unique across the catalog)
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A subcategory owned by exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Unique identifier
    pub id: SubcategoryId,

    /// The owning category. May dangle after the category is deleted.
    pub category_id: CategoryId,

    /// Subcategory name (unique within its category)
    pub name: String,
}

impl Subcategory {
    pub fn new(id: SubcategoryId, category_id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            name: name.into(),
        }
    }

    /// Validate the subcategory
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(name.chars().count()));
    }

    Ok(())
}

/// Categories and subcategories seeded into a fresh catalog
pub const DEFAULT_CATALOG: &[(&str, &[&str])] = &[
    (
        "Food",
        &["Groceries", "Restaurants", "Fast Food", "Snacks", "Beverages"],
    ),
    (
        "Transport",
        &[
            "Fuel",
            "Public Transport",
            "Taxi/Uber",
            "Parking",
            "Vehicle Maintenance",
        ],
    ),
    (
        "Entertainment",
        &["Movies", "Games", "Sports", "Books", "Music"],
    ),
    (
        "Bills",
        &["Electricity", "Water", "Internet", "Phone", "Gas", "Insurance"],
    ),
    (
        "Shopping",
        &[
            "Clothing",
            "Electronics",
            "Home Items",
            "Personal Care",
            "Gifts",
        ],
    ),
    (
        "Savings",
        &["Emergency Fund", "Investment", "Fixed Deposit", "Mutual Funds"],
    ),
    ("Other", &["Medical", "Education", "Travel", "Miscellaneous"]),
];

/// Validation errors for catalog names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 100)")]
    NameTooLong(usize),
}
