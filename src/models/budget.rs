//! Budget model
//!
//! A single overall spending budget. Setting it replaces the previous value;
//! no history is kept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

/// The current budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total_budget: Money,

    /// When the budget was last set
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(total_budget: Money) -> Self {
        Self {
            total_budget,
            updated_at: Utc::now(),
        }
    }
}
