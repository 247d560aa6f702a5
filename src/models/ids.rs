//! Strongly-typed ID wrappers for all entity types
//!
//! IDs are sequential integers handed out by the owning repository, so newer
//! entries always carry larger IDs. Newtype wrappers prevent mixing up IDs
//! from different tables at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer ID
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the underlying integer
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts both the bare number ("42") and the display form ("exp-42")
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(LendBorrowId, "lb-");
define_id!(CategoryId, "cat-");
define_id!(SubcategoryId, "sub-");
