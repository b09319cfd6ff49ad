use crate::client::WeightUnit;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-level settings carried across runs, separate from the book itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub weight_unit: WeightUnit,
    pub book_file: PathBuf,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kilogram,
            book_file: PathBuf::from("trainer-book.json"),
        }
    }
}
