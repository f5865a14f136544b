//! Library configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Library identity and reporting settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Display name of the library
    pub name: String,

    /// Default row limit for ranking queries
    pub report_limit: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: "City Library".to_string(),
            report_limit: 5,
        }
    }
}

impl ConfigSection for LibraryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let results = vec![
            Validator::not_empty(&self.name, "library.name"),
            Validator::in_range(self.report_limit, 1, 100, "library.report_limit"),
        ];

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.name = other.name;
        self.report_limit = other.report_limit;
    }

    fn section_name(&self) -> &'static str {
        "library"
    }
}
