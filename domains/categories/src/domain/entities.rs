//! Domain entities for the Categories domain

use serde::{Deserialize, Serialize};

use pressroom_common::{Error, Result};

/// Store-allocated category identifier
pub type CategoryId = pressroom_store::Id;

/// Maximum category name length
const MAX_NAME_LENGTH: usize = 100;

/// Maximum category description length
const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// Validated input for creating or replacing a category.
///
/// The id is allocated by the store at insertion time, so the entity
/// constructor can't run until then; this type carries the already
/// validated fields up to that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    /// Validate and build category input
    pub fn new(name: String, description: Option<String>) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Category name is required".to_string()));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::Validation(format!(
                "Category name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if let Some(ref d) = description {
            if d.len() > MAX_DESCRIPTION_LENGTH {
                return Err(Error::Validation(format!(
                    "Category description must be at most {} characters",
                    MAX_DESCRIPTION_LENGTH
                )));
            }
        }

        Ok(Self { name, description })
    }

    /// Build the stored entity once the store has allocated an id
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}
