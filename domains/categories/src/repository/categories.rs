//! Category repository

use pressroom_common::Result;
use pressroom_store::MemoryStore;

use crate::domain::entities::{Category, CategoryId, NewCategory};

#[derive(Clone)]
pub struct CategoryRepository {
    store: MemoryStore<Category>,
}

impl CategoryRepository {
    pub fn new(store: MemoryStore<Category>) -> Self {
        Self { store }
    }

    /// Find category by ID
    pub async fn find(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.store.get(id))
    }

    /// List all categories in id order
    pub async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.store.list())
    }

    /// Create a new category with a store-allocated id
    pub async fn create(&self, new: NewCategory) -> Result<Category> {
        Ok(self.store.insert_with(|id| new.into_category(id)))
    }

    /// Replace name and description of an existing category
    pub async fn update(&self, id: CategoryId, new: NewCategory) -> Result<Option<Category>> {
        Ok(self.store.update(id, |category| {
            category.name = new.name;
            category.description = new.description;
            category.clone()
        }))
    }

    /// Partially update an existing category; fields left `None` are kept
    pub async fn patch(
        &self,
        id: CategoryId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Category>> {
        Ok(self.store.update(id, |category| {
            if let Some(name) = name {
                category.name = name;
            }
            if let Some(description) = description {
                category.description = Some(description);
            }
            category.clone()
        }))
    }

    /// Delete a category; returns whether a row existed
    pub async fn delete(&self, id: CategoryId) -> Result<bool> {
        Ok(self.store.remove(id))
    }
}
