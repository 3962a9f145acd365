//! Category gateway consumed by other domains
//!
//! The posts engine never touches category rows directly; it reads
//! through [`CategoryGateway`] and learns about deletions through
//! [`CategoryDeletionListener`]. Both are traits so tests can substitute
//! stub implementations without a repository.

use async_trait::async_trait;

use pressroom_common::Result;

use crate::domain::entities::CategoryId;
use crate::repository::CategoryRepository;

/// Read-only view of the category collection
#[async_trait]
pub trait CategoryGateway: Send + Sync {
    /// Does a category with this id currently exist?
    async fn exists(&self, id: CategoryId) -> Result<bool>;

    /// Human-readable label for a category id, if it still resolves
    async fn display_name(&self, id: CategoryId) -> Result<Option<String>>;
}

/// Notification target invoked after a category row has been deleted
#[async_trait]
pub trait CategoryDeletionListener: Send + Sync {
    async fn category_deleted(&self, id: CategoryId) -> Result<()>;
}

/// Production gateway backed by the category repository
#[derive(Clone)]
pub struct RepositoryGateway {
    repo: CategoryRepository,
}

impl RepositoryGateway {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CategoryGateway for RepositoryGateway {
    async fn exists(&self, id: CategoryId) -> Result<bool> {
        Ok(self.repo.find(id).await?.is_some())
    }

    async fn display_name(&self, id: CategoryId) -> Result<Option<String>> {
        Ok(self.repo.find(id).await?.map(|category| category.name))
    }
}
