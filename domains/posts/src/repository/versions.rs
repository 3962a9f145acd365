//! Version snapshot repository
//!
//! Owns the version-chain responsibility: allocating the next version
//! number for a post and resolving a `(post_id, version_number)` pair to
//! a snapshot. Lookups by number are linear scans over the post's
//! versions; per-post histories are small.
//!
//! Snapshots are immutable here except through two narrow doors the
//! engine uses for its documented exceptions: `set_status` and the
//! category-pruning mutators.

use chrono::Utc;

use pressroom_categories::CategoryId;
use pressroom_common::Result;
use pressroom_store::MemoryStore;

use crate::domain::entities::{PostContent, PostId, PostVersion, VersionId};
use crate::domain::state::VersionStatus;

#[derive(Clone)]
pub struct VersionRepository {
    store: MemoryStore<PostVersion>,
}

impl VersionRepository {
    pub fn new(store: MemoryStore<PostVersion>) -> Self {
        Self { store }
    }

    /// Find version by ID
    pub async fn find(&self, id: VersionId) -> Result<Option<PostVersion>> {
        Ok(self.store.get(id))
    }

    /// Create a snapshot from validated content; new versions always
    /// start at `Draft`
    pub async fn create(
        &self,
        post_id: PostId,
        version_number: u32,
        content: PostContent,
    ) -> Result<PostVersion> {
        Ok(self.store.insert_with(|id| PostVersion {
            id,
            post_id,
            version_number,
            title: content.title.clone(),
            author: content.author.clone(),
            body: content.body.clone(),
            status: VersionStatus::Draft,
            category_ids: content.category_ids.clone(),
            created_at: Utc::now(),
        }))
    }

    /// Every version of a post in creation order
    pub async fn list_by_post(&self, post_id: PostId) -> Result<Vec<PostVersion>> {
        let mut versions: Vec<_> = self
            .store
            .list()
            .into_iter()
            .filter(|v| v.post_id == post_id)
            .collect();
        versions.sort_by_key(|v| v.version_number);
        Ok(versions)
    }

    /// Resolve a version number within a post's history
    pub async fn find_by_number(
        &self,
        post_id: PostId,
        version_number: u32,
    ) -> Result<Option<PostVersion>> {
        Ok(self
            .store
            .list()
            .into_iter()
            .find(|v| v.post_id == post_id && v.version_number == version_number))
    }

    /// Next version number for a post: `max(existing) + 1`, 1 for a new
    /// post
    pub async fn next_version_number(&self, post_id: PostId) -> Result<u32> {
        let max = self
            .store
            .list()
            .into_iter()
            .filter(|v| v.post_id == post_id)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }

    /// Set the status of an existing snapshot (the one mutable field)
    pub async fn set_status(
        &self,
        id: VersionId,
        status: VersionStatus,
    ) -> Result<Option<PostVersion>> {
        Ok(self.store.update(id, |version| {
            version.status = status;
            version.clone()
        }))
    }

    /// Remove a single category reference from a snapshot
    /// (current-version reconciliation after a category deletion)
    pub async fn remove_category(
        &self,
        id: VersionId,
        category_id: CategoryId,
    ) -> Result<Option<PostVersion>> {
        Ok(self.store.update(id, |version| {
            version.category_ids.retain(|c| *c != category_id);
            version.clone()
        }))
    }

    /// Replace a snapshot's category set (rollback-time pruning of
    /// references that no longer resolve)
    pub async fn replace_categories(
        &self,
        id: VersionId,
        category_ids: Vec<CategoryId>,
    ) -> Result<Option<PostVersion>> {
        Ok(self.store.update(id, |version| {
            version.category_ids = category_ids;
            version.clone()
        }))
    }

    /// Delete every version belonging to a post, returning how many were
    /// removed
    pub async fn delete_by_post(&self, post_id: PostId) -> Result<usize> {
        Ok(self.store.remove_where(|v| v.post_id == post_id))
    }
}
