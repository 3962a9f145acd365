//! Post aggregate repository

use pressroom_common::Result;
use pressroom_store::MemoryStore;

use crate::domain::entities::{Post, PostId, VersionId};

#[derive(Clone)]
pub struct PostRepository {
    store: MemoryStore<Post>,
}

impl PostRepository {
    pub fn new(store: MemoryStore<Post>) -> Self {
        Self { store }
    }

    /// Find post by ID
    ///
    /// A row with no versions yet is still being created and is not
    /// visible to readers.
    pub async fn find(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.store.get(id).filter(|post| !post.version_ids.is_empty()))
    }

    /// List all posts in id order, skipping rows whose first version has
    /// not been appended yet
    pub async fn list(&self) -> Result<Vec<Post>> {
        Ok(self
            .store
            .list()
            .into_iter()
            .filter(|post| !post.version_ids.is_empty())
            .collect())
    }

    /// Insert a new post built from a store-allocated id
    pub async fn create_with(&self, build: impl FnOnce(PostId) -> Post) -> Result<Post> {
        Ok(self.store.insert_with(build))
    }

    /// Append a freshly created version to the post's history and make
    /// it current
    pub async fn append_version(&self, id: PostId, version_id: VersionId) -> Result<Option<Post>> {
        Ok(self.store.update(id, |post| {
            post.version_ids.push(version_id);
            post.current_version_id = version_id;
            post.clone()
        }))
    }

    /// Move the current pointer to an existing version without touching
    /// the history (rollback semantics — the version is reused, not
    /// re-appended)
    pub async fn set_current(&self, id: PostId, version_id: VersionId) -> Result<Option<Post>> {
        Ok(self.store.update(id, |post| {
            debug_assert!(post.version_ids.contains(&version_id));
            post.current_version_id = version_id;
            post.clone()
        }))
    }

    /// Delete a post row; returns whether a row existed
    pub async fn delete(&self, id: PostId) -> Result<bool> {
        Ok(self.store.remove(id))
    }
}
