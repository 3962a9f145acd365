//! Versioning engine for the Posts domain
//!
//! `VersioningService` owns every business rule: append-only version
//! chains, the single-live-published rule, rollback, and category
//! reconciliation. Handlers translate its results to HTTP; repositories
//! only move rows.
//!
//! Concurrency model: all mutations of one post run under that post's
//! async lock, so a pair of concurrent replaces can never allocate the
//! same version number or lose a pointer move. Operations on different
//! posts proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use async_trait::async_trait;
use pressroom_categories::{CategoryDeletionListener, CategoryGateway, CategoryId};
use pressroom_common::{Error, Result};

use crate::domain::entities::{NewPost, Post, PostId, PostPatch, PostVersion};
use crate::domain::state::VersionStatus;
use crate::repository::PostsRepositories;

pub struct VersioningService {
    repos: PostsRepositories,
    gateway: Arc<dyn CategoryGateway>,
    locks: Mutex<HashMap<PostId, Arc<AsyncMutex<()>>>>,
}

impl VersioningService {
    pub fn new(repos: PostsRepositories, gateway: Arc<dyn CategoryGateway>) -> Self {
        Self {
            repos,
            gateway,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new post with its first version (number 1, `Draft`)
    pub async fn create(&self, input: NewPost) -> Result<PostVersion> {
        let content = input.validate()?;
        self.check_categories(&content.category_ids).await?;

        // The row stays invisible to readers until version 1 is appended:
        // the repository filters out posts with an empty version list, so
        // no concurrent read can observe the aggregate mid-creation.
        let post = self
            .repos
            .posts
            .create_with(|id| Post {
                id,
                current_version_id: 0,
                version_ids: Vec::new(),
            })
            .await?;

        let version = self.repos.versions.create(post.id, 1, content).await?;
        self.repos.posts.append_version(post.id, version.id).await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(version)
    }

    /// Full replace: append a new version built entirely from `input`
    /// (no inheritance) and make it current.
    ///
    /// Outcome ordering matters: a missing post wins over bad fields,
    /// which win over unknown categories.
    pub async fn replace(&self, id: PostId, input: NewPost) -> Result<PostVersion> {
        let _guard = self.lock_post(id).await;

        self.require_post(id).await?;
        let content = input.validate()?;
        self.check_categories(&content.category_ids).await?;

        let number = self.repos.versions.next_version_number(id).await?;
        let version = self.repos.versions.create(id, number, content).await?;
        self.repos.posts.append_version(id, version.id).await?;

        tracing::info!(post_id = id, version_number = number, "Post replaced");
        Ok(version)
    }

    /// Partial replace: fields left unset are copied from the current
    /// version; only supplied category ids are validated. The new
    /// version starts at `Draft` regardless of the current status.
    pub async fn patch(&self, id: PostId, patch: PostPatch) -> Result<PostVersion> {
        let _guard = self.lock_post(id).await;

        let post = self.require_post(id).await?;
        let current = self.current_of(&post).await?;

        if patch.has_categories() {
            self.check_categories(patch.category_ids.as_deref().unwrap_or_default())
                .await?;
        }
        let content = patch.apply_to(&current);

        let number = self.repos.versions.next_version_number(id).await?;
        let version = self.repos.versions.create(id, number, content).await?;
        self.repos.posts.append_version(id, version.id).await?;

        tracing::info!(post_id = id, version_number = number, "Post patched");
        Ok(version)
    }

    /// Set the current version's status.
    ///
    /// Transitions are unconstrained between the three values; the one
    /// automatic rule is that publishing demotes every other published
    /// version of the post to `Archived`. The scan is unconditional even
    /// though at most one should ever be found.
    pub async fn set_status(&self, id: PostId, status: VersionStatus) -> Result<PostVersion> {
        let _guard = self.lock_post(id).await;

        let post = self.require_post(id).await?;
        let updated = self
            .repos
            .versions
            .set_status(post.current_version_id, status)
            .await?
            .ok_or_else(|| Error::Internal(format!("Current version of post {} missing", id)))?;

        if status == VersionStatus::Published {
            for version in self.repos.versions.list_by_post(id).await? {
                if version.id != updated.id && version.status == VersionStatus::Published {
                    self.repos
                        .versions
                        .set_status(version.id, VersionStatus::Archived)
                        .await?;
                }
            }
        }

        tracing::info!(post_id = id, status = %status, "Post status changed");
        Ok(updated)
    }

    /// Make a historical version current again.
    ///
    /// The target is forced to `Draft`, the version that was current is
    /// forced to `Archived`, and the pointer moves without re-appending
    /// the target to the history. Category ids on the target that no
    /// longer resolve are pruned; the rest of the history is left alone.
    pub async fn rollback(&self, id: PostId, target_number: u32) -> Result<PostVersion> {
        let _guard = self.lock_post(id).await;

        let post = self.require_post(id).await?;
        let target = self
            .repos
            .versions
            .find_by_number(id, target_number)
            .await?
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Post {} has no version {}",
                    id, target_number
                ))
            })?;

        // Resolve the pruning lookups before touching any state: a
        // gateway failure must leave the aggregate exactly as it was.
        let mut kept = Vec::with_capacity(target.category_ids.len());
        for category_id in &target.category_ids {
            if self.gateway.exists(*category_id).await? {
                kept.push(*category_id);
            }
        }

        // Archive the outgoing version first: rolling back to the
        // current version itself must still end at Draft.
        self.repos
            .versions
            .set_status(post.current_version_id, VersionStatus::Archived)
            .await?;
        self.repos
            .versions
            .set_status(target.id, VersionStatus::Draft)
            .await?;

        if kept.len() != target.category_ids.len() {
            tracing::debug!(
                post_id = id,
                version_number = target_number,
                pruned = target.category_ids.len() - kept.len(),
                "Pruned dangling category references during rollback"
            );
            self.repos
                .versions
                .replace_categories(target.id, kept)
                .await?;
        }

        self.repos.posts.set_current(id, target.id).await?;

        tracing::info!(post_id = id, version_number = target_number, "Post rolled back");
        self.repos
            .versions
            .find(target.id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Version {} vanished mid-rollback", target.id)))
    }

    /// Delete a post and its entire version history; returns whether
    /// anything existed to delete
    pub async fn delete(&self, id: PostId) -> Result<bool> {
        let _guard = self.lock_post(id).await;

        let deleted = self.repos.posts.delete(id).await?;
        if deleted {
            self.repos.versions.delete_by_post(id).await?;
            tracing::info!(post_id = id, "Post deleted");
        }

        // Ids are never reused, so the lock entry can go too.
        self.locks.lock().expect("lock registry poisoned").remove(&id);
        Ok(deleted)
    }

    /// Resolve the current version of a post
    pub async fn get(&self, id: PostId) -> Result<Option<PostVersion>> {
        match self.repos.posts.find(id).await? {
            Some(post) => Ok(Some(self.current_of(&post).await?)),
            None => Ok(None),
        }
    }

    /// Every version of a post in creation order
    pub async fn history(&self, id: PostId) -> Result<Option<Vec<PostVersion>>> {
        if self.repos.posts.find(id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.repos.versions.list_by_post(id).await?))
    }

    /// Current version of every post
    pub async fn list_all(&self) -> Result<Vec<PostVersion>> {
        let mut snapshots = Vec::new();
        for post in self.repos.posts.list().await? {
            snapshots.push(self.current_of(&post).await?);
        }
        Ok(snapshots)
    }

    /// Current versions whose category set contains every requested id
    /// (set containment, not overlap)
    pub async fn list_by_categories(&self, category_ids: &[CategoryId]) -> Result<Vec<PostVersion>> {
        let snapshots = self.list_all().await?;
        Ok(snapshots
            .into_iter()
            .filter(|v| category_ids.iter().all(|c| v.category_ids.contains(c)))
            .collect())
    }

    async fn require_post(&self, id: PostId) -> Result<Post> {
        self.repos
            .posts
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Post {} not found", id)))
    }

    async fn current_of(&self, post: &Post) -> Result<PostVersion> {
        self.repos
            .versions
            .find(post.current_version_id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Current version of post {} missing", post.id)))
    }

    /// Reject the input if any referenced category no longer exists
    async fn check_categories(&self, category_ids: &[CategoryId]) -> Result<()> {
        for id in category_ids {
            if !self.gateway.exists(*id).await? {
                return Err(Error::Validation(format!("Unknown category id {}", id)));
            }
        }
        Ok(())
    }

    /// Acquire the mutation lock for one post. Locks are created on
    /// first use and shared by every operation targeting the same id.
    async fn lock_post(&self, id: PostId) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().expect("lock registry poisoned");
            Arc::clone(locks.entry(id).or_default())
        };
        mutex.lock_owned().await
    }
}

#[async_trait]
impl CategoryDeletionListener for VersioningService {
    /// Current-version-only reconciliation: the deleted id is removed
    /// from every post's current version, while historical versions keep
    /// the stale reference until a rollback restores them.
    async fn category_deleted(&self, category_id: CategoryId) -> Result<()> {
        for post in self.repos.posts.list().await? {
            let _guard = self.lock_post(post.id).await;

            // Re-read under the lock; the post may have moved or gone.
            let Some(post) = self.repos.posts.find(post.id).await? else {
                continue;
            };
            let current = self.current_of(&post).await?;
            if current.category_ids.contains(&category_id) {
                self.repos
                    .versions
                    .remove_category(current.id, category_id)
                    .await?;
                tracing::debug!(
                    post_id = post.id,
                    category_id,
                    "Removed deleted category from current version"
                );
            }
        }
        Ok(())
    }
}
