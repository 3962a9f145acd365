//! Domain entities for the Posts domain
//!
//! A `Post` is the stable identity for one piece of content; every edit
//! appends a `PostVersion` snapshot. Snapshots are immutable once
//! written, with two narrow exceptions applied by the engine through
//! dedicated repository doors: the status field, and category-reference
//! pruning during reconciliation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pressroom_categories::CategoryId;
use pressroom_common::{Error, Result};

use super::state::VersionStatus;

/// Store-allocated post identifier
pub type PostId = pressroom_store::Id;

/// Store-allocated version identifier, unique across all posts
pub type VersionId = pressroom_store::Id;

/// Post aggregate
///
/// Invariant: `current_version_id` is always a member of `version_ids`,
/// and `version_ids` is in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub current_version_id: VersionId,
    pub version_ids: Vec<VersionId>,
}

/// One immutable recorded state of a post's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostVersion {
    pub id: VersionId,
    pub post_id: PostId,
    /// 1 for the first version, strictly +1 per subsequent version of
    /// the same post; never reused, never gapped
    pub version_number: u32,
    pub title: String,
    pub author: String,
    pub body: String,
    pub status: VersionStatus,
    pub category_ids: Vec<CategoryId>,
    pub created_at: DateTime<Utc>,
}

/// Validated full content for `create` and `replace`
///
/// Title, author, and body must be non-empty; category ids are
/// deduplicated but not checked here — existence is the engine's
/// business, since it needs the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub author: String,
    pub body: String,
    pub category_ids: Vec<CategoryId>,
}

impl PostContent {
    pub fn new(
        title: String,
        author: String,
        body: String,
        category_ids: Vec<CategoryId>,
    ) -> Result<Self> {
        if title.trim().is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }
        if author.trim().is_empty() {
            return Err(Error::Validation("Author is required".to_string()));
        }
        if body.trim().is_empty() {
            return Err(Error::Validation("Body is required".to_string()));
        }

        Ok(Self {
            title,
            author,
            body,
            category_ids: dedup_preserving_order(category_ids),
        })
    }
}

/// Raw post input as received from the transport layer, not yet
/// validated
///
/// `replace` must report a missing post before it reports bad fields,
/// so the engine takes this form and runs [`NewPost::validate`] itself
/// once existence is settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub body: String,
    pub category_ids: Vec<CategoryId>,
}

impl NewPost {
    pub fn validate(self) -> Result<PostContent> {
        PostContent::new(self.title, self.author, self.body, self.category_ids)
    }
}

/// Partial content for `patch`
///
/// Fields left `None` are inherited from the current version; a `None`
/// category list means "inherit the current version's categories
/// unchanged". Patch deliberately skips the non-empty field checks —
/// only create/replace enforce them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub category_ids: Option<Vec<CategoryId>>,
}

impl PostPatch {
    /// Merge this patch over the current version's content
    pub fn apply_to(self, current: &PostVersion) -> PostContent {
        PostContent {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            author: self.author.unwrap_or_else(|| current.author.clone()),
            body: self.body.unwrap_or_else(|| current.body.clone()),
            category_ids: self
                .category_ids
                .map(dedup_preserving_order)
                .unwrap_or_else(|| current.category_ids.clone()),
        }
    }

    /// Were category ids supplied (and therefore subject to validation)?
    pub fn has_categories(&self) -> bool {
        self.category_ids.is_some()
    }
}

fn dedup_preserving_order(ids: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
