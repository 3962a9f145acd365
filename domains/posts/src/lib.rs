//! Posts domain: versioned editorial content
//!
//! Every edit to a post produces a new immutable version snapshot; one
//! version per post is always current, and posts can be rolled back to
//! any prior version without losing the intervening history.

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{NewPost, Post, PostContent, PostId, PostPatch, PostVersion, VersionId};
pub use domain::state::VersionStatus;

// Re-export repository types
pub use repository::{PostRepository, PostsRepositories, VersionRepository};

// Re-export the engine
pub use service::VersioningService;

// Re-export API types
pub use api::routes;
pub use api::PostsState;
