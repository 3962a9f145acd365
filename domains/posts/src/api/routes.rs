//! Route definitions for Posts domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::posts;
use super::middleware::PostsState;

/// Create all Posts domain API routes
pub fn routes() -> Router<PostsState> {
    Router::new()
        .route("/v1/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/v1/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .patch(posts::patch_post)
                .delete(posts::delete_post),
        )
        .route("/v1/posts/{id}/versions", get(posts::list_versions))
        .route("/v1/posts/{id}/status", put(posts::set_status))
        .route(
            "/v1/posts/{id}/rollback/{version_number}",
            post(posts::rollback_post),
        )
}
