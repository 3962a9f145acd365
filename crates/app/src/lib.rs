//! Pressroom application composition root
//!
//! Composes the domain routers into a single application and wires the
//! cross-domain seams: the posts engine reads categories through the
//! gateway and is registered as a deletion listener so current versions
//! get reconciled when a category disappears.

use std::sync::Arc;

use axum::Router;

use pressroom_categories::{
    CategoriesState, CategoryDeletionListener, CategoryGateway, CategoryRepository,
    RepositoryGateway,
};
use pressroom_posts::{PostsRepositories, PostsState, VersioningService};
use pressroom_store::MemoryStore;

/// Create the main application router with all routes and state
pub fn create_app() -> Router {
    let category_repo = CategoryRepository::new(MemoryStore::new());
    let gateway: Arc<dyn CategoryGateway> =
        Arc::new(RepositoryGateway::new(category_repo.clone()));

    let service = Arc::new(VersioningService::new(
        PostsRepositories::new(),
        Arc::clone(&gateway),
    ));

    let categories_state = CategoriesState {
        repo: category_repo,
        listeners: vec![Arc::clone(&service) as Arc<dyn CategoryDeletionListener>],
    };
    let posts_state = PostsState { service, gateway };

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(pressroom_categories::routes().with_state(categories_state))
        .merge(pressroom_posts::routes().with_state(posts_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
