//! Route definitions for Categories domain API

use axum::{routing::get, Router};

use super::handlers::categories;
use super::middleware::CategoriesState;

/// Create all Categories domain API routes
pub fn routes() -> Router<CategoriesState> {
    Router::new()
        .route(
            "/v1/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/v1/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .patch(categories::patch_category)
                .delete(categories::delete_category),
        )
}
