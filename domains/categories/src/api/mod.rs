//! HTTP API for the Categories domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::CategoriesState;
pub use routes::routes;
