//! Categories domain: category CRUD and the gateway consumed by posts

pub mod api;
pub mod domain;
pub mod gateway;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Category, CategoryId, NewCategory};

// Re-export gateway types
pub use gateway::{CategoryDeletionListener, CategoryGateway, RepositoryGateway};

// Re-export repository types
pub use repository::CategoryRepository;

// Re-export API types
pub use api::routes;
pub use api::CategoriesState;
