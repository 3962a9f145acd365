//! Repository layer for the Categories domain

mod categories;

pub use categories::CategoryRepository;
