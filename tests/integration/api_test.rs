//! API endpoint integration tests
//!
//! End-to-end tests for the categories and posts APIs, driven through
//! the composed application router.

#![allow(dead_code)]

mod categories;
mod common;
mod posts;
mod versioning;
