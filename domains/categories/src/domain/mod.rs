//! Domain model for the Categories domain

pub mod entities;
