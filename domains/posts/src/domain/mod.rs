//! Domain model for the Posts domain

pub mod entities;
pub mod state;
