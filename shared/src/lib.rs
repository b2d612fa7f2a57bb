//! Recipe Project Shared Library
//!
//! This crate contains the wire types and domain enums shared between
//! the backend and any client of the recipe API.

pub mod errors;
pub mod models;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use models::SkillLevel;
pub use types::*;
