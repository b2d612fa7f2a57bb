//! Error types for the Recipe Project

use thiserror::Error;

/// Errors raised while interpreting shared model values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown skill level: {0}")]
    UnknownSkillLevel(String),
}
