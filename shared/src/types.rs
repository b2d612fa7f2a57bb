//! API request and response types

use crate::models::SkillLevel;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted record
pub type EntityId = i64;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// Body of `POST /users` and `PUT /users/{id}`
///
/// An `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

/// Reference to an existing user inside a recipe body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: EntityId,
}

/// Recipe as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub skill_level: SkillLevel,
    pub created_by: Option<User>,
}

/// Body of `POST /recipes` and `PUT /recipes/{id}`
///
/// `createdBy` only needs the author's `id`; other fields of the nested
/// object are ignored, so a full `User` can be sent back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub created_by: Option<UserRef>,
}
