//! Business logic services
//!
//! Services sit between the route handlers and the repositories. They turn
//! a repository miss into [`ApiError::NotFound`](crate::error::ApiError),
//! merge updates into stored records and resolve recipe authors.

pub mod recipe;
pub mod user;

pub use recipe::{RecipeDetails, RecipeService};
pub use user::UserService;
