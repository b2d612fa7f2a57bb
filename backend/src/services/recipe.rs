//! Recipe service
//!
//! Recipes store their author as a bare user id. Reads resolve that id to
//! the user record; an author deleted in the meantime reads as no author.

use crate::error::ApiError;
use crate::repositories::{Entity, EntityId, RecipeFields, RecipeRecord, Repository, UserRecord};
use std::collections::HashMap;
use tracing::debug;

/// A recipe together with its resolved author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetails {
    pub recipe: RecipeRecord,
    pub created_by: Option<UserRecord>,
}

/// Recipe service for CRUD operations
pub struct RecipeService;

impl RecipeService {
    /// Every recipe, ordered by id
    pub async fn find_all(
        recipes: &dyn Repository<RecipeRecord>,
        users: &dyn Repository<UserRecord>,
    ) -> Result<Vec<RecipeDetails>, ApiError> {
        let all = recipes.list_all().await.map_err(ApiError::Internal)?;
        if all.is_empty() {
            return Ok(Vec::new());
        }

        let authors: HashMap<EntityId, UserRecord> = users
            .list_all()
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(all
            .into_iter()
            .map(|recipe| {
                let created_by = recipe
                    .created_by_id
                    .and_then(|id| authors.get(&id).cloned());
                RecipeDetails { recipe, created_by }
            })
            .collect())
    }

    /// Look up one recipe
    pub async fn find_by_id(
        recipes: &dyn Repository<RecipeRecord>,
        users: &dyn Repository<UserRecord>,
        recipe_id: EntityId,
    ) -> Result<RecipeDetails, ApiError> {
        let recipe = Self::load(recipes, recipe_id).await?;
        Self::with_author(users, recipe).await
    }

    /// Persist a new recipe; the store assigns the id
    ///
    /// A `created_by_id` naming no existing user is a validation error.
    pub async fn create(
        recipes: &dyn Repository<RecipeRecord>,
        users: &dyn Repository<UserRecord>,
        fields: RecipeFields,
    ) -> Result<RecipeDetails, ApiError> {
        let created_by = match fields.created_by_id {
            Some(user_id) => Some(
                users
                    .get_by_id(user_id)
                    .await
                    .map_err(ApiError::Internal)?
                    .ok_or_else(|| unknown_author(user_id))?,
            ),
            None => None,
        };

        let author_id = fields.created_by_id;
        let recipe = recipes
            .save(fields)
            .await
            .map_err(|err| insert_error(err, author_id))?;
        debug!(recipe_id = recipe.id, "Recipe created");

        Ok(RecipeDetails { recipe, created_by })
    }

    /// Replace the editable fields of an existing recipe
    ///
    /// Name, description, category and skill level come from `patch`; the
    /// author stays as stored. A missing recipe is reported as `NotFound`.
    pub async fn update_by_id(
        recipes: &dyn Repository<RecipeRecord>,
        users: &dyn Repository<UserRecord>,
        recipe_id: EntityId,
        patch: RecipeFields,
    ) -> Result<RecipeDetails, ApiError> {
        let existing = Self::load(recipes, recipe_id).await?;
        let fields = existing.merged(patch);

        let recipe = recipes
            .update(existing.id, fields)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::not_found(RecipeRecord::KIND, recipe_id))?;
        debug!(recipe_id, "Recipe updated");

        Self::with_author(users, recipe).await
    }

    /// Hard-delete a recipe. Deleting an unknown id is a no-op.
    pub async fn delete(
        recipes: &dyn Repository<RecipeRecord>,
        recipe_id: EntityId,
    ) -> Result<(), ApiError> {
        let removed = recipes
            .delete_by_id(recipe_id)
            .await
            .map_err(ApiError::Internal)?;
        debug!(recipe_id, removed, "Recipe delete");
        Ok(())
    }

    async fn load(
        recipes: &dyn Repository<RecipeRecord>,
        recipe_id: EntityId,
    ) -> Result<RecipeRecord, ApiError> {
        recipes
            .get_by_id(recipe_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::not_found(RecipeRecord::KIND, recipe_id))
    }

    async fn with_author(
        users: &dyn Repository<UserRecord>,
        recipe: RecipeRecord,
    ) -> Result<RecipeDetails, ApiError> {
        let created_by = match recipe.created_by_id {
            Some(user_id) => users.get_by_id(user_id).await.map_err(ApiError::Internal)?,
            None => None,
        };

        Ok(RecipeDetails { recipe, created_by })
    }
}

fn unknown_author(user_id: EntityId) -> ApiError {
    ApiError::Validation(format!("createdBy refers to unknown user {}", user_id))
}

/// Map a failed recipe insert
///
/// The author can be deleted between the existence check and the insert,
/// in which case Postgres rejects the row with a foreign key violation.
fn insert_error(err: anyhow::Error, author_id: Option<EntityId>) -> ApiError {
    match (err.downcast::<sqlx::Error>(), author_id) {
        (Ok(sqlx::Error::Database(db)), Some(user_id)) if db.is_foreign_key_violation() => {
            unknown_author(user_id)
        }
        (Ok(db_err), _) => ApiError::Database(db_err),
        (Err(err), _) => ApiError::Internal(err),
    }
}
