//! Recipe repository for database operations

use super::{Entity, EntityId, Repository};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use recipe_project_shared::SkillLevel;
use sqlx::PgPool;

/// Recipe record
///
/// The author is kept as a bare id; services resolve it to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub skill_level: SkillLevel,
    pub created_by_id: Option<EntityId>,
}

/// Mutable fields of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub skill_level: SkillLevel,
    pub created_by_id: Option<EntityId>,
}

impl RecipeRecord {
    /// Field values after applying `patch` to this recipe
    ///
    /// Name, description, category and skill level come from the patch.
    /// The author is not editable and is carried over from `self`.
    pub fn merged(&self, patch: RecipeFields) -> RecipeFields {
        RecipeFields {
            name: patch.name,
            description: patch.description,
            category: patch.category,
            skill_level: patch.skill_level,
            created_by_id: self.created_by_id,
        }
    }
}

impl Entity for RecipeRecord {
    type Fields = RecipeFields;

    const KIND: &'static str = "Recipe";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_fields(id: EntityId, fields: RecipeFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            skill_level: fields.skill_level,
            created_by_id: fields.created_by_id,
        }
    }
}

/// Row of the `recipes` table, skill level still as stored text
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: EntityId,
    name: String,
    description: String,
    category: String,
    skill_level: String,
    created_by_id: Option<EntityId>,
}

impl TryFrom<RecipeRow> for RecipeRecord {
    type Error = anyhow::Error;

    fn try_from(row: RecipeRow) -> Result<Self> {
        let skill_level = row
            .skill_level
            .parse::<SkillLevel>()
            .map_err(|e| anyhow!("recipe {}: {}", row.id, e))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            skill_level,
            created_by_id: row.created_by_id,
        })
    }
}

/// Recipe repository backed by the `recipes` table
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<RecipeRecord> for PgRecipeRepository {
    async fn list_all(&self) -> Result<Vec<RecipeRecord>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, description, category, skill_level, created_by_id
            FROM recipes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RecipeRecord::try_from).collect()
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<RecipeRecord>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, description, category, skill_level, created_by_id
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RecipeRecord::try_from).transpose()
    }

    async fn save(&self, fields: RecipeFields) -> Result<RecipeRecord> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            INSERT INTO recipes (name, description, category, skill_level, created_by_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, category, skill_level, created_by_id
            "#,
        )
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.category)
        .bind(fields.skill_level.as_str())
        .bind(fields.created_by_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update(&self, id: EntityId, fields: RecipeFields) -> Result<Option<RecipeRecord>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            UPDATE recipes SET
                name = $2,
                description = $3,
                category = $4,
                skill_level = $5,
                created_by_id = $6
            WHERE id = $1
            RETURNING id, name, description, category, skill_level, created_by_id
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.category)
        .bind(fields.skill_level.as_str())
        .bind(fields.created_by_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RecipeRecord::try_from).transpose()
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
