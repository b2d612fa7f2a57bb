//! User repository for database operations

use super::{Entity, EntityId, Repository};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// Mutable fields of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
}

impl Entity for UserRecord {
    type Fields = UserFields;

    const KIND: &'static str = "User";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_fields(id: EntityId, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
        }
    }
}

/// User repository backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<UserRecord> for PgUserRepository {
    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn save(&self, fields: UserFields) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(fields.name)
        .bind(fields.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: EntityId, fields: UserFields) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = $2,
                email = $3
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
