//! Database repositories
//!
//! Every entity is reached through the same capability trait,
//! [`Repository`], so services never depend on the concrete store.
//! Postgres implementations back the running service; the generic
//! [`MemoryRepository`] backs tests and database-less local runs.

use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod recipe;
pub mod user;

pub use memory::MemoryRepository;
pub use recipe::{PgRecipeRepository, RecipeFields, RecipeRecord};
pub use recipe_project_shared::EntityId;
pub use user::{PgUserRepository, UserFields, UserRecord};

/// A persisted record with a store-assigned identifier
pub trait Entity: Clone + Send + Sync + 'static {
    /// Everything about the record except its id
    type Fields: Clone + Send + Sync + 'static;

    /// Human-readable kind, used in log lines and error messages
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Rebuild a record from its id and field values
    fn from_fields(id: EntityId, fields: Self::Fields) -> Self;
}

/// Storage access for one entity type
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All records, ordered by id
    async fn list_all(&self) -> Result<Vec<E>>;

    async fn get_by_id(&self, id: EntityId) -> Result<Option<E>>;

    /// Insert a new record; the store assigns the id
    async fn save(&self, fields: E::Fields) -> Result<E>;

    /// Overwrite the record with `id`. `None` if no such record exists.
    async fn update(&self, id: EntityId, fields: E::Fields) -> Result<Option<E>>;

    /// Returns `true` if a record was removed
    async fn delete_by_id(&self, id: EntityId) -> Result<bool>;
}
