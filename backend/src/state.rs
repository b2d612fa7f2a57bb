//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::repositories::{
    MemoryRepository, PgRecipeRepository, PgUserRepository, RecipeRecord, Repository, UserRecord,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// Cloning is cheap: repositories and config sit behind `Arc`, and
/// `PgPool` is reference counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when running on the in-memory store
    pub db: Option<PgPool>,
    pub users: Arc<dyn Repository<UserRecord>>,
    pub recipes: Arc<dyn Repository<RecipeRecord>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state backed by PostgreSQL
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.clone())),
            recipes: Arc::new(PgRecipeRepository::new(db.clone())),
            db: Some(db),
            config: Arc::new(config),
        }
    }

    /// Create state backed by in-process repositories
    ///
    /// Nothing survives a restart. Used by tests and by `store = "memory"`
    /// local runs.
    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            db: None,
            users: Arc::new(MemoryRepository::<UserRecord>::new()),
            recipes: Arc::new(MemoryRepository::<RecipeRecord>::new()),
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn db(&self) -> Option<&PgPool> {
        self.db.as_ref()
    }

    #[inline]
    pub fn users(&self) -> &dyn Repository<UserRecord> {
        self.users.as_ref()
    }

    #[inline]
    pub fn recipes(&self) -> &dyn Repository<RecipeRecord> {
        self.recipes.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
