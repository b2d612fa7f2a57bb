//! In-process repository
//!
//! Keeps records in a `BTreeMap` behind a tokio `RwLock`. Ids are handed out
//! sequentially from 1, like a `BIGSERIAL` column.

use super::{Entity, EntityId, Repository};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<E> {
    rows: BTreeMap<EntityId, E>,
    last_id: EntityId,
}

/// Repository holding its records in memory
pub struct MemoryRepository<E: Entity> {
    table: RwLock<Table<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn list_all(&self) -> Result<Vec<E>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<E>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, fields: E::Fields) -> Result<E> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let record = E::from_fields(table.last_id, fields);
        table.rows.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: EntityId, fields: E::Fields) -> Result<Option<E>> {
        let mut table = self.table.write().await;

        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = E::from_fields(id, fields);
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
