//! In-memory inventory backend
//!
//! Implements [`InventoryRepository`] over a concurrent map, for tests and
//! offline development. Ids and creation timestamps are assigned locally,
//! mirroring what the hosted backend does for real rows.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use async_trait::async_trait;
use stockroom_api::{InventoryItem, ItemPatch, NewItem};

use crate::error::{Result, StoreError, log_failure};
use crate::inventory::InventoryRepository;

/// Inventory repository backed by process memory
#[derive(Debug, Default)]
pub struct MemoryInventory {
    rows: DashMap<String, InventoryItem>,
}

impl MemoryInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(item: &InventoryItem, needle: &str) -> bool {
        [&item.name, &item.description, &item.kind]
            .into_iter()
            .any(|field| {
                field
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(needle))
            })
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventory {
    async fn list(&self, limit: u32) -> Result<Vec<InventoryItem>> {
        debug!(limit, "listing inventory from memory store");
        Ok(self
            .rows
            .iter()
            .take(limit as usize)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<InventoryItem> {
        debug!(%id, "fetching inventory item from memory store");
        self.rows
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| log_failure(StoreError::NotFound { id: id.to_string() }))
    }

    async fn search(&self, term: &str) -> Result<Vec<InventoryItem>> {
        debug!(%term, "searching inventory in memory store");
        let needle = term.to_lowercase();
        Ok(self
            .rows
            .iter()
            .filter(|entry| Self::matches(entry.value(), &needle))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert(&self, item: NewItem) -> Result<Vec<InventoryItem>> {
        let row = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: item.name,
            description: item.description,
            kind: item.kind,
            created_at: Some(Utc::now()),
            extra: item.extra,
        };
        debug!(id = %row.id, "inserting inventory item into memory store");
        self.rows.insert(row.id.clone(), row.clone());
        Ok(vec![row])
    }

    async fn insert_many(&self, items: Vec<NewItem>) -> Result<Vec<InventoryItem>> {
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            rows.extend(self.insert(item).await?);
        }
        Ok(rows)
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<Vec<InventoryItem>> {
        debug!(%id, "updating inventory item in memory store");
        let Some(mut entry) = self.rows.get_mut(id) else {
            return Err(log_failure(StoreError::NotFound { id: id.to_string() }));
        };

        let row = entry.value_mut();
        if let Some(name) = patch.name {
            row.name = Some(name);
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(kind) = patch.kind {
            row.kind = Some(kind);
        }
        for (column, value) in patch.extra {
            row.extra.insert(column, value);
        }
        Ok(vec![row.clone()])
    }

    async fn delete(&self, id: &str) -> Result<Vec<InventoryItem>> {
        debug!(%id, "deleting inventory item from memory store");
        Ok(self
            .rows
            .remove(id)
            .map(|(_, row)| vec![row])
            .unwrap_or_default())
    }
}
