use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::model::vector::VectorRecord;
use crate::storage::VectorStore;

/// Process-local store keyed by id. Iteration order is the id order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<BTreeMap<String, VectorRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<VectorRecord>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(id).cloned())
    }

    async fn put(&self, record: VectorRecord) -> Result<Option<VectorRecord>> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        Ok(records.insert(record.id.clone(), record))
    }

    async fn delete(&self, id: &str) -> Result<Option<VectorRecord>> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        Ok(records.remove(id))
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.contains_key(id))
    }

    async fn list(&self) -> Result<Vec<VectorRecord>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.values().cloned().collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.records.read().unwrap_or_else(|e| e.into_inner()).len())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}
