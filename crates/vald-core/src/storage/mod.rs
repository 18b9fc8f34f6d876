pub mod memory;

use crate::error::Result;
use crate::model::vector::VectorRecord;

/// Durable home of vector records. The index is derived from it.
#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<VectorRecord>>;
    /// Insert or replace a record, returning the previous one.
    async fn put(&self, record: VectorRecord) -> Result<Option<VectorRecord>>;
    async fn delete(&self, id: &str) -> Result<Option<VectorRecord>>;
    async fn contains(&self, id: &str) -> Result<bool>;
    /// Every record, ordered by id.
    async fn list(&self) -> Result<Vec<VectorRecord>>;
    async fn len(&self) -> Result<usize>;
    async fn clear(&self) -> Result<()>;
}
