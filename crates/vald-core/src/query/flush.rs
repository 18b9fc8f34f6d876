use crate::error::Result;
use crate::query::info::{self, IndexCount};
use crate::query::{Batch, ValdEngine};

/// Drop every stored vector and return the resulting (empty) count.
pub async fn execute(engine: &ValdEngine) -> Result<IndexCount> {
    let mut batch = Batch::begin(engine).await;
    let removed = engine.storage.len().await?;
    batch.clear_all().await?;
    drop(batch);
    tracing::info!(removed, "flushed index");
    info::count(engine).await
}
