use crate::error::{Error, Result};
use crate::model::vector::VectorRecord;
use crate::query::ValdEngine;

pub async fn get(engine: &ValdEngine, id: &str) -> Result<VectorRecord> {
    super::validate_id(id)?;
    engine
        .storage
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

/// Returns the id when it is stored.
pub async fn exists(engine: &ValdEngine, id: &str) -> Result<String> {
    super::validate_id(id)?;
    if engine.storage.contains(id).await? {
        Ok(id.to_string())
    } else {
        Err(Error::NotFound(id.to_string()))
    }
}

pub async fn timestamp(engine: &ValdEngine, id: &str) -> Result<i64> {
    Ok(get(engine, id).await?.timestamp)
}

pub async fn list(engine: &ValdEngine) -> Result<Vec<VectorRecord>> {
    engine.storage.list().await
}
