use crate::error::{Error, Result};
use crate::model::location::Location;
use crate::model::timestamp::{TimestampCondition, matches_all};
use crate::query::{Batch, ValdEngine};

async fn stage(batch: &mut Batch<'_>, id: &str) -> Result<Location> {
    super::validate_id(id)?;
    if batch.get(id).await?.is_none() {
        return Err(Error::NotFound(id.to_string()));
    }
    batch.delete(id);
    Ok(batch.engine().location(id))
}

pub async fn execute(engine: &ValdEngine, id: &str) -> Result<Location> {
    let mut batch = Batch::begin(engine).await;
    let location = stage(&mut batch, id).await?;
    batch.commit().await?;
    tracing::debug!(id = %id, "removed vector");
    Ok(location)
}

pub async fn execute_many(engine: &ValdEngine, ids: Vec<String>) -> Result<Vec<Location>> {
    let mut batch = Batch::begin(engine).await;
    let mut locations = Vec::with_capacity(ids.len());
    for id in &ids {
        locations.push(stage(&mut batch, id).await?);
    }
    batch.commit().await?;
    Ok(locations)
}

/// Remove every record whose timestamp satisfies all `conditions`.
pub async fn by_timestamp(
    engine: &ValdEngine,
    conditions: &[TimestampCondition],
) -> Result<Vec<Location>> {
    if conditions.is_empty() {
        return Err(Error::Validation(
            "at least one timestamp condition is required".to_string(),
        ));
    }

    let mut batch = Batch::begin(engine).await;
    let mut locations = Vec::new();
    for record in engine.storage.list().await? {
        if matches_all(conditions, record.timestamp) {
            batch.delete(&record.id);
            locations.push(engine.location(&record.id));
        }
    }
    if locations.is_empty() {
        return Err(Error::NotFound(
            "no object matches the timestamp conditions".to_string(),
        ));
    }
    batch.commit().await?;
    tracing::info!(count = locations.len(), "removed vectors by timestamp");
    Ok(locations)
}
