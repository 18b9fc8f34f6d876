use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::location::Location;
use crate::model::vector::VectorRecord;
use crate::query::{Batch, ValdEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRequest {
    pub id: String,
    pub vector: Vec<f32>,
    /// Nanoseconds; zero means now.
    pub timestamp: i64,
    pub metadata: Option<Vec<u8>>,
}

impl InsertRequest {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            timestamp: 0,
            metadata: None,
        }
    }
}

pub(crate) async fn stage(batch: &mut Batch<'_>, request: InsertRequest) -> Result<Location> {
    let engine = batch.engine();
    super::validate_id(&request.id)?;
    super::validate_vector(engine, &request.vector)?;

    if batch.get(&request.id).await?.is_some() {
        return Err(Error::AlreadyExists(request.id));
    }

    let timestamp = if request.timestamp == 0 {
        super::now_nanos()
    } else {
        request.timestamp
    };
    let location = engine.location(&request.id);
    batch.put(VectorRecord {
        id: request.id,
        vector: request.vector,
        timestamp,
        metadata: request.metadata,
    });
    Ok(location)
}

pub async fn execute(engine: &ValdEngine, request: InsertRequest) -> Result<Location> {
    let mut batch = Batch::begin(engine).await;
    let location = stage(&mut batch, request).await?;
    batch.commit().await?;
    tracing::debug!(id = %location.uuid, "inserted vector");
    Ok(location)
}

pub async fn execute_many(
    engine: &ValdEngine,
    requests: Vec<InsertRequest>,
) -> Result<Vec<Location>> {
    let mut batch = Batch::begin(engine).await;
    let mut locations = Vec::with_capacity(requests.len());
    for request in requests {
        locations.push(stage(&mut batch, request).await?);
    }
    batch.commit().await?;
    tracing::debug!(count = locations.len(), "inserted vectors");
    Ok(locations)
}
