use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::location::Location;
use crate::model::vector::VectorRecord;
use crate::query::{Batch, ValdEngine};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub vector: Vec<f32>,
    /// Nanoseconds; zero means now.
    pub timestamp: i64,
    /// `None` keeps the stored metadata.
    pub metadata: Option<Vec<u8>>,
    /// Accept an update that changes nothing.
    pub skip_strict_exist_check: bool,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            timestamp: 0,
            metadata: None,
            skip_strict_exist_check: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTimestampRequest {
    pub id: String,
    pub timestamp: i64,
    /// Overwrite even when the stored timestamp is not older.
    pub force: bool,
}

pub(crate) async fn stage(batch: &mut Batch<'_>, request: UpdateRequest) -> Result<Location> {
    let engine = batch.engine();
    super::validate_id(&request.id)?;
    super::validate_vector(engine, &request.vector)?;

    let Some(current) = batch.get(&request.id).await? else {
        return Err(Error::NotFound(request.id));
    };
    stage_existing(batch, current, request)
}

/// Replace `current` with the request's contents.
pub(crate) fn stage_existing(
    batch: &mut Batch<'_>,
    current: VectorRecord,
    request: UpdateRequest,
) -> Result<Location> {
    let unchanged = current.vector == request.vector
        && request
            .metadata
            .as_ref()
            .is_none_or(|m| current.metadata.as_ref() == Some(m));
    if unchanged && !request.skip_strict_exist_check {
        return Err(Error::AlreadyExists(format!(
            "{} already holds the same vector",
            request.id
        )));
    }

    let timestamp = if request.timestamp == 0 {
        super::now_nanos()
    } else {
        request.timestamp
    };
    let location = batch.engine().location(&request.id);
    batch.put(VectorRecord {
        id: request.id,
        vector: request.vector,
        timestamp,
        metadata: request.metadata.or(current.metadata),
    });
    Ok(location)
}

pub async fn execute(engine: &ValdEngine, request: UpdateRequest) -> Result<Location> {
    let mut batch = Batch::begin(engine).await;
    let location = stage(&mut batch, request).await?;
    batch.commit().await?;
    tracing::debug!(id = %location.uuid, "updated vector");
    Ok(location)
}

pub async fn execute_many(
    engine: &ValdEngine,
    requests: Vec<UpdateRequest>,
) -> Result<Vec<Location>> {
    let mut batch = Batch::begin(engine).await;
    let mut locations = Vec::with_capacity(requests.len());
    for request in requests {
        locations.push(stage(&mut batch, request).await?);
    }
    batch.commit().await?;
    Ok(locations)
}

pub async fn update_timestamp(
    engine: &ValdEngine,
    request: UpdateTimestampRequest,
) -> Result<Location> {
    super::validate_id(&request.id)?;
    if request.timestamp <= 0 {
        return Err(Error::Validation(format!(
            "invalid timestamp {} for {}",
            request.timestamp, request.id
        )));
    }

    let mut batch = Batch::begin(engine).await;
    let Some(mut record) = batch.get(&request.id).await? else {
        return Err(Error::NotFound(request.id));
    };
    if request.timestamp <= record.timestamp && !request.force {
        return Err(Error::AlreadyExists(format!(
            "{} has timestamp {} which is not older than {}",
            request.id, record.timestamp, request.timestamp
        )));
    }

    record.timestamp = request.timestamp;
    batch.put(record);
    batch.commit().await?;
    Ok(engine.location(&request.id))
}
