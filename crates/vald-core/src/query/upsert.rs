use crate::error::Result;
use crate::model::location::Location;
use crate::query::insert::{self, InsertRequest};
use crate::query::update::{self, UpdateRequest};
use crate::query::{Batch, ValdEngine};

/// Same shape as an update; inserts when the id is absent.
pub type UpsertRequest = UpdateRequest;

async fn stage(batch: &mut Batch<'_>, request: UpsertRequest) -> Result<Location> {
    super::validate_id(&request.id)?;
    super::validate_vector(batch.engine(), &request.vector)?;

    match batch.get(&request.id).await? {
        Some(current) => update::stage_existing(batch, current, request),
        None => {
            insert::stage(
                batch,
                InsertRequest {
                    id: request.id,
                    vector: request.vector,
                    timestamp: request.timestamp,
                    metadata: request.metadata,
                },
            )
            .await
        }
    }
}

pub async fn execute(engine: &ValdEngine, request: UpsertRequest) -> Result<Location> {
    let mut batch = Batch::begin(engine).await;
    let location = stage(&mut batch, request).await?;
    batch.commit().await?;
    Ok(location)
}

pub async fn execute_many(
    engine: &ValdEngine,
    requests: Vec<UpsertRequest>,
) -> Result<Vec<Location>> {
    let mut batch = Batch::begin(engine).await;
    let mut locations = Vec::with_capacity(requests.len());
    for request in requests {
        locations.push(stage(&mut batch, request).await?);
    }
    batch.commit().await?;
    Ok(locations)
}
