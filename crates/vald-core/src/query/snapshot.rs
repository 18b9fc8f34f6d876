//! JSON snapshots of the full engine contents.
//!
//! A snapshot carries the dimension and distance type it was taken with;
//! loading into an engine configured differently is rejected rather than
//! silently mixing incompatible vectors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceType;
use crate::error::{Error, Result};
use crate::model::vector::VectorRecord;
use crate::query::{Batch, SavingGuard, ValdEngine};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    created_at: String,
    dimension: usize,
    distance: DistanceType,
    records: Vec<VectorRecord>,
}

/// Write every record to `path`, returning how many were written.
pub async fn save(engine: &ValdEngine, path: &Path) -> Result<usize> {
    // Hold the gate so no write lands halfway through the listing.
    let batch = Batch::begin(engine).await;
    let _saving = SavingGuard::set(engine);

    let records = engine.storage.list().await?;
    let count = records.len();
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        created_at: chrono::Utc::now().to_rfc3339(),
        dimension: engine.dimension(),
        distance: engine.distance_type(),
        records,
    };
    let bytes = serde_json::to_vec(&snapshot)?;

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    drop(batch);

    tracing::info!(path = %path.display(), count, "saved snapshot");
    Ok(count)
}

/// Replace the engine contents with the snapshot at `path`.
pub async fn load(engine: &ValdEngine, path: &Path) -> Result<usize> {
    let bytes = tokio::fs::read(path).await?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::Validation(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    if snapshot.dimension != engine.dimension() || snapshot.distance != engine.distance_type() {
        return Err(Error::Validation(format!(
            "snapshot is {}-dimensional {}, engine is {}-dimensional {}",
            snapshot.dimension,
            snapshot.distance,
            engine.dimension(),
            engine.distance_type()
        )));
    }
    for record in &snapshot.records {
        super::validate_id(&record.id)?;
        super::validate_vector(engine, &record.vector)?;
    }

    let count = snapshot.records.len();
    let mut batch = Batch::begin(engine).await;
    batch.clear_all().await?;
    for record in snapshot.records {
        batch.put(record);
    }
    batch.commit().await?;

    tracing::info!(path = %path.display(), count, "loaded snapshot");
    Ok(count)
}
