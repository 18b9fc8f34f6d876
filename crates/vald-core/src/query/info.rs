use serde::{Deserialize, Serialize};

use crate::distance::norm;
use crate::error::Result;
use crate::query::ValdEngine;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexCount {
    pub stored: u32,
    pub uncommitted: u32,
    pub indexing: bool,
    pub saving: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatistics {
    /// False when nothing is stored and the norms are meaningless.
    pub valid: bool,
    pub stored: u64,
    pub dimension: u32,
    pub mean_norm: f64,
    pub min_norm: f64,
    pub max_norm: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexProperty {
    pub dimension: i32,
    pub distance_type: String,
    pub object_type: String,
    pub index_type: String,
}

pub async fn count(engine: &ValdEngine) -> Result<IndexCount> {
    let stored = engine.storage.len().await?;
    Ok(IndexCount {
        stored: u32::try_from(stored).unwrap_or(u32::MAX),
        // Writes are applied synchronously, so nothing is ever pending.
        uncommitted: 0,
        indexing: false,
        saving: engine.is_saving(),
    })
}

pub async fn statistics(engine: &ValdEngine) -> Result<IndexStatistics> {
    let records = engine.storage.list().await?;
    let dimension = u32::try_from(engine.dimension()).unwrap_or(u32::MAX);
    if records.is_empty() {
        return Ok(IndexStatistics {
            dimension,
            ..Default::default()
        });
    }

    let norms: Vec<f64> = records.iter().map(|r| norm(&r.vector) as f64).collect();
    let sum: f64 = norms.iter().sum();
    Ok(IndexStatistics {
        valid: true,
        stored: norms.len() as u64,
        dimension,
        mean_norm: sum / norms.len() as f64,
        min_norm: norms.iter().copied().fold(f64::INFINITY, f64::min),
        max_norm: norms.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

pub fn property(engine: &ValdEngine) -> IndexProperty {
    IndexProperty {
        dimension: i32::try_from(engine.index.dimension()).unwrap_or(i32::MAX),
        distance_type: engine.index.distance_type().to_string(),
        object_type: "float".to_string(),
        index_type: engine.index.index_type().to_string(),
    }
}
