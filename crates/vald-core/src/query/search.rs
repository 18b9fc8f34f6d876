use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deadline::Deadline;
use crate::error::{Error, Result};
use crate::query::ValdEngine;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Echoed back in the response.
    pub request_id: String,
    pub num: u32,
    /// Upper bound on result distance; non-positive means unbounded.
    pub radius: f32,
    /// Accepted for compatibility; exact search ignores it.
    pub epsilon: f32,
    /// Fewer results than this is reported as not found.
    pub min_num: u32,
    /// Time budget for the whole search; `None` is unbounded.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchTarget {
    Vector(Vec<f32>),
    Id(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub target: SearchTarget,
    pub config: SearchConfig,
}

impl SearchRequest {
    pub fn by_vector(vector: Vec<f32>, num: u32) -> Self {
        Self {
            target: SearchTarget::Vector(vector),
            config: SearchConfig {
                num,
                ..Default::default()
            },
        }
    }

    pub fn by_id(id: impl Into<String>, num: u32) -> Self {
        Self {
            target: SearchTarget::Id(id.into()),
            config: SearchConfig {
                num,
                ..Default::default()
            },
        }
    }
}

/// How candidates are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// Through the vector index.
    Index,
    /// Exhaustive scan of the store.
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub distance: f32,
    pub metadata: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub request_id: String,
    pub results: Vec<SearchResult>,
}

async fn query_vector(engine: &ValdEngine, target: SearchTarget) -> Result<Vec<f32>> {
    match target {
        SearchTarget::Vector(vector) => {
            super::validate_vector(engine, &vector)?;
            Ok(vector)
        }
        SearchTarget::Id(id) => {
            super::validate_id(&id)?;
            match engine.storage.get(&id).await? {
                Some(record) => Ok(record.vector),
                None => Err(Error::NotFound(id)),
            }
        }
    }
}

async fn candidates(
    engine: &ValdEngine,
    query: &[f32],
    limit: usize,
    method: SearchMethod,
    deadline: &Deadline,
) -> Result<Vec<(String, f32)>> {
    match method {
        SearchMethod::Index => engine.index.search(query, limit, deadline),
        SearchMethod::Linear => {
            let distance = engine.distance_type();
            let records = engine.storage.list().await?;
            let mut scored = Vec::with_capacity(records.len());
            for (step, r) in records.into_iter().enumerate() {
                deadline.check_at(step)?;
                let d = distance.distance(query, &r.vector);
                scored.push((r.id, d));
            }
            scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            scored.truncate(limit);
            Ok(scored)
        }
    }
}

pub async fn execute(
    engine: &ValdEngine,
    request: SearchRequest,
    method: SearchMethod,
) -> Result<SearchResponse> {
    let config = request.config;
    if config.num == 0 {
        return Err(Error::Validation("num must be greater than zero".to_string()));
    }
    let deadline = Deadline::after(config.timeout);
    let query = query_vector(engine, request.target).await?;

    let mut hits = candidates(engine, &query, config.num as usize, method, &deadline).await?;
    deadline.check()?;
    if config.radius > 0.0 {
        hits.retain(|(_, d)| *d <= config.radius);
    }
    if hits.is_empty() || hits.len() < config.min_num as usize {
        return Err(Error::NotFound(format!(
            "search {} found {} result(s)",
            config.request_id,
            hits.len()
        )));
    }

    let mut results = Vec::with_capacity(hits.len());
    for (id, distance) in hits {
        let metadata = engine.storage.get(&id).await?.and_then(|r| r.metadata);
        results.push(SearchResult {
            id,
            distance,
            metadata,
        });
    }

    Ok(SearchResponse {
        request_id: config.request_id,
        results,
    })
}

/// Run every request; the first failure fails the whole batch.
pub async fn execute_many(
    engine: &ValdEngine,
    requests: Vec<SearchRequest>,
    method: SearchMethod,
) -> Result<Vec<SearchResponse>> {
    let mut responses = Vec::with_capacity(requests.len());
    for request in requests {
        responses.push(execute(engine, request, method).await?);
    }
    Ok(responses)
}
