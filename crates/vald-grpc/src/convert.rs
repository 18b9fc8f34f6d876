//! Conversions between the generated protobuf messages and engine types.

use std::time::Duration;

use tonic::Status;

use vald_api::payload::v1::{info, insert, object, remove, search, update, upsert};
use vald_core::model::location::Location;
use vald_core::model::timestamp::{Operator, TimestampCondition};
use vald_core::model::vector::VectorRecord;
use vald_core::query::info::{IndexCount, IndexProperty, IndexStatistics};
use vald_core::query::insert::InsertRequest;
use vald_core::query::search::{SearchConfig, SearchRequest, SearchResponse, SearchTarget};
use vald_core::query::update::{UpdateRequest, UpdateTimestampRequest};

/// Whether a call belongs to a `meta.v1` service.
///
/// Plain services never write metadata and strip it from every response;
/// the WithMetadata services persist it and hand it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metadata {
    Strip,
    Keep,
}

impl Metadata {
    fn incoming(self, metadata: Option<Vec<u8>>) -> Option<Vec<u8>> {
        match self {
            Metadata::Strip => None,
            Metadata::Keep => metadata,
        }
    }

    fn outgoing(self, metadata: Option<Vec<u8>>) -> Option<Vec<u8>> {
        self.incoming(metadata)
    }
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, Status> {
    field.ok_or_else(|| Status::invalid_argument(format!("{name} is required")))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `skip_strict_exist_check` is not read: inserting an existing id is always
/// `ALREADY_EXISTS`.
pub fn insert_request(req: insert::Request, mode: Metadata) -> Result<InsertRequest, Status> {
    let vector = required(req.vector, "vector")?;
    let timestamp = req.config.map(|c| c.timestamp).unwrap_or_default();
    Ok(InsertRequest {
        id: vector.id,
        vector: vector.vector,
        timestamp: if timestamp != 0 { timestamp } else { vector.timestamp },
        metadata: mode.incoming(vector.metadata),
    })
}

pub fn update_request(req: update::Request, mode: Metadata) -> Result<UpdateRequest, Status> {
    let vector = required(req.vector, "vector")?;
    let (timestamp, skip) = req
        .config
        .map(|c| (c.timestamp, c.skip_strict_exist_check))
        .unwrap_or_default();
    Ok(UpdateRequest {
        id: vector.id,
        vector: vector.vector,
        timestamp: if timestamp != 0 { timestamp } else { vector.timestamp },
        metadata: mode.incoming(vector.metadata),
        skip_strict_exist_check: skip,
    })
}

pub fn upsert_request(req: upsert::Request, mode: Metadata) -> Result<UpdateRequest, Status> {
    let vector = required(req.vector, "vector")?;
    let (timestamp, skip) = req
        .config
        .map(|c| (c.timestamp, c.skip_strict_exist_check))
        .unwrap_or_default();
    Ok(UpdateRequest {
        id: vector.id,
        vector: vector.vector,
        timestamp: if timestamp != 0 { timestamp } else { vector.timestamp },
        metadata: mode.incoming(vector.metadata),
        skip_strict_exist_check: skip,
    })
}

pub fn update_timestamp_request(req: update::TimestampRequest) -> UpdateTimestampRequest {
    UpdateTimestampRequest {
        id: req.id,
        timestamp: req.timestamp,
        force: req.force,
    }
}

pub fn remove_id(req: remove::Request) -> Result<String, Status> {
    Ok(required(req.id, "id")?.id)
}

pub fn timestamp_conditions(
    req: remove::TimestampRequest,
) -> Result<Vec<TimestampCondition>, Status> {
    use remove::timestamp::Operator as ProtoOperator;

    req.timestamps
        .into_iter()
        .map(|t| {
            let operator = match ProtoOperator::try_from(t.operator) {
                Ok(ProtoOperator::Eq) => Operator::Eq,
                Ok(ProtoOperator::Ne) => Operator::Ne,
                Ok(ProtoOperator::Ge) => Operator::Ge,
                Ok(ProtoOperator::Gt) => Operator::Gt,
                Ok(ProtoOperator::Le) => Operator::Le,
                Ok(ProtoOperator::Lt) => Operator::Lt,
                Err(_) => {
                    return Err(Status::invalid_argument(format!(
                        "unknown timestamp operator {}",
                        t.operator
                    )));
                }
            };
            Ok(TimestampCondition::new(operator, t.timestamp))
        })
        .collect()
}

/// `timeout` is in nanoseconds; zero or negative means no deadline.
pub fn search_config(config: Option<search::Config>) -> SearchConfig {
    let config = config.unwrap_or_default();
    SearchConfig {
        request_id: config.request_id,
        num: config.num,
        radius: config.radius,
        epsilon: config.epsilon,
        min_num: config.min_num,
        timeout: u64::try_from(config.timeout)
            .ok()
            .filter(|ns| *ns > 0)
            .map(Duration::from_nanos),
    }
}

pub fn search_request(req: search::Request) -> SearchRequest {
    SearchRequest {
        target: SearchTarget::Vector(req.vector),
        config: search_config(req.config),
    }
}

pub fn search_id_request(req: search::IdRequest) -> SearchRequest {
    SearchRequest {
        target: SearchTarget::Id(req.id),
        config: search_config(req.config),
    }
}

pub fn object_id(id: Option<object::Id>) -> Result<String, Status> {
    Ok(required(id, "id")?.id)
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub fn location(location: Location) -> object::Location {
    object::Location {
        name: location.name,
        uuid: location.uuid,
        ips: location.ips,
    }
}

pub fn locations(locations: Vec<Location>) -> object::Locations {
    object::Locations {
        locations: locations.into_iter().map(self::location).collect(),
    }
}

pub fn vector(record: VectorRecord, mode: Metadata) -> object::Vector {
    object::Vector {
        id: record.id,
        vector: record.vector,
        timestamp: record.timestamp,
        metadata: mode.outgoing(record.metadata),
    }
}

pub fn search_response(response: SearchResponse, mode: Metadata) -> search::Response {
    search::Response {
        request_id: response.request_id,
        results: response
            .results
            .into_iter()
            .map(|r| object::Distance {
                id: r.id,
                distance: r.distance,
                metadata: mode.outgoing(r.metadata),
            })
            .collect(),
    }
}

pub fn count(count: IndexCount) -> info::index::Count {
    info::index::Count {
        stored: count.stored,
        uncommitted: count.uncommitted,
        indexing: count.indexing,
        saving: count.saving,
    }
}

pub fn statistics(stats: IndexStatistics) -> info::index::Statistics {
    info::index::Statistics {
        valid: stats.valid,
        stored: stats.stored,
        dimension: stats.dimension,
        mean_norm: stats.mean_norm,
        min_norm: stats.min_norm,
        max_norm: stats.max_norm,
    }
}

pub fn property(property: IndexProperty) -> info::index::Property {
    info::index::Property {
        dimension: property.dimension,
        distance_type: property.distance_type,
        object_type: property.object_type,
        index_type: property.index_type,
    }
}
