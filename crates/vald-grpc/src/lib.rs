//! gRPC server for the Vald API.
//!
//! [`ValdGrpcServer`] implements every `vald.v1` and `meta.v1` service trait
//! generated in [`vald_api`] on top of a shared [`ValdEngine`]. The plain
//! services never see object metadata; the WithMetadata services store it
//! and return it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vald_core::{EngineConfig, ValdEngine};
//!
//! let engine = Arc::new(ValdEngine::in_memory(EngineConfig::default()));
//! vald_grpc::router(engine)
//!     .serve("[::1]:8081".parse()?)
//!     .await?;
//! ```

pub mod convert;
pub mod stream;

/// Serve a bidi stream by awaiting `$call` for each inbound message on a
/// clone of the server.
///
/// `bidi!(self, request, |svc, req| svc.handle_insert(req, MODE))`
macro_rules! bidi {
    ($server:expr, $request:expr, |$svc:ident, $req:ident| $call:expr) => {{
        let server = $server.clone();
        Ok(tonic::Response::new($crate::stream::serve_bidi(
            $request.into_inner(),
            move |$req| {
                let $svc = server.clone();
                async move { $call.await }
            },
        )))
    }};
}

mod filter;
mod meta;
mod vald;

use std::collections::HashMap;
use std::sync::Arc;

use tonic::Status;

use vald_api::payload::v1::{info, insert, object, remove, search, update, upsert};
use vald_core::ValdEngine;
use vald_core::query::search::{SearchMethod, SearchRequest};

use convert::Metadata;

// ---------------------------------------------------------------------------
// Server implementation
// ---------------------------------------------------------------------------

/// gRPC server backed by a shared [`ValdEngine`].
#[derive(Clone)]
pub struct ValdGrpcServer {
    engine: Arc<ValdEngine>,
}

impl ValdGrpcServer {
    pub fn new(engine: Arc<ValdEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<ValdEngine> {
        &self.engine
    }

    // -- Writes ------------------------------------------------------------

    async fn handle_insert(
        &self,
        req: insert::Request,
        mode: Metadata,
    ) -> Result<object::Location, Status> {
        let request = convert::insert_request(req, mode)?;
        let location = self
            .engine
            .insert(request)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::location(location))
    }

    async fn handle_multi_insert(
        &self,
        req: insert::MultiRequest,
        mode: Metadata,
    ) -> Result<object::Locations, Status> {
        let requests = req
            .requests
            .into_iter()
            .map(|r| convert::insert_request(r, mode))
            .collect::<Result<Vec<_>, _>>()?;
        let locations = self
            .engine
            .insert_many(requests)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::locations(locations))
    }

    async fn handle_update(
        &self,
        req: update::Request,
        mode: Metadata,
    ) -> Result<object::Location, Status> {
        let request = convert::update_request(req, mode)?;
        let location = self
            .engine
            .update(request)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::location(location))
    }

    async fn handle_multi_update(
        &self,
        req: update::MultiRequest,
        mode: Metadata,
    ) -> Result<object::Locations, Status> {
        let requests = req
            .requests
            .into_iter()
            .map(|r| convert::update_request(r, mode))
            .collect::<Result<Vec<_>, _>>()?;
        let locations = self
            .engine
            .update_many(requests)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::locations(locations))
    }

    async fn handle_update_timestamp(
        &self,
        req: update::TimestampRequest,
    ) -> Result<object::Location, Status> {
        let location = self
            .engine
            .update_timestamp(convert::update_timestamp_request(req))
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::location(location))
    }

    async fn handle_upsert(
        &self,
        req: upsert::Request,
        mode: Metadata,
    ) -> Result<object::Location, Status> {
        let request = convert::upsert_request(req, mode)?;
        let location = self
            .engine
            .upsert(request)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::location(location))
    }

    async fn handle_multi_upsert(
        &self,
        req: upsert::MultiRequest,
        mode: Metadata,
    ) -> Result<object::Locations, Status> {
        let requests = req
            .requests
            .into_iter()
            .map(|r| convert::upsert_request(r, mode))
            .collect::<Result<Vec<_>, _>>()?;
        let locations = self
            .engine
            .upsert_many(requests)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::locations(locations))
    }

    async fn handle_remove(&self, req: remove::Request) -> Result<object::Location, Status> {
        let id = convert::remove_id(req)?;
        let location = self
            .engine
            .remove(&id)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::location(location))
    }

    async fn handle_multi_remove(
        &self,
        req: remove::MultiRequest,
    ) -> Result<object::Locations, Status> {
        let ids = req
            .requests
            .into_iter()
            .map(convert::remove_id)
            .collect::<Result<Vec<_>, _>>()?;
        let locations = self
            .engine
            .remove_many(ids)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::locations(locations))
    }

    async fn handle_remove_by_timestamp(
        &self,
        req: remove::TimestampRequest,
    ) -> Result<object::Locations, Status> {
        let conditions = convert::timestamp_conditions(req)?;
        let locations = self
            .engine
            .remove_by_timestamp(&conditions)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::locations(locations))
    }

    // -- Search ------------------------------------------------------------

    async fn handle_search(
        &self,
        request: SearchRequest,
        method: SearchMethod,
        mode: Metadata,
    ) -> Result<search::Response, Status> {
        let response = vald_core::query::search::execute(&self.engine, request, method)
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::search_response(response, mode))
    }

    /// Every request must succeed for the batch to succeed.
    async fn handle_multi_search(
        &self,
        requests: Vec<SearchRequest>,
        method: SearchMethod,
        mode: Metadata,
    ) -> Result<search::Responses, Status> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.handle_search(request, method, mode).await?);
        }
        Ok(search::Responses { responses })
    }

    // -- Objects -----------------------------------------------------------

    async fn handle_exists(&self, req: object::Id) -> Result<object::Id, Status> {
        let id = self
            .engine
            .exists(&req.id)
            .await
            .map_err(core_error_to_status)?;
        Ok(object::Id { id })
    }

    async fn handle_get_object(
        &self,
        req: object::VectorRequest,
        mode: Metadata,
    ) -> Result<object::Vector, Status> {
        let id = convert::object_id(req.id)?;
        let record = self.engine.get(&id).await.map_err(core_error_to_status)?;
        Ok(convert::vector(record, mode))
    }

    async fn handle_list(
        &self,
        mode: Metadata,
    ) -> Result<Vec<Result<object::Vector, Status>>, Status> {
        let records = self.engine.list().await.map_err(core_error_to_status)?;
        Ok(records
            .into_iter()
            .map(|r| Ok(convert::vector(r, mode)))
            .collect())
    }

    async fn handle_get_timestamp(
        &self,
        req: object::TimestampRequest,
    ) -> Result<object::Timestamp, Status> {
        let id = convert::object_id(req.id)?;
        let timestamp = self
            .engine
            .timestamp(&id)
            .await
            .map_err(core_error_to_status)?;
        Ok(object::Timestamp { id, timestamp })
    }

    // -- Index -------------------------------------------------------------

    async fn handle_index_count(&self) -> Result<info::index::Count, Status> {
        let count = self
            .engine
            .index_count()
            .await
            .map_err(core_error_to_status)?;
        Ok(convert::count(count))
    }

    /// Per-agent maps have a single entry keyed by this agent's name.
    fn agent_map<T>(&self, value: T) -> HashMap<String, T> {
        HashMap::from([(self.engine.config.agent_name.clone(), value)])
    }
}

// ---------------------------------------------------------------------------
// Router constructor
// ---------------------------------------------------------------------------

/// Build a [`tonic::transport::server::Router`] serving every `vald.v1` and
/// `meta.v1` service from `engine`.
pub fn router(engine: Arc<ValdEngine>) -> tonic::transport::server::Router {
    vald_api::server::router(ValdGrpcServer::new(engine))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `vald_core::error::Error` to a tonic `Status`.
pub fn core_error_to_status(err: vald_core::error::Error) -> Status {
    use vald_core::error::Error;

    match err {
        Error::Validation(msg) => Status::invalid_argument(msg),
        Error::NotFound(msg) => Status::not_found(msg),
        Error::AlreadyExists(msg) => Status::already_exists(msg),
        Error::DeadlineExceeded(msg) => Status::deadline_exceeded(msg),
        other => {
            tracing::error!(error = %other, "request failed");
            Status::internal(other.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
