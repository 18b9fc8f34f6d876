//! `vald.v1.Filter`: the object-based operations.
//!
//! Objects are turned into vectors by the engine's vectorizer and then take
//! the same path as the vector-based calls. The `vectorizer` target carried
//! in each request is not dialled; vectorization is always local.

use tonic::{Request, Response, Status, Streaming};

use vald_api::ResponseStream;
use vald_api::payload::v1::{insert, object, search, update, upsert};
use vald_api::vald::v1::filter_server::Filter;
use vald_core::query::search::{SearchMethod, SearchRequest, SearchTarget};

use crate::convert::{self, Metadata};
use crate::{ValdGrpcServer, core_error_to_status};

const MODE: Metadata = Metadata::Strip;

impl ValdGrpcServer {
    fn vectorize_blob(&self, blob: Option<object::Blob>) -> Result<object::Vector, Status> {
        let blob = blob.ok_or_else(|| Status::invalid_argument("object is required"))?;
        let vector = self
            .engine
            .vectorize(&blob.object)
            .map_err(core_error_to_status)?;
        Ok(object::Vector {
            id: blob.id,
            vector,
            timestamp: 0,
            metadata: None,
        })
    }

    fn search_object_request(&self, req: search::ObjectRequest) -> Result<SearchRequest, Status> {
        let vector = self
            .engine
            .vectorize(&req.object)
            .map_err(core_error_to_status)?;
        Ok(SearchRequest {
            target: SearchTarget::Vector(vector),
            config: convert::search_config(req.config),
        })
    }

    fn insert_object_request(&self, req: insert::ObjectRequest) -> Result<insert::Request, Status> {
        Ok(insert::Request {
            vector: Some(self.vectorize_blob(req.object)?),
            config: req.config,
        })
    }

    fn update_object_request(&self, req: update::ObjectRequest) -> Result<update::Request, Status> {
        Ok(update::Request {
            vector: Some(self.vectorize_blob(req.object)?),
            config: req.config,
        })
    }

    fn upsert_object_request(&self, req: upsert::ObjectRequest) -> Result<upsert::Request, Status> {
        Ok(upsert::Request {
            vector: Some(self.vectorize_blob(req.object)?),
            config: req.config,
        })
    }

    async fn handle_search_object(
        &self,
        req: search::ObjectRequest,
    ) -> Result<search::Response, Status> {
        let request = self.search_object_request(req)?;
        self.handle_search(request, SearchMethod::Index, MODE).await
    }

    async fn handle_insert_object(
        &self,
        req: insert::ObjectRequest,
    ) -> Result<object::Location, Status> {
        let request = self.insert_object_request(req)?;
        self.handle_insert(request, MODE).await
    }

    async fn handle_update_object(
        &self,
        req: update::ObjectRequest,
    ) -> Result<object::Location, Status> {
        let request = self.update_object_request(req)?;
        self.handle_update(request, MODE).await
    }

    async fn handle_upsert_object(
        &self,
        req: upsert::ObjectRequest,
    ) -> Result<object::Location, Status> {
        let request = self.upsert_object_request(req)?;
        self.handle_upsert(request, MODE).await
    }
}

#[tonic::async_trait]
impl Filter for ValdGrpcServer {
    async fn search_object(
        &self,
        request: Request<search::ObjectRequest>,
    ) -> Result<Response<search::Response>, Status> {
        self.handle_search_object(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn multi_search_object(
        &self,
        request: Request<search::MultiObjectRequest>,
    ) -> Result<Response<search::Responses>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(|r| self.search_object_request(r))
            .collect::<Result<Vec<_>, _>>()?;
        self.handle_multi_search(requests, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn stream_search_object(
        &self,
        request: Request<Streaming<search::ObjectRequest>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_search_object(req))
    }

    async fn insert_object(
        &self,
        request: Request<insert::ObjectRequest>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_insert_object(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn stream_insert_object(
        &self,
        request: Request<Streaming<insert::ObjectRequest>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_insert_object(req))
    }

    async fn multi_insert_object(
        &self,
        request: Request<insert::MultiObjectRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(|r| self.insert_object_request(r))
            .collect::<Result<Vec<_>, _>>()?;
        self.handle_multi_insert(insert::MultiRequest { requests }, MODE)
            .await
            .map(Response::new)
    }

    async fn update_object(
        &self,
        request: Request<update::ObjectRequest>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_update_object(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn stream_update_object(
        &self,
        request: Request<Streaming<update::ObjectRequest>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_update_object(req))
    }

    async fn multi_update_object(
        &self,
        request: Request<update::MultiObjectRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(|r| self.update_object_request(r))
            .collect::<Result<Vec<_>, _>>()?;
        self.handle_multi_update(update::MultiRequest { requests }, MODE)
            .await
            .map(Response::new)
    }

    async fn upsert_object(
        &self,
        request: Request<upsert::ObjectRequest>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_upsert_object(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn stream_upsert_object(
        &self,
        request: Request<Streaming<upsert::ObjectRequest>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_upsert_object(req))
    }

    async fn multi_upsert_object(
        &self,
        request: Request<upsert::MultiObjectRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(|r| self.upsert_object_request(r))
            .collect::<Result<Vec<_>, _>>()?;
        self.handle_multi_upsert(upsert::MultiRequest { requests }, MODE)
            .await
            .map(Response::new)
    }
}
