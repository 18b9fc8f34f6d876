//! `meta.v1` service implementations. Metadata is stored and returned.

use tonic::{Request, Response, Status, Streaming};

use vald_api::ResponseStream;
use vald_api::meta::v1::insert_with_metadata_server::InsertWithMetadata;
use vald_api::meta::v1::object_with_metadata_server::ObjectWithMetadata;
use vald_api::meta::v1::remove_with_metadata_server::RemoveWithMetadata;
use vald_api::meta::v1::search_with_metadata_server::SearchWithMetadata;
use vald_api::meta::v1::update_with_metadata_server::UpdateWithMetadata;
use vald_api::meta::v1::upsert_with_metadata_server::UpsertWithMetadata;
use vald_api::payload::v1::{insert, object, remove, search, update, upsert};
use vald_core::query::search::SearchMethod;

use crate::ValdGrpcServer;
use crate::convert::{self, Metadata};
use crate::stream::serve_list;

const MODE: Metadata = Metadata::Keep;

#[tonic::async_trait]
impl InsertWithMetadata for ValdGrpcServer {
    async fn insert_with_metadata(
        &self,
        request: Request<insert::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_insert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_insert_with_metadata(
        &self,
        request: Request<Streaming<insert::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_insert(req, MODE))
    }

    async fn multi_insert_with_metadata(
        &self,
        request: Request<insert::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_insert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl UpdateWithMetadata for ValdGrpcServer {
    async fn update_with_metadata(
        &self,
        request: Request<update::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_update(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_update_with_metadata(
        &self,
        request: Request<Streaming<update::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_update(req, MODE))
    }

    async fn multi_update_with_metadata(
        &self,
        request: Request<update::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_update(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn update_timestamp_with_metadata(
        &self,
        request: Request<update::TimestampRequest>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_update_timestamp(request.into_inner())
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl UpsertWithMetadata for ValdGrpcServer {
    async fn upsert_with_metadata(
        &self,
        request: Request<upsert::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_upsert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_upsert_with_metadata(
        &self,
        request: Request<Streaming<upsert::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_upsert(req, MODE))
    }

    async fn multi_upsert_with_metadata(
        &self,
        request: Request<upsert::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_upsert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl RemoveWithMetadata for ValdGrpcServer {
    async fn remove_with_metadata(
        &self,
        request: Request<remove::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_remove(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn remove_by_timestamp_with_metadata(
        &self,
        request: Request<remove::TimestampRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_remove_by_timestamp(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn stream_remove_with_metadata(
        &self,
        request: Request<Streaming<remove::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_remove(req))
    }

    async fn multi_remove_with_metadata(
        &self,
        request: Request<remove::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_remove(request.into_inner())
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl SearchWithMetadata for ValdGrpcServer {
    async fn search_with_metadata(
        &self,
        request: Request<search::Request>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_request(request.into_inner());
        self.handle_search(req, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn search_by_id_with_metadata(
        &self,
        request: Request<search::IdRequest>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_id_request(request.into_inner());
        self.handle_search(req, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn stream_search_with_metadata(
        &self,
        request: Request<Streaming<search::Request>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_request(req), SearchMethod::Index, MODE)
        })
    }

    async fn stream_search_by_id_with_metadata(
        &self,
        request: Request<Streaming<search::IdRequest>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_id_request(req), SearchMethod::Index, MODE)
        })
    }

    async fn multi_search_with_metadata(
        &self,
        request: Request<search::MultiRequest>,
    ) -> Result<Response<search::Responses>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(convert::search_request)
            .collect();
        self.handle_multi_search(requests, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn multi_search_by_id_with_metadata(
        &self,
        request: Request<search::MultiIdRequest>,
    ) -> Result<Response<search::Responses>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(convert::search_id_request)
            .collect();
        self.handle_multi_search(requests, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn linear_search_with_metadata(
        &self,
        request: Request<search::Request>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_request(request.into_inner());
        self.handle_search(req, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }

    async fn linear_search_by_id_with_metadata(
        &self,
        request: Request<search::IdRequest>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_id_request(request.into_inner());
        self.handle_search(req, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }

    async fn stream_linear_search_with_metadata(
        &self,
        request: Request<Streaming<search::Request>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_request(req), SearchMethod::Linear, MODE)
        })
    }

    async fn stream_linear_search_by_id_with_metadata(
        &self,
        request: Request<Streaming<search::IdRequest>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_id_request(req), SearchMethod::Linear, MODE)
        })
    }

    async fn multi_linear_search_with_metadata(
        &self,
        request: Request<search::MultiRequest>,
    ) -> Result<Response<search::Responses>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(convert::search_request)
            .collect();
        self.handle_multi_search(requests, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }

    async fn multi_linear_search_by_id_with_metadata(
        &self,
        request: Request<search::MultiIdRequest>,
    ) -> Result<Response<search::Responses>, Status> {
        let requests = request
            .into_inner()
            .requests
            .into_iter()
            .map(convert::search_id_request)
            .collect();
        self.handle_multi_search(requests, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl ObjectWithMetadata for ValdGrpcServer {
    async fn get_object_with_metadata(
        &self,
        request: Request<object::VectorRequest>,
    ) -> Result<Response<object::Vector>, Status> {
        self.handle_get_object(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_get_object_with_metadata(
        &self,
        request: Request<Streaming<object::VectorRequest>>,
    ) -> Result<Response<ResponseStream<object::StreamVector>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_get_object(req, MODE))
    }

    async fn stream_list_object_with_metadata(
        &self,
        _request: Request<object::list::Request>,
    ) -> Result<Response<ResponseStream<object::list::Response>>, Status> {
        let vectors = self.handle_list(MODE).await?;
        Ok(Response::new(serve_list(vectors)))
    }
}
