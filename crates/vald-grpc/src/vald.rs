//! `vald.v1` service implementations. Metadata is stripped throughout.

use tonic::{Request, Response, Status, Streaming};

use vald_api::ResponseStream;
use vald_api::payload::v1::{Empty, flush, info, insert, object, remove, search, update, upsert};
use vald_api::vald::v1::flush_server::Flush;
use vald_api::vald::v1::index_server::Index;
use vald_api::vald::v1::insert_server::Insert;
use vald_api::vald::v1::object_server::Object;
use vald_api::vald::v1::remove_server::Remove;
use vald_api::vald::v1::search_server::Search;
use vald_api::vald::v1::update_server::Update;
use vald_api::vald::v1::upsert_server::Upsert;
use vald_core::query::search::SearchMethod;

use crate::convert::{self, Metadata};
use crate::stream::serve_list;
use crate::{ValdGrpcServer, core_error_to_status};

const MODE: Metadata = Metadata::Strip;

#[tonic::async_trait]
impl Insert for ValdGrpcServer {
    async fn insert(
        &self,
        request: Request<insert::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_insert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_insert(
        &self,
        request: Request<Streaming<insert::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_insert(req, MODE))
    }

    async fn multi_insert(
        &self,
        request: Request<insert::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_insert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl Update for ValdGrpcServer {
    async fn update(
        &self,
        request: Request<update::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_update(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_update(
        &self,
        request: Request<Streaming<update::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_update(req, MODE))
    }

    async fn multi_update(
        &self,
        request: Request<update::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_update(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn update_timestamp(
        &self,
        request: Request<update::TimestampRequest>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_update_timestamp(request.into_inner())
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl Upsert for ValdGrpcServer {
    async fn upsert(
        &self,
        request: Request<upsert::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_upsert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_upsert(
        &self,
        request: Request<Streaming<upsert::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_upsert(req, MODE))
    }

    async fn multi_upsert(
        &self,
        request: Request<upsert::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_upsert(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl Remove for ValdGrpcServer {
    async fn remove(
        &self,
        request: Request<remove::Request>,
    ) -> Result<Response<object::Location>, Status> {
        self.handle_remove(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn remove_by_timestamp(
        &self,
        request: Request<remove::TimestampRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_remove_by_timestamp(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn stream_remove(
        &self,
        request: Request<Streaming<remove::Request>>,
    ) -> Result<Response<ResponseStream<object::StreamLocation>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_remove(req))
    }

    async fn multi_remove(
        &self,
        request: Request<remove::MultiRequest>,
    ) -> Result<Response<object::Locations>, Status> {
        self.handle_multi_remove(request.into_inner())
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl Search for ValdGrpcServer {
    async fn search(
        &self,
        request: Request<search::Request>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_request(request.into_inner());
        self.handle_search(req, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn search_by_id(
        &self,
        request: Request<search::IdRequest>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_id_request(request.into_inner());
        self.handle_search(req, SearchMethod::Index, MODE)
            .await
            .map(Response::new)
    }

    async fn stream_search(
        &self,
        request: Request<Streaming<search::Request>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_request(req), SearchMethod::Index, MODE)
        })
    }

    async fn stream_search_by_id(
        &self,
        request: Request<Streaming<search::IdRequest>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_id_request(req), SearchMethod::Index, MODE)
        })
    }

    async fn multi_search(
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

    async fn multi_search_by_id(
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

    async fn linear_search(
        &self,
        request: Request<search::Request>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_request(request.into_inner());
        self.handle_search(req, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }

    async fn linear_search_by_id(
        &self,
        request: Request<search::IdRequest>,
    ) -> Result<Response<search::Response>, Status> {
        let req = convert::search_id_request(request.into_inner());
        self.handle_search(req, SearchMethod::Linear, MODE)
            .await
            .map(Response::new)
    }

    async fn stream_linear_search(
        &self,
        request: Request<Streaming<search::Request>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_request(req), SearchMethod::Linear, MODE)
        })
    }

    async fn stream_linear_search_by_id(
        &self,
        request: Request<Streaming<search::IdRequest>>,
    ) -> Result<Response<ResponseStream<search::StreamResponse>>, Status> {
        bidi!(self, request, |svc, req| {
            svc.handle_search(convert::search_id_request(req), SearchMethod::Linear, MODE)
        })
    }

    async fn multi_linear_search(
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

    async fn multi_linear_search_by_id(
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
impl Object for ValdGrpcServer {
    async fn exists(&self, request: Request<object::Id>) -> Result<Response<object::Id>, Status> {
        self.handle_exists(request.into_inner())
            .await
            .map(Response::new)
    }

    async fn get_object(
        &self,
        request: Request<object::VectorRequest>,
    ) -> Result<Response<object::Vector>, Status> {
        self.handle_get_object(request.into_inner(), MODE)
            .await
            .map(Response::new)
    }

    async fn stream_get_object(
        &self,
        request: Request<Streaming<object::VectorRequest>>,
    ) -> Result<Response<ResponseStream<object::StreamVector>>, Status> {
        bidi!(self, request, |svc, req| svc.handle_get_object(req, MODE))
    }

    async fn stream_list_object(
        &self,
        _request: Request<object::list::Request>,
    ) -> Result<Response<ResponseStream<object::list::Response>>, Status> {
        let vectors = self.handle_list(MODE).await?;
        Ok(Response::new(serve_list(vectors)))
    }

    async fn get_timestamp(
        &self,
        request: Request<object::TimestampRequest>,
    ) -> Result<Response<object::Timestamp>, Status> {
        self.handle_get_timestamp(request.into_inner())
            .await
            .map(Response::new)
    }
}

#[tonic::async_trait]
impl Index for ValdGrpcServer {
    async fn index_info(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<info::index::Count>, Status> {
        self.handle_index_count().await.map(Response::new)
    }

    async fn index_detail(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<info::index::Detail>, Status> {
        let count = self.handle_index_count().await?;
        Ok(Response::new(info::index::Detail {
            counts: self.agent_map(count),
            replica: 1,
            live_agents: 1,
        }))
    }

    async fn index_statistics(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<info::index::Statistics>, Status> {
        let stats = self
            .engine
            .index_statistics()
            .await
            .map_err(core_error_to_status)?;
        Ok(Response::new(convert::statistics(stats)))
    }

    async fn index_statistics_detail(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<info::index::StatisticsDetail>, Status> {
        let stats = self
            .engine
            .index_statistics()
            .await
            .map_err(core_error_to_status)?;
        Ok(Response::new(info::index::StatisticsDetail {
            details: self.agent_map(convert::statistics(stats)),
        }))
    }

    async fn index_property(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<info::index::PropertyDetail>, Status> {
        let property = convert::property(self.engine.index_property());
        Ok(Response::new(info::index::PropertyDetail {
            details: self.agent_map(property),
        }))
    }
}

#[tonic::async_trait]
impl Flush for ValdGrpcServer {
    async fn flush(
        &self,
        _request: Request<flush::Request>,
    ) -> Result<Response<info::index::Count>, Status> {
        let count = self.engine.flush().await.map_err(core_error_to_status)?;
        Ok(Response::new(convert::count(count)))
    }
}
