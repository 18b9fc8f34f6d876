//! Capability-set traits and route registration.
//!
//! [`Server`] is the union of every `vald.v1` service except `Filter`;
//! [`ServerWithFilter`] adds `Filter`; [`ServerWithMetadata`] is the union of
//! the `meta.v1` services. Each trait has a blanket implementation, so any
//! type implementing the member service traits is automatically a member of
//! the capability set.

use std::convert::Infallible;

use tonic::body::Body;
use tonic::codegen::{BoxFuture, Context, Poll, Service, http};
use tonic::server::NamedService;
use tonic::transport::Server as TransportServer;
use tonic::transport::server::Router;
use tonic::{Code, Status};

use crate::meta::v1::insert_with_metadata_server::{InsertWithMetadata, InsertWithMetadataServer};
use crate::meta::v1::object_with_metadata_server::{ObjectWithMetadata, ObjectWithMetadataServer};
use crate::meta::v1::remove_with_metadata_server::{RemoveWithMetadata, RemoveWithMetadataServer};
use crate::meta::v1::search_with_metadata_server::{SearchWithMetadata, SearchWithMetadataServer};
use crate::meta::v1::update_with_metadata_server::{UpdateWithMetadata, UpdateWithMetadataServer};
use crate::meta::v1::upsert_with_metadata_server::{UpsertWithMetadata, UpsertWithMetadataServer};
use crate::rpc;
use crate::unimplemented::unimplemented;
use crate::vald::v1::filter_server::{Filter, FilterServer};
use crate::vald::v1::flush_server::{Flush, FlushServer};
use crate::vald::v1::index_server::{Index, IndexServer};
use crate::vald::v1::insert_server::{Insert, InsertServer};
use crate::vald::v1::object_server::{Object, ObjectServer};
use crate::vald::v1::remove_server::{Remove, RemoveServer};
use crate::vald::v1::search_server::{Search, SearchServer};
use crate::vald::v1::update_server::{Update, UpdateServer};
use crate::vald::v1::upsert_server::{Upsert, UpsertServer};

/// Every `vald.v1` service except `Filter`.
pub trait Server: Insert + Update + Upsert + Remove + Search + Object + Index + Flush {}

impl<T> Server for T where T: Insert + Update + Upsert + Remove + Search + Object + Index + Flush {}

/// [`Server`] plus the object-based `Filter` service.
pub trait ServerWithFilter: Server + Filter {}

impl<T> ServerWithFilter for T where T: Server + Filter {}

/// Every `meta.v1` service.
pub trait ServerWithMetadata:
    InsertWithMetadata
    + UpdateWithMetadata
    + UpsertWithMetadata
    + RemoveWithMetadata
    + SearchWithMetadata
    + ObjectWithMetadata
{
}

impl<T> ServerWithMetadata for T where
    T: InsertWithMetadata
        + UpdateWithMetadata
        + UpsertWithMetadata
        + RemoveWithMetadata
        + SearchWithMetadata
        + ObjectWithMetadata
{
}

/// Wraps a generated `*Server` so that an `UNIMPLEMENTED` answer from a
/// default trait method names the method that was called.
#[derive(Debug, Clone)]
pub struct NameUnimplemented<S> {
    inner: S,
}

impl<S> NameUnimplemented<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: NamedService> NamedService for NameUnimplemented<S> {
    const NAME: &'static str = S::NAME;
}

impl<S, B> Service<http::Request<B>> for NameUnimplemented<S>
where
    S: Service<http::Request<B>, Response = http::Response<Body>, Error = Infallible>,
    S::Future: Send + 'static,
{
    type Response = http::Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let method = rpc::lookup(req.uri().path()).map(|m| m.method);
        let response = self.inner.call(req);
        Box::pin(async move {
            let mut response = response.await?;
            if let Some(method) = method {
                name_unimplemented(response.headers_mut(), method);
            }
            Ok(response)
        })
    }
}

/// Rewrites a trailers-only `UNIMPLEMENTED` status whose message does not
/// mention `method`.
fn name_unimplemented(headers: &mut http::HeaderMap, method: &str) {
    let Some(status) = Status::from_header_map(headers) else {
        return;
    };
    if status.code() != Code::Unimplemented || status.message().contains(method) {
        return;
    }
    // The message is plain ASCII, so encoding cannot fail.
    let _ = unimplemented(method).add_header(headers);
}

/// Register every [`Server`] service on `builder`.
pub fn register<S>(builder: &mut TransportServer, server: S) -> Router
where
    S: Server + Clone,
{
    builder
        .add_service(NameUnimplemented::new(InsertServer::new(server.clone())))
        .add_service(NameUnimplemented::new(UpdateServer::new(server.clone())))
        .add_service(NameUnimplemented::new(UpsertServer::new(server.clone())))
        .add_service(NameUnimplemented::new(RemoveServer::new(server.clone())))
        .add_service(NameUnimplemented::new(SearchServer::new(server.clone())))
        .add_service(NameUnimplemented::new(ObjectServer::new(server.clone())))
        .add_service(NameUnimplemented::new(IndexServer::new(server.clone())))
        .add_service(NameUnimplemented::new(FlushServer::new(server)))
}

/// Register every [`ServerWithFilter`] service on `builder`.
pub fn register_with_filter<S>(builder: &mut TransportServer, server: S) -> Router
where
    S: ServerWithFilter + Clone,
{
    register(builder, server.clone())
        .add_service(NameUnimplemented::new(FilterServer::new(server)))
}

/// Add every [`ServerWithMetadata`] service to an existing router.
pub fn register_with_metadata<S>(router: Router, server: S) -> Router
where
    S: ServerWithMetadata + Clone,
{
    router
        .add_service(NameUnimplemented::new(InsertWithMetadataServer::new(server.clone())))
        .add_service(NameUnimplemented::new(UpdateWithMetadataServer::new(server.clone())))
        .add_service(NameUnimplemented::new(UpsertWithMetadataServer::new(server.clone())))
        .add_service(NameUnimplemented::new(RemoveWithMetadataServer::new(server.clone())))
        .add_service(NameUnimplemented::new(SearchWithMetadataServer::new(server.clone())))
        .add_service(NameUnimplemented::new(ObjectWithMetadataServer::new(server)))
}

/// Build a [`Router`] serving the full API: [`ServerWithFilter`] and
/// [`ServerWithMetadata`] services backed by the same implementation.
///
/// ```rust,ignore
/// let router = vald_api::server::router(vald_api::Unimplemented);
/// router.serve("[::1]:8081".parse()?).await?;
/// ```
pub fn router<S>(server: S) -> Router
where
    S: ServerWithFilter + ServerWithMetadata + Clone,
{
    let mut builder = TransportServer::builder();
    let router = register_with_filter(&mut builder, server.clone());
    register_with_metadata(router, server)
}
