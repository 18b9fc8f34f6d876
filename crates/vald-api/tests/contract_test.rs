//! Wire-level checks of the generated services against the method catalogue.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Code, Status, Streaming};
use tonic_prost::ProstCodec;

use vald_api::payload::v1::{Empty, flush, insert, object, remove, search, update, upsert};
use vald_api::rpc::{self, StreamingMode};
use vald_api::{Client, ClientWithFilter, ClientWithMetadata, Unimplemented, server};

async fn spawn_unimplemented() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(
        server::router(Unimplemented).serve_with_incoming(TcpListenerStream::new(listener)),
    );
    addr
}

fn assert_unimplemented<T: std::fmt::Debug>(result: Result<T, tonic::Status>, method: &str) {
    let status = result.unwrap_err();
    assert_eq!(status.code(), Code::Unimplemented, "{method}: {status:?}");
    assert_eq!(
        status.message(),
        format!("method {method} not implemented"),
        "{method}"
    );
}

#[test]
fn generated_service_names_match_catalogue() {
    use vald_api::meta::v1::*;
    use vald_api::vald::v1::*;

    let generated = [
        (insert_server::SERVICE_NAME, rpc::INSERT_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (update_server::SERVICE_NAME, rpc::UPDATE_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (upsert_server::SERVICE_NAME, rpc::UPSERT_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (remove_server::SERVICE_NAME, rpc::REMOVE_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (search_server::SERVICE_NAME, rpc::SEARCH_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (object_server::SERVICE_NAME, rpc::OBJECT_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (index_server::SERVICE_NAME, rpc::INDEX_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (flush_server::SERVICE_NAME, rpc::FLUSH_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (filter_server::SERVICE_NAME, rpc::FILTER_RPC_SERVICE_NAME, rpc::PACKAGE_NAME),
        (
            insert_with_metadata_server::SERVICE_NAME,
            rpc::INSERT_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
        (
            update_with_metadata_server::SERVICE_NAME,
            rpc::UPDATE_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
        (
            upsert_with_metadata_server::SERVICE_NAME,
            rpc::UPSERT_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
        (
            remove_with_metadata_server::SERVICE_NAME,
            rpc::REMOVE_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
        (
            search_with_metadata_server::SERVICE_NAME,
            rpc::SEARCH_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
        (
            object_with_metadata_server::SERVICE_NAME,
            rpc::OBJECT_WITH_METADATA_RPC_SERVICE_NAME,
            rpc::META_PACKAGE_NAME,
        ),
    ];

    for (full, service, package) in generated {
        assert_eq!(full, format!("{package}.{service}"));
        assert!(
            rpc::service_methods(package, service).next().is_some(),
            "{full} has no catalogued methods"
        );
    }
}

#[test]
fn list_methods_are_the_only_server_streams() {
    let list = rpc::lookup("/vald.v1.Object/StreamListObject").unwrap();
    assert_eq!(list.mode, StreamingMode::ServerStreaming);
    let list_meta =
        rpc::lookup("/meta.v1.ObjectWithMetadata/StreamListObjectWithMetadata").unwrap();
    assert_eq!(list_meta.mode, StreamingMode::ServerStreaming);
    assert_eq!(
        rpc::lookup("/vald.v1.Insert/StreamInsert").unwrap().mode,
        StreamingMode::Bidirectional
    );
}

#[tokio::test]
async fn vald_services_answer_unimplemented() {
    let addr = spawn_unimplemented().await;
    let client = Client::connect(format!("http://{addr}")).await.unwrap();

    assert_unimplemented(
        client.insert().insert(insert::Request::default()).await,
        rpc::INSERT_RPC_NAME,
    );
    assert_unimplemented(
        client.update().update_timestamp(update::TimestampRequest::default()).await,
        rpc::UPDATE_TIMESTAMP_RPC_NAME,
    );
    assert_unimplemented(
        client.upsert().multi_upsert(upsert::MultiRequest::default()).await,
        rpc::MULTI_UPSERT_RPC_NAME,
    );
    assert_unimplemented(
        client
            .remove()
            .remove_by_timestamp(remove::TimestampRequest::default())
            .await,
        rpc::REMOVE_BY_TIMESTAMP_RPC_NAME,
    );
    assert_unimplemented(
        client.search().linear_search_by_id(search::IdRequest::default()).await,
        rpc::LINEAR_SEARCH_BY_ID_RPC_NAME,
    );
    assert_unimplemented(
        client.object().exists(object::Id::default()).await,
        rpc::EXISTS_RPC_NAME,
    );
    assert_unimplemented(
        client.index().index_statistics_detail(Empty {}).await,
        rpc::INDEX_STATISTICS_DETAIL_RPC_NAME,
    );
    assert_unimplemented(
        client.flush().flush(flush::Request {}).await,
        rpc::FLUSH_RPC_NAME,
    );
}

#[tokio::test]
async fn streaming_methods_answer_unimplemented() {
    let addr = spawn_unimplemented().await;
    let client = Client::connect(format!("http://{addr}")).await.unwrap();

    let requests = tokio_stream::iter(vec![insert::Request::default()]);
    assert_unimplemented(
        client.insert().stream_insert(requests).await,
        rpc::STREAM_INSERT_RPC_NAME,
    );

    let requests = tokio_stream::iter(vec![search::IdRequest::default()]);
    assert_unimplemented(
        client.search().stream_search_by_id(requests).await,
        rpc::STREAM_SEARCH_BY_ID_RPC_NAME,
    );

    assert_unimplemented(
        client.object().stream_list_object(object::list::Request {}).await,
        rpc::STREAM_LIST_OBJECT_RPC_NAME,
    );
}

#[tokio::test]
async fn filter_and_metadata_services_answer_unimplemented() {
    let addr = spawn_unimplemented().await;
    let endpoint = format!("http://{addr}");

    let filter = ClientWithFilter::connect(endpoint.clone()).await.unwrap();
    assert_unimplemented(
        filter
            .filter()
            .multi_insert_object(insert::MultiObjectRequest::default())
            .await,
        rpc::MULTI_INSERT_OBJECT_RPC_NAME,
    );
    // The plain services stay reachable through the filter client.
    assert_unimplemented(
        filter.search().search(search::Request::default()).await,
        rpc::SEARCH_RPC_NAME,
    );

    let meta = ClientWithMetadata::connect(endpoint).await.unwrap();
    assert_unimplemented(
        meta.insert().insert_with_metadata(insert::Request::default()).await,
        rpc::INSERT_WITH_METADATA_RPC_NAME,
    );
    assert_unimplemented(
        meta.update()
            .update_timestamp_with_metadata(update::TimestampRequest::default())
            .await,
        rpc::UPDATE_TIMESTAMP_WITH_METADATA_RPC_NAME,
    );
    assert_unimplemented(
        meta.upsert()
            .multi_upsert_with_metadata(upsert::MultiRequest::default())
            .await,
        rpc::MULTI_UPSERT_WITH_METADATA_RPC_NAME,
    );
    assert_unimplemented(
        meta.remove()
            .remove_by_timestamp_with_metadata(remove::TimestampRequest::default())
            .await,
        rpc::REMOVE_BY_TIMESTAMP_WITH_METADATA_RPC_NAME,
    );
    assert_unimplemented(
        meta.search()
            .search_by_id_with_metadata(search::IdRequest::default())
            .await,
        rpc::SEARCH_BY_ID_WITH_METADATA_RPC_NAME,
    );
    assert_unimplemented(
        meta.object()
            .stream_list_object_with_metadata(object::list::Request {})
            .await,
        rpc::STREAM_LIST_OBJECT_WITH_METADATA_RPC_NAME,
    );
}

/// Status of a call whose stream, if any, fails on its first message.
async fn stream_status<T>(result: Result<tonic::Response<Streaming<T>>, Status>) -> Status {
    match result {
        Err(status) => status,
        Ok(response) => match response.into_inner().message().await {
            Err(status) => status,
            Ok(_) => panic!("stream answered without an error"),
        },
    }
}

#[tokio::test]
async fn every_catalogued_method_names_itself_over_the_wire() {
    let addr = spawn_unimplemented().await;
    let channel = Channel::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect()
        .await
        .unwrap();

    for m in rpc::METHODS {
        let mut grpc = Grpc::new(channel.clone());
        grpc.ready().await.unwrap();
        let path: PathAndQuery = m.path().parse().unwrap();
        let codec = ProstCodec::<Empty, Empty>::default();
        let requests = || tokio_stream::iter(vec![Empty {}]);

        let status = match m.mode {
            StreamingMode::Unary => grpc
                .unary(tonic::Request::new(Empty {}), path, codec)
                .await
                .unwrap_err(),
            StreamingMode::ClientStreaming => grpc
                .client_streaming(tonic::Request::new(requests()), path, codec)
                .await
                .unwrap_err(),
            StreamingMode::ServerStreaming => {
                stream_status(
                    grpc.server_streaming(tonic::Request::new(Empty {}), path, codec)
                        .await,
                )
                .await
            }
            StreamingMode::Bidirectional => {
                stream_status(
                    grpc.streaming(tonic::Request::new(requests()), path, codec)
                        .await,
                )
                .await
            }
        };

        assert_eq!(status.code(), Code::Unimplemented, "{}: {status:?}", m.path());
        assert!(
            status.message().contains(m.method),
            "{}: message '{}' does not name the method",
            m.path(),
            status.message()
        );
    }
}
