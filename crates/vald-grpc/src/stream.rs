//! Serving bidirectional streams one request at a time.

use std::future::Future;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Status, Streaming};

use vald_api::ResponseStream;
use vald_api::stream::StreamPayload;

/// Responses buffered per stream before the handler waits on the client.
const STREAM_BUFFER: usize = 64;

/// Answer every inbound message with exactly one outbound message, in order.
///
/// A failed request is reported in the `status` arm of the response oneof
/// and the stream carries on. A transport error on the inbound side ends the
/// stream with that status. The task stops as soon as the client drops the
/// response stream.
pub fn serve_bidi<Req, Resp, F, Fut>(
    mut inbound: Streaming<Req>,
    handler: F,
) -> ResponseStream<Resp>
where
    Req: Send + 'static,
    Resp: StreamPayload + Send + 'static,
    F: Fn(Req) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Resp::Value, Status>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);

    tokio::spawn(async move {
        loop {
            let request = match inbound.message().await {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(status) => {
                    tracing::debug!(error = %status, "inbound stream failed");
                    let _ = tx.send(Err(status)).await;
                    break;
                }
            };

            let response = Resp::from_result(handler(request).await);
            if tx.send(Ok(response)).await.is_err() {
                tracing::debug!("client dropped the response stream");
                break;
            }
        }
    });

    Box::pin(ReceiverStream::new(rx))
}

/// Send a precomputed sequence of results as a server stream.
pub fn serve_list<Resp>(results: Vec<Result<Resp::Value, Status>>) -> ResponseStream<Resp>
where
    Resp: StreamPayload + Send + 'static,
    Resp::Value: Send + 'static,
{
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);

    tokio::spawn(async move {
        for result in results {
            if tx.send(Ok(Resp::from_result(result))).await.is_err() {
                break;
            }
        }
    });

    Box::pin(ReceiverStream::new(rx))
}
