//! Boxed response streams and stream payload helpers.

use tonic::Status;

use crate::google::rpc::Status as RpcStatus;
use crate::payload::v1::{object, search};

/// Boxed server-side response stream used for every streaming RPC; the same
/// type the generated default methods return.
pub type ResponseStream<T> = tonic::codegen::BoxStream<T>;

/// Convert a [`tonic::Status`] into the `google.rpc.Status` message carried
/// inside stream payloads.
pub fn rpc_status(status: &Status) -> RpcStatus {
    RpcStatus {
        code: status.code() as i32,
        message: status.message().to_string(),
    }
}

/// A stream message whose `payload` oneof carries either a value or the
/// error status of the request it answers.
pub trait StreamPayload: Sized {
    type Value;

    fn from_result(result: Result<Self::Value, Status>) -> Self;

    /// Split the message back into the carried value or status.
    ///
    /// A message with no payload set is reported as `INTERNAL`.
    fn into_result(self) -> Result<Self::Value, Status>;
}

fn status_from_rpc(status: RpcStatus) -> Status {
    Status::new(tonic::Code::from_i32(status.code), status.message)
}

fn missing_payload() -> Status {
    Status::internal("stream message carries no payload")
}

impl StreamPayload for object::StreamLocation {
    type Value = object::Location;

    fn from_result(result: Result<object::Location, Status>) -> Self {
        use object::stream_location::Payload;
        let payload = match result {
            Ok(location) => Payload::Location(location),
            Err(status) => Payload::Status(rpc_status(&status)),
        };
        Self {
            payload: Some(payload),
        }
    }

    fn into_result(self) -> Result<object::Location, Status> {
        use object::stream_location::Payload;
        match self.payload {
            Some(Payload::Location(location)) => Ok(location),
            Some(Payload::Status(status)) => Err(status_from_rpc(status)),
            None => Err(missing_payload()),
        }
    }
}

impl StreamPayload for object::StreamVector {
    type Value = object::Vector;

    fn from_result(result: Result<object::Vector, Status>) -> Self {
        use object::stream_vector::Payload;
        let payload = match result {
            Ok(vector) => Payload::Vector(vector),
            Err(status) => Payload::Status(rpc_status(&status)),
        };
        Self {
            payload: Some(payload),
        }
    }

    fn into_result(self) -> Result<object::Vector, Status> {
        use object::stream_vector::Payload;
        match self.payload {
            Some(Payload::Vector(vector)) => Ok(vector),
            Some(Payload::Status(status)) => Err(status_from_rpc(status)),
            None => Err(missing_payload()),
        }
    }
}

impl StreamPayload for object::StreamDistance {
    type Value = object::Distance;

    fn from_result(result: Result<object::Distance, Status>) -> Self {
        use object::stream_distance::Payload;
        let payload = match result {
            Ok(distance) => Payload::Distance(distance),
            Err(status) => Payload::Status(rpc_status(&status)),
        };
        Self {
            payload: Some(payload),
        }
    }

    fn into_result(self) -> Result<object::Distance, Status> {
        use object::stream_distance::Payload;
        match self.payload {
            Some(Payload::Distance(distance)) => Ok(distance),
            Some(Payload::Status(status)) => Err(status_from_rpc(status)),
            None => Err(missing_payload()),
        }
    }
}

impl StreamPayload for object::list::Response {
    type Value = object::Vector;

    fn from_result(result: Result<object::Vector, Status>) -> Self {
        use object::list::response::Payload;
        let payload = match result {
            Ok(vector) => Payload::Vector(vector),
            Err(status) => Payload::Status(rpc_status(&status)),
        };
        Self {
            payload: Some(payload),
        }
    }

    fn into_result(self) -> Result<object::Vector, Status> {
        use object::list::response::Payload;
        match self.payload {
            Some(Payload::Vector(vector)) => Ok(vector),
            Some(Payload::Status(status)) => Err(status_from_rpc(status)),
            None => Err(missing_payload()),
        }
    }
}

impl StreamPayload for search::StreamResponse {
    type Value = search::Response;

    fn from_result(result: Result<search::Response, Status>) -> Self {
        use search::stream_response::Payload;
        let payload = match result {
            Ok(response) => Payload::Response(response),
            Err(status) => Payload::Status(rpc_status(&status)),
        };
        Self {
            payload: Some(payload),
        }
    }

    fn into_result(self) -> Result<search::Response, Status> {
        use search::stream_response::Payload;
        match self.payload {
            Some(Payload::Response(response)) => Ok(response),
            Some(Payload::Status(status)) => Err(status_from_rpc(status)),
            None => Err(missing_payload()),
        }
    }
}
