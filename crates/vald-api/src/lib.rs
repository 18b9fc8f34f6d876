//! gRPC API surface of the Vald vector search engine.
//!
//! Message types and service stubs are generated at build time from the
//! `.proto` files under `proto/` via `tonic-prost-build`. The generated
//! modules mirror the protobuf package hierarchy:
//!
//! - [`payload::v1`]: request/response messages shared by every service
//! - [`vald::v1`]: `Insert`, `Update`, `Upsert`, `Remove`, `Search`,
//!   `Object`, `Index`, `Flush` and `Filter` services
//! - [`meta::v1`]: the `*WithMetadata` service variants
//!
//! On top of the generated code this crate provides the capability-set
//! traits ([`Server`], [`ServerWithFilter`], [`ServerWithMetadata`]), the
//! composite clients ([`Client`], [`ClientWithFilter`],
//! [`ClientWithMetadata`]), the RPC catalogue in [`rpc`] and the
//! [`Unimplemented`] service adapter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vald_api::{Client, payload::v1::{insert, object}};
//!
//! let client = Client::connect("http://127.0.0.1:8081").await?;
//! let location = client
//!     .insert()
//!     .insert(insert::Request {
//!         vector: Some(object::Vector {
//!             id: "a".into(),
//!             vector: vec![0.1, 0.2],
//!             ..Default::default()
//!         }),
//!         config: None,
//!     })
//!     .await?
//!     .into_inner();
//! ```

// ---------------------------------------------------------------------------
// Generated protobuf code
// ---------------------------------------------------------------------------

pub mod google {
    pub mod rpc {
        tonic::include_proto!("google.rpc");
    }
}

pub mod payload {
    pub mod v1 {
        tonic::include_proto!("payload.v1");
    }
}

pub mod vald {
    pub mod v1 {
        tonic::include_proto!("vald.v1");
    }
}

pub mod meta {
    pub mod v1 {
        tonic::include_proto!("meta.v1");
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

pub mod client;
pub mod rpc;
pub mod server;
pub mod stream;
pub mod unimplemented;

pub use client::{Client, ClientWithFilter, ClientWithMetadata};
pub use server::{Server, ServerWithFilter, ServerWithMetadata};
pub use stream::ResponseStream;
pub use unimplemented::Unimplemented;
