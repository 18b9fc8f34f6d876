//! In-memory vector engine behind the Vald API.
//!
//! [`query::ValdEngine`] owns a [`storage::VectorStore`] holding the records
//! and a [`index::VectorIndex`] derived from it. Each operation lives in its
//! own `query::*` module.

pub mod config;
pub mod deadline;
pub mod distance;
pub mod error;
pub mod index;
pub mod model;
pub mod query;
pub mod storage;
pub mod vectorizer;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use query::ValdEngine;
