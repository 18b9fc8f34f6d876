use serde::{Deserialize, Serialize};

/// A stored vector with its timestamp and opaque metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    pub metadata: Option<Vec<u8>>,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            timestamp: 0,
            metadata: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_metadata(mut self, metadata: Vec<u8>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The same record without its metadata.
    pub fn without_metadata(mut self) -> Self {
        self.metadata = None;
        self
    }
}
