//! Turning binary objects into vectors for the object-based operations.

use crate::error::{Error, Result};

pub trait Vectorizer: Send + Sync {
    fn vectorize(&self, object: &[u8]) -> Result<Vec<f32>>;
}

/// Reads the object as packed little-endian `f32` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawF32Vectorizer;

impl Vectorizer for RawF32Vectorizer {
    fn vectorize(&self, object: &[u8]) -> Result<Vec<f32>> {
        if object.len() % 4 != 0 {
            return Err(Error::Validation(format!(
                "object length {} is not a multiple of 4",
                object.len()
            )));
        }
        Ok(object
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }
}

/// Encode a vector the way [`RawF32Vectorizer`] reads it.
pub fn encode_f32(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}
