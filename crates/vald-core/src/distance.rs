//! Distance functions used by the index and by linear search.
//!
//! Every function returns a distance where lower means more similar, so
//! results from any [`DistanceType`] can be ordered the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceType {
    /// Manhattan distance: sum(|a[i] - b[i]|)
    L1,
    /// Euclidean distance: sqrt(sum((a[i] - b[i])^2))
    L2,
    /// Cosine distance: 1 - (a · b) / (||a|| * ||b||)
    Cosine,
    /// Negated dot product: -(a · b)
    InnerProduct,
}

impl DistanceType {
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::L1 => manhattan_distance(a, b),
            Self::L2 => euclidean_distance(a, b),
            Self::Cosine => cosine_distance(a, b),
            Self::InnerProduct => -inner_product(a, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::Cosine => "cosine",
            Self::InnerProduct => "innerproduct",
        }
    }
}

impl fmt::Display for DistanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l1" | "manhattan" => Ok(Self::L1),
            "l2" | "euclidean" => Ok(Self::L2),
            "cosine" | "cos" => Ok(Self::Cosine),
            "innerproduct" | "ip" | "dot" => Ok(Self::InnerProduct),
            other => Err(Error::Validation(format!("unknown distance type: {other}"))),
        }
    }
}

#[inline]
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    euclidean_distance_squared(a, b).sqrt()
}

/// Squared Euclidean distance, processed in chunks of 4 for better
/// auto-vectorization.
#[inline]
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");

    let mut sum = 0.0f32;
    let chunks = a.len() / 4;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];
        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    for i in (chunks * 4)..a.len() {
        let d = a[i] - b[i];
        sum += d * d;
    }

    sum
}

/// Returns a value in `[0, 2]`. Zero vectors are treated as orthogonal.
#[inline]
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom < f32::EPSILON {
        return 1.0;
    }

    1.0 - (dot / denom).clamp(-1.0, 1.0)
}

#[inline]
pub fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// L2 norm of a single vector.
#[inline]
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        let d = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
        assert!((d - 27.0f32.sqrt()).abs() < 1e-5);
        // Longer than one chunk.
        let a = [1.0; 9];
        let b = [0.0; 9];
        assert!((euclidean_distance(&a, &b) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan_distance(&[1.0, -1.0], &[0.0, 1.0]), 3.0);
    }

    #[test]
    fn test_cosine() {
        assert!(cosine_distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-6);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    #[test]
    fn test_inner_product_lower_is_closer() {
        let q = [1.0, 1.0];
        let near = DistanceType::InnerProduct.distance(&q, &[2.0, 2.0]);
        let far = DistanceType::InnerProduct.distance(&q, &[0.5, 0.5]);
        assert!(near < far);
    }

    #[test]
    fn test_parse_and_display() {
        for dt in [
            DistanceType::L1,
            DistanceType::L2,
            DistanceType::Cosine,
            DistanceType::InnerProduct,
        ] {
            assert_eq!(dt.to_string().parse::<DistanceType>().unwrap(), dt);
        }
        assert_eq!("Euclidean".parse::<DistanceType>().unwrap(), DistanceType::L2);
        assert!("hamming".parse::<DistanceType>().is_err());
    }
}
