use std::collections::HashMap;
use std::sync::RwLock;

use crate::deadline::Deadline;
use crate::distance::DistanceType;
use crate::error::{Error, Result};
use crate::index::VectorIndex;

/// Exact k-NN index that scans every vector on search.
///
/// Ties are broken by id so results are deterministic.
pub struct FlatIndex {
    vectors: RwLock<HashMap<String, Vec<f32>>>,
    dimension: usize,
    distance: DistanceType,
}

impl FlatIndex {
    pub fn new(dimension: usize, distance: DistanceType) -> Self {
        Self {
            vectors: RwLock::new(HashMap::new()),
            dimension,
            distance,
        }
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::Index(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                vector.len()
            )));
        }
        Ok(())
    }
}

impl VectorIndex for FlatIndex {
    fn add(&self, id: &str, vector: &[f32]) -> Result<()> {
        self.check_dimension(vector)?;
        self.vectors
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.to_string(), vector.to_vec());
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool> {
        Ok(self
            .vectors
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some())
    }

    fn search(
        &self,
        query: &[f32],
        limit: usize,
        deadline: &Deadline,
    ) -> Result<Vec<(String, f32)>> {
        self.check_dimension(query)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let vectors = self.vectors.read().unwrap_or_else(|e| e.into_inner());
        let mut results = Vec::with_capacity(vectors.len());
        for (step, (id, v)) in vectors.iter().enumerate() {
            deadline.check_at(step)?;
            results.push((id.clone(), self.distance.distance(query, v)));
        }
        results.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        results.truncate(limit);
        Ok(results)
    }

    fn clear(&self) {
        self.vectors.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn distance_type(&self) -> DistanceType {
        self.distance
    }

    fn index_type(&self) -> &'static str {
        "flat"
    }

    fn len(&self) -> usize {
        self.vectors.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> FlatIndex {
        FlatIndex::new(2, DistanceType::L2)
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = create_test_index();
        index.add("far", &[10.0, 10.0]).unwrap();
        index.add("near", &[1.0, 0.0]).unwrap();
        index.add("mid", &[3.0, 0.0]).unwrap();

        let results = index.search(&[0.0, 0.0], 2, &Deadline::none()).unwrap();
        let ids: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert!((results[0].1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ties_break_by_id() {
        let index = create_test_index();
        index.add("b", &[1.0, 0.0]).unwrap();
        index.add("a", &[0.0, 1.0]).unwrap();
        let results = index.search(&[0.0, 0.0], 2, &Deadline::none()).unwrap();
        assert_eq!(results[0].0, "a");
        assert_eq!(results[1].0, "b");
    }

    #[test]
    fn test_add_replaces_and_remove() {
        let index = create_test_index();
        index.add("a", &[1.0, 1.0]).unwrap();
        index.add("a", &[2.0, 2.0]).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.remove("a").unwrap());
        assert!(!index.remove("a").unwrap());
        assert!(index.is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let index = create_test_index();
        assert!(matches!(index.add("a", &[1.0]), Err(Error::Index(_))));
        assert!(index.search(&[1.0, 2.0, 3.0], 1, &Deadline::none()).is_err());
        assert!(index.search(&[1.0, 2.0], 0, &Deadline::none()).unwrap().is_empty());
    }

    #[test]
    fn test_search_stops_at_deadline() {
        let index = create_test_index();
        for i in 0..200 {
            index.add(&format!("v{i}"), &[i as f32, 0.0]).unwrap();
        }
        let expired = Deadline::after(Some(std::time::Duration::ZERO));
        assert!(matches!(
            index.search(&[0.0, 0.0], 5, &expired),
            Err(Error::DeadlineExceeded(_))
        ));
    }
}
