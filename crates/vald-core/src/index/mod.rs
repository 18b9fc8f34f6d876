pub mod flat;

use crate::deadline::Deadline;
use crate::distance::DistanceType;
use crate::error::Result;

pub trait VectorIndex: Send + Sync {
    fn add(&self, id: &str, vector: &[f32]) -> Result<()>;
    /// Returns whether the id was present.
    fn remove(&self, id: &str) -> Result<bool>;
    /// The `limit` nearest ids, closest first. Gives up with
    /// `Error::DeadlineExceeded` once `deadline` passes.
    fn search(
        &self,
        query: &[f32],
        limit: usize,
        deadline: &Deadline,
    ) -> Result<Vec<(String, f32)>>;
    fn clear(&self);
    fn dimension(&self) -> usize;
    fn distance_type(&self) -> DistanceType;
    fn index_type(&self) -> &'static str;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
