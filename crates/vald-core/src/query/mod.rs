pub mod flush;
pub mod info;
pub mod insert;
pub mod object;
pub mod remove;
pub mod search;
pub mod snapshot;
pub mod update;
pub mod upsert;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::EngineConfig;
use crate::distance::DistanceType;
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::index::flat::FlatIndex;
use crate::model::location::Location;
use crate::model::timestamp::TimestampCondition;
use crate::model::vector::VectorRecord;
use crate::storage::VectorStore;
use crate::storage::memory::InMemoryStore;
use crate::vectorizer::{RawF32Vectorizer, Vectorizer};

pub struct ValdEngine {
    pub storage: Arc<dyn VectorStore>,
    pub index: Arc<dyn VectorIndex>,
    pub vectorizer: Arc<dyn Vectorizer>,
    pub config: EngineConfig,
    /// Serialises writers so the store and the index never diverge and
    /// batches apply atomically.
    write_gate: tokio::sync::Mutex<()>,
    saving: AtomicBool,
}

impl ValdEngine {
    pub fn new(
        storage: Arc<dyn VectorStore>,
        index: Arc<dyn VectorIndex>,
        config: EngineConfig,
    ) -> Self {
        Self {
            storage,
            index,
            vectorizer: Arc::new(RawF32Vectorizer),
            config,
            write_gate: tokio::sync::Mutex::new(()),
            saving: AtomicBool::new(false),
        }
    }

    /// An engine over [`InMemoryStore`] and [`FlatIndex`] sized by `config`.
    pub fn in_memory(config: EngineConfig) -> Self {
        let storage = Arc::new(InMemoryStore::new());
        let index = Arc::new(FlatIndex::new(config.dimension, config.distance));
        Self::new(storage, index, config)
    }

    pub fn with_vectorizer(mut self, v: Arc<dyn Vectorizer>) -> Self {
        self.vectorizer = v;
        self
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn distance_type(&self) -> DistanceType {
        self.config.distance
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    pub fn vectorize(&self, object: &[u8]) -> Result<Vec<f32>> {
        let vector = self.vectorizer.vectorize(object)?;
        validate_vector(self, &vector)?;
        Ok(vector)
    }

    pub fn location(&self, id: &str) -> Location {
        Location {
            name: self.config.agent_name.clone(),
            uuid: id.to_string(),
            ips: self.config.agent_ips.clone(),
        }
    }

    // Writes

    pub async fn insert(&self, request: insert::InsertRequest) -> Result<Location> {
        insert::execute(self, request).await
    }

    pub async fn insert_many(&self, requests: Vec<insert::InsertRequest>) -> Result<Vec<Location>> {
        insert::execute_many(self, requests).await
    }

    pub async fn update(&self, request: update::UpdateRequest) -> Result<Location> {
        update::execute(self, request).await
    }

    pub async fn update_many(&self, requests: Vec<update::UpdateRequest>) -> Result<Vec<Location>> {
        update::execute_many(self, requests).await
    }

    pub async fn update_timestamp(
        &self,
        request: update::UpdateTimestampRequest,
    ) -> Result<Location> {
        update::update_timestamp(self, request).await
    }

    pub async fn upsert(&self, request: upsert::UpsertRequest) -> Result<Location> {
        upsert::execute(self, request).await
    }

    pub async fn upsert_many(&self, requests: Vec<upsert::UpsertRequest>) -> Result<Vec<Location>> {
        upsert::execute_many(self, requests).await
    }

    pub async fn remove(&self, id: &str) -> Result<Location> {
        remove::execute(self, id).await
    }

    pub async fn remove_many(&self, ids: Vec<String>) -> Result<Vec<Location>> {
        remove::execute_many(self, ids).await
    }

    pub async fn remove_by_timestamp(
        &self,
        conditions: &[TimestampCondition],
    ) -> Result<Vec<Location>> {
        remove::by_timestamp(self, conditions).await
    }

    pub async fn flush(&self) -> Result<info::IndexCount> {
        flush::execute(self).await
    }

    // Reads

    pub async fn search(&self, request: search::SearchRequest) -> Result<search::SearchResponse> {
        search::execute(self, request, search::SearchMethod::Index).await
    }

    pub async fn linear_search(
        &self,
        request: search::SearchRequest,
    ) -> Result<search::SearchResponse> {
        search::execute(self, request, search::SearchMethod::Linear).await
    }

    pub async fn search_many(
        &self,
        requests: Vec<search::SearchRequest>,
        method: search::SearchMethod,
    ) -> Result<Vec<search::SearchResponse>> {
        search::execute_many(self, requests, method).await
    }

    pub async fn get(&self, id: &str) -> Result<VectorRecord> {
        object::get(self, id).await
    }

    pub async fn exists(&self, id: &str) -> Result<String> {
        object::exists(self, id).await
    }

    pub async fn timestamp(&self, id: &str) -> Result<i64> {
        object::timestamp(self, id).await
    }

    pub async fn list(&self) -> Result<Vec<VectorRecord>> {
        object::list(self).await
    }

    pub async fn index_count(&self) -> Result<info::IndexCount> {
        info::count(self).await
    }

    pub async fn index_statistics(&self) -> Result<info::IndexStatistics> {
        info::statistics(self).await
    }

    pub fn index_property(&self) -> info::IndexProperty {
        info::property(self)
    }

    // Persistence

    pub async fn save_snapshot(&self, path: &Path) -> Result<usize> {
        snapshot::save(self, path).await
    }

    pub async fn load_snapshot(&self, path: &Path) -> Result<usize> {
        snapshot::load(self, path).await
    }
}

/// Current time in nanoseconds since the Unix epoch.
pub(crate) fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

pub(crate) fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::Validation("id cannot be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_vector(engine: &ValdEngine, vector: &[f32]) -> Result<()> {
    if vector.len() != engine.dimension() {
        return Err(Error::Validation(format!(
            "expected {} dimensions, got {}",
            engine.dimension(),
            vector.len()
        )));
    }
    if let Some(i) = vector.iter().position(|v| !v.is_finite()) {
        return Err(Error::Validation(format!("non-finite value at index {i}")));
    }
    Ok(())
}

/// Writes staged under the write gate and applied together on commit.
///
/// Reads through a batch see its own staged writes, so a multi-request
/// operation validates every entry against the state the earlier entries
/// would leave behind. Dropping a batch without committing discards it.
pub(crate) struct Batch<'a> {
    engine: &'a ValdEngine,
    _gate: tokio::sync::MutexGuard<'a, ()>,
    staged: HashMap<String, Option<VectorRecord>>,
    order: Vec<String>,
}

impl<'a> Batch<'a> {
    pub(crate) async fn begin(engine: &'a ValdEngine) -> Batch<'a> {
        Batch {
            engine,
            _gate: engine.write_gate.lock().await,
            staged: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub(crate) fn engine(&self) -> &'a ValdEngine {
        self.engine
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Option<VectorRecord>> {
        if let Some(staged) = self.staged.get(id) {
            return Ok(staged.clone());
        }
        self.engine.storage.get(id).await
    }

    pub(crate) fn put(&mut self, record: VectorRecord) {
        let id = record.id.clone();
        self.stage(id, Some(record));
    }

    pub(crate) fn delete(&mut self, id: &str) {
        self.stage(id.to_string(), None);
    }

    fn stage(&mut self, id: String, value: Option<VectorRecord>) {
        if !self.staged.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.staged.insert(id, value);
    }

    pub(crate) async fn commit(mut self) -> Result<()> {
        for id in std::mem::take(&mut self.order) {
            match self.staged.remove(&id) {
                Some(Some(record)) => {
                    self.engine.index.add(&record.id, &record.vector)?;
                    self.engine.storage.put(record).await?;
                }
                Some(None) => {
                    self.engine.storage.delete(&id).await?;
                    self.engine.index.remove(&id)?;
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Runs while the gate is held; used by snapshot loading.
    pub(crate) async fn clear_all(&mut self) -> Result<()> {
        self.staged.clear();
        self.order.clear();
        self.engine.storage.clear().await?;
        self.engine.index.clear();
        Ok(())
    }
}

pub(crate) struct SavingGuard<'a>(&'a AtomicBool);

impl<'a> SavingGuard<'a> {
    pub(crate) fn set(engine: &'a ValdEngine) -> Self {
        engine.saving.store(true, Ordering::Release);
        Self(&engine.saving)
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
