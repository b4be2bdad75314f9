// ==========================================
// Safety Operations Platform - Keyed record store
// ==========================================
// The import pipeline's only view of persistence: keyed lookup,
// insert, update-by-key. Red line: no business rules in here.
// ==========================================

use crate::domain::types::NaturalKey;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// RecordStore trait
// ==========================================
// Implementors: the SQLite stores and InMemoryStore.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: NaturalKey + Clone + Send + Sync;

    /// Look up an existing record by natural key
    async fn find_by_key(
        &self,
        key: &<Self::Record as NaturalKey>::Key,
    ) -> RepositoryResult<Option<Self::Record>>;

    /// Insert a new record
    async fn insert(&self, record: Self::Record) -> RepositoryResult<()>;

    /// Replace the record stored under `key` with the full new record
    /// (last-write-wins; no field-level merge)
    async fn update_by_key(
        &self,
        key: &<Self::Record as NaturalKey>::Key,
        record: Self::Record,
    ) -> RepositoryResult<()>;
}

// ==========================================
// InMemoryStore - mock data source
// ==========================================
// Used when the caller selects DataSource::InMemory and throughout
// the test suite. Cloning shares the underlying map.
pub struct InMemoryStore<R: NaturalKey> {
    records: Arc<Mutex<HashMap<R::Key, R>>>,
}

impl<R: NaturalKey> Clone for InMemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: NaturalKey> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: NaturalKey> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<R: NaturalKey + Clone> InMemoryStore<R> {
    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one record, for assertions
    pub fn get(&self, key: &R::Key) -> Option<R> {
        self.records.lock().ok().and_then(|m| m.get(key).cloned())
    }
}

#[async_trait]
impl<R> RecordStore for InMemoryStore<R>
where
    R: NaturalKey + Clone + Send + Sync,
{
    type Record = R;

    async fn find_by_key(&self, key: &R::Key) -> RepositoryResult<Option<R>> {
        let map = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    async fn insert(&self, record: R) -> RepositoryResult<()> {
        let mut map = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        map.insert(record.natural_key(), record);
        Ok(())
    }

    async fn update_by_key(&self, key: &R::Key, record: R) -> RepositoryResult<()> {
        let mut map = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        map.insert(key.clone(), record);
        Ok(())
    }
}
