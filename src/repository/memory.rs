use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::{ContentRepository, Record, RepositoryError};

/// A process-local repository. Useful for the standalone host and for tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    collections: Mutex<BTreeMap<String, Vec<Record>>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object mapping collection names to record arrays.
    /// Records without an `id` are assigned one.
    pub fn from_seed_json(json: &str) -> Result<Self, RepositoryError> {
        let seed: BTreeMap<String, Vec<Record>> =
            serde_json::from_str(json).map_err(|source| RepositoryError::Malformed {
                collection: "<seed>".to_string(),
                source,
            })?;
        let repo = Self::new();
        // Generated ids continue after the highest seeded `doc-N`.
        let highest = seed
            .values()
            .flatten()
            .filter_map(|record| record.id.as_deref()?.strip_prefix("doc-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        repo.next_id.store(highest, Ordering::Relaxed);
        {
            let mut collections = repo.lock()?;
            for (name, records) in seed {
                let records = records
                    .into_iter()
                    .map(|mut record| {
                        if record.id.is_none() {
                            record.id = Some(repo.allocate_id());
                        }
                        record
                    })
                    .collect();
                collections.insert(name, records);
            }
        }
        Ok(repo)
    }

    pub fn from_seed_file(path: &Path) -> Result<Self, RepositoryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_seed_json(&json)
    }

    fn allocate_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("doc-{id}")
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Record>>>, RepositoryError> {
        self.collections
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn list(&self, collection: &str) -> Result<Vec<Record>, RepositoryError> {
        Ok(self.lock()?.get(collection).cloned().unwrap_or_default())
    }

    async fn add(&self, collection: &str, mut record: Record) -> Result<Record, RepositoryError> {
        record.id = Some(self.allocate_id());
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        tracing::debug!(collection, id = ?record.id, "document added");
        Ok(record)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        mut record: Record,
    ) -> Result<(), RepositoryError> {
        let mut collections = self.lock()?;
        let slot = collections
            .get_mut(collection)
            .and_then(|records| {
                records
                    .iter_mut()
                    .find(|existing| existing.id.as_deref() == Some(id))
            })
            .ok_or_else(|| RepositoryError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        record.id = Some(id.to_string());
        *slot = record;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), RepositoryError> {
        let mut collections = self.lock()?;
        let records = collections.get_mut(collection);
        let Some(records) = records else {
            return Err(RepositoryError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        };
        let before = records.len();
        records.retain(|existing| existing.id.as_deref() != Some(id));
        if records.len() == before {
            return Err(RepositoryError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
