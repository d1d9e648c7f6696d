pub mod films;
pub mod users;

pub use films::FilmRegistry;
pub use users::UserRegistry;

use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-memory keyed store shared by the film and user registries
///
/// All access goes through one lock, so a write (create or update) is
/// applied in full before any reader can observe the record.
#[derive(Debug)]
pub struct Registry<T> {
    records: RwLock<BTreeMap<u64, T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Clone> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in id order
    pub async fn list_all(&self) -> Vec<T> {
        self.records.read().await.values().cloned().collect()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Assign the next id, build the record with it and store it
    ///
    /// Returns a copy of the stored record.
    pub async fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let mut records = self.records.write().await;
        let id = next_id(&records);
        let record = build(id);
        records.insert(id, record.clone());
        tracing::trace!("Assigned id {}", id);
        record
    }

    /// Apply `apply` to the record stored under `id`
    ///
    /// Returns the updated record, or `None` if the id is unknown.
    pub async fn modify(&self, id: u64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id)?;
        apply(record);
        Some(record.clone())
    }
}

/// Next id: one past the largest id in use, 1 for an empty store.
/// Ids are never handed out twice because records are never removed.
fn next_id<T>(records: &BTreeMap<u64, T>) -> u64 {
    records.keys().max().map_or(1, |max| max + 1)
}
