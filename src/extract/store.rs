//! In-memory store for completed extraction runs
//!
//! Bounded with LRU eviction so long-running instances do not accumulate
//! encoded pages without limit. A completed run stays available for page
//! downloads, selection toggles, and archive export until evicted.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use lru::LruCache;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{OutputFormat, PageRecord};

/// A completed extraction run
#[derive(Debug, Clone)]
pub struct Extraction {
    pub id: Uuid,
    /// Source file name without the `.pdf` extension; seeds export names
    pub base_name: String,
    pub format: OutputFormat,
    pub records: Vec<PageRecord>,
    pub created_at: DateTime<Utc>,
}

/// LRU-bounded store of extraction runs
pub struct ExtractionStore {
    entries: RwLock<LruCache<Uuid, Extraction>>,
}

impl ExtractionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Store a completed run and return its id
    pub fn insert(
        &self,
        base_name: String,
        format: OutputFormat,
        records: Vec<PageRecord>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let extraction = Extraction {
            id,
            base_name,
            format,
            records,
            created_at: Utc::now(),
        };
        self.entries.write().put(id, extraction);
        id
    }

    /// Run a closure against a stored run, promoting it in the LRU order.
    /// Returns `None` when the id is unknown or already evicted.
    pub fn get<T>(&self, id: &Uuid, f: impl FnOnce(&Extraction) -> T) -> Option<T> {
        self.entries.write().get(id).map(|entry| f(entry))
    }

    /// Run a mutating closure against a stored run
    pub fn modify<T>(&self, id: &Uuid, f: impl FnOnce(&mut Extraction) -> T) -> Option<T> {
        self.entries.write().get_mut(id).map(|entry| f(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
