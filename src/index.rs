//! In-memory card reference index built from the trimmed dataset file.
//!
//! The index maps case-folded card names to [`CardRecord`]s. It is built once
//! and never mutated; a missing or corrupt dataset yields no index at all, and
//! callers fall back to stub analysis.

use crate::error::{AnalyzerError, Result};
use crate::models::{CardRecord, TrimmedDataset};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// CardIndex
// ---------------------------------------------------------------------------

/// Read-only lookup from card name to [`CardRecord`].
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: HashMap<String, CardRecord>,
    meta: Option<serde_json::Value>,
}

impl CardIndex {
    /// Build an index from records. When two records share a name (ignoring
    /// case), the first one is kept.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CardRecord>,
    {
        let mut cards = HashMap::new();
        for record in records {
            cards.entry(fold(&record.name)).or_insert(record);
        }
        Self { cards, meta: None }
    }

    fn from_dataset(dataset: TrimmedDataset) -> Self {
        let mut index = Self::from_records(dataset.cards);
        index.meta = dataset.meta;
        index
    }

    /// Load the dataset at `path`, degrading to `None` on any failure.
    ///
    /// A missing file is the expected "no dataset" state and is only logged
    /// at debug level. A file that exists but cannot be read or parsed is
    /// reported with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(index) => {
                tracing::info!(path = %path.display(), cards = index.len(), "loaded card index");
                Some(index)
            }
            Err(AnalyzerError::NotFound(msg)) => {
                tracing::debug!("{}; continuing without card index", msg);
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load card index");
                None
            }
        }
    }

    /// Load the dataset at `path`, reporting why it could not be loaded.
    ///
    /// Files ending in `.gz` are decompressed transparently.
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalyzerError::NotFound(format!(
                "Card dataset {} does not exist",
                path.display()
            )));
        }

        let contents = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            let file = fs::File::open(path)?;
            let mut reader = BufReader::new(GzDecoder::new(BufReader::new(file)));
            let mut contents = String::new();
            reader.read_to_string(&mut contents)?;
            contents
        } else {
            fs::read_to_string(path)?
        };

        let dataset: TrimmedDataset = serde_json::from_str(&contents)?;
        Ok(Self::from_dataset(dataset))
    }

    /// Exact, case-insensitive lookup by card name.
    pub fn lookup(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(&fold(name))
    }

    /// The `meta` block of the dataset file, if it had one.
    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.meta.as_ref()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

// ---------------------------------------------------------------------------
// IndexCache
// ---------------------------------------------------------------------------

/// A single lazily filled slot holding a loaded [`CardIndex`].
///
/// The first successful load is kept for the lifetime of the cache, whatever
/// path later callers pass. Failed loads leave the slot empty so the next call
/// tries again. The lock is held while loading, so concurrent first callers
/// wait for one read instead of racing.
#[derive(Debug, Default)]
pub struct IndexCache {
    slot: Mutex<Option<Arc<CardIndex>>>,
}

impl IndexCache {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached index, loading it from `path` if the slot is empty.
    pub fn get_or_load<P: AsRef<Path>>(&self, path: P) -> Option<Arc<CardIndex>> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(index) = slot.as_ref() {
            return Some(Arc::clone(index));
        }
        let index = Arc::new(CardIndex::load(path)?);
        *slot = Some(Arc::clone(&index));
        Some(index)
    }

    /// The cached index, without attempting a load.
    pub fn get(&self) -> Option<Arc<CardIndex>> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Drop the cached index so the next call reloads from disk.
    pub fn invalidate(&self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

static SHARED: IndexCache = IndexCache::new();

/// The process-wide index cache used by [`analyze_decklist`](crate::analyze_decklist).
pub fn shared_cache() -> &'static IndexCache {
    &SHARED
}

/// Load (or reuse) the process-wide index from `path`.
pub fn shared_index<P: AsRef<Path>>(path: P) -> Option<Arc<CardIndex>> {
    shared_cache().get_or_load(path)
}
