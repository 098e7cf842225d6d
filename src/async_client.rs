//! Async wrapper around [`DeckAnalyzer`] for use in async runtimes (Tokio, etc.).
//!
//! Reading the card dataset is blocking file I/O, so building the analyzer
//! runs on the blocking thread pool via [`tokio::task::spawn_blocking`].
//! Analyses are pure in-memory work and are dispatched the same way to keep
//! large decklists off the event loop.
//!
//! # Example
//!
//! ```no_run
//! use commander_deck_analyzer::AsyncDeckAnalyzer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let analyzer = AsyncDeckAnalyzer::builder().build().await.unwrap();
//!     let report = analyzer.analyze("1 Sol Ring").await.unwrap();
//!     println!("{} cards", report.total_cards);
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};
use crate::models::DeckAnalysis;
use crate::DeckAnalyzer;

fn join_error(e: tokio::task::JoinError) -> AnalyzerError {
    AnalyzerError::Task(e.to_string())
}

// ---------------------------------------------------------------------------
// AsyncDeckAnalyzerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDeckAnalyzer`].
#[derive(Default)]
pub struct AsyncDeckAnalyzerBuilder {
    dataset_path: Option<PathBuf>,
    shared: bool,
}

impl AsyncDeckAnalyzerBuilder {
    /// Load the card index from this file instead of the configured default.
    pub fn dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Go through the process-wide index cache on every analysis instead of
    /// loading a private index once.
    ///
    /// A dataset that is missing at build time is picked up by the first
    /// analysis after it appears.
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Load the card index on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncDeckAnalyzer> {
        let path = self
            .dataset_path
            .unwrap_or_else(crate::config::dataset_path);
        let shared = self.shared;
        tokio::task::spawn_blocking(move || {
            let backing = if shared {
                // Warm the cache; a miss here is retried per analysis.
                crate::index::shared_index(&path);
                Backing::Shared(path)
            } else {
                Backing::Fixed(DeckAnalyzer::builder().dataset_path(&path).build())
            };
            AsyncDeckAnalyzer { backing }
        })
        .await
        .map_err(join_error)
    }
}

// ---------------------------------------------------------------------------
// AsyncDeckAnalyzer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Backing {
    Fixed(DeckAnalyzer),
    Shared(PathBuf),
}

impl Backing {
    /// Blocking: may read the dataset in shared mode.
    fn resolve(&self) -> DeckAnalyzer {
        match self {
            Backing::Fixed(analyzer) => analyzer.clone(),
            Backing::Shared(path) => DeckAnalyzer::from_shared(crate::index::shared_index(path)),
        }
    }
}

/// Async wrapper around [`DeckAnalyzer`].
///
/// Cheap to clone; clones share the same card index.
#[derive(Debug, Clone)]
pub struct AsyncDeckAnalyzer {
    backing: Backing,
}

impl AsyncDeckAnalyzer {
    pub fn builder() -> AsyncDeckAnalyzerBuilder {
        AsyncDeckAnalyzerBuilder::default()
    }

    /// Wrap an existing analyzer.
    pub fn from_analyzer(inner: DeckAnalyzer) -> Self {
        Self {
            backing: Backing::Fixed(inner),
        }
    }

    /// Whether analyses re-resolve the process-wide index.
    pub fn is_shared(&self) -> bool {
        matches!(self.backing, Backing::Shared(_))
    }

    /// The synchronous analyzer the next analysis would use.
    pub async fn snapshot(&self) -> Result<DeckAnalyzer> {
        let backing = self.backing.clone();
        tokio::task::spawn_blocking(move || backing.resolve())
            .await
            .map_err(join_error)
    }

    /// Analyze decklist text on the blocking thread pool.
    pub async fn analyze(&self, text: impl Into<String>) -> Result<DeckAnalysis> {
        let backing = self.backing.clone();
        let text = text.into();
        tokio::task::spawn_blocking(move || backing.resolve().analyze(&text))
            .await
            .map_err(join_error)
    }
}
