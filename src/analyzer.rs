//! Decklist analysis: parse, resolve against the card index, aggregate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::index::CardIndex;
use crate::models::{AnalysisSource, DeckAnalysis, DeckAnalysisCard};
use crate::parser::parse_decklist;

// ---------------------------------------------------------------------------
// DeckAnalyzerBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`DeckAnalyzer`].
///
/// Either hand it a ready [`CardIndex`] or a dataset path to load from. A
/// dataset that is missing or unreadable produces an analyzer in stub mode
/// rather than an error.
#[derive(Default)]
pub struct DeckAnalyzerBuilder {
    dataset_path: Option<PathBuf>,
    index: Option<Arc<CardIndex>>,
}

impl DeckAnalyzerBuilder {
    /// Load the card index from this file. Defaults to
    /// [`config::dataset_path()`](crate::config::dataset_path).
    pub fn dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use an already constructed index instead of loading one.
    pub fn index(mut self, index: impl Into<Arc<CardIndex>>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Build the analyzer, reading the dataset unless an index was supplied.
    pub fn build(self) -> DeckAnalyzer {
        if let Some(index) = self.index {
            return DeckAnalyzer::with_index(index);
        }
        let path = self.dataset_path.unwrap_or_else(crate::config::dataset_path);
        DeckAnalyzer {
            index: CardIndex::load(path).map(Arc::new),
        }
    }
}

// ---------------------------------------------------------------------------
// DeckAnalyzer
// ---------------------------------------------------------------------------

/// Analyzes decklists against an optional, shared card index.
///
/// Without an index every lookup misses and reports carry
/// [`AnalysisSource::Stub`].
#[derive(Debug, Clone, Default)]
pub struct DeckAnalyzer {
    index: Option<Arc<CardIndex>>,
}

impl DeckAnalyzer {
    pub fn builder() -> DeckAnalyzerBuilder {
        DeckAnalyzerBuilder::default()
    }

    pub fn with_index(index: impl Into<Arc<CardIndex>>) -> Self {
        Self {
            index: Some(index.into()),
        }
    }

    /// An analyzer with no card index.
    pub fn stub() -> Self {
        Self { index: None }
    }

    /// Wrap whatever index the caller obtained, if any.
    pub fn from_shared(index: Option<Arc<CardIndex>>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Option<&CardIndex> {
        self.index.as_deref()
    }

    pub fn source(&self) -> AnalysisSource {
        if self.index.is_some() {
            AnalysisSource::FullIndex
        } else {
            AnalysisSource::Stub
        }
    }

    /// Analyze raw decklist text.
    ///
    /// Blank input is not rejected here: it yields an empty report with zero
    /// cards and no average.
    pub fn analyze(&self, text: &str) -> DeckAnalysis {
        let entries = parse_decklist(text);

        let mut total_cards: u32 = 0;
        let mut cmc_sum = 0.0_f64;
        let mut cmc_weight: u32 = 0;
        let mut seen_colors = HashSet::new();
        let mut colors = Vec::new();
        let mut commander = None;
        let mut cards = Vec::with_capacity(entries.len());

        for entry in &entries {
            total_cards = total_cards.saturating_add(entry.count);
            let record = self.index.as_ref().and_then(|idx| idx.lookup(&entry.name));

            if let Some(card) = record {
                if let Some(mv) = card.mana_value {
                    cmc_sum += mv * f64::from(entry.count);
                    cmc_weight = cmc_weight.saturating_add(entry.count);
                }
                for color in card.color_identity.iter().flatten() {
                    if seen_colors.insert(color.as_str()) {
                        colors.push(color.clone());
                    }
                }
                if commander.is_none() && card.is_commander_candidate() {
                    commander = Some(card.name.clone());
                }
            }

            cards.push(DeckAnalysisCard::from_entry(entry, record));
        }

        let avg_cmc = if cmc_weight > 0 {
            Some(round2(cmc_sum / f64::from(cmc_weight)))
        } else {
            None
        };

        DeckAnalysis {
            total_cards,
            avg_cmc,
            colors,
            commander,
            source: self.source(),
            cards,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Analyze `text` against the process-wide card index, loading it from
/// [`config::dataset_path()`](crate::config::dataset_path) on first use.
pub fn analyze_decklist(text: &str) -> DeckAnalysis {
    let index = crate::index::shared_index(crate::config::dataset_path());
    DeckAnalyzer::from_shared(index).analyze(text)
}
