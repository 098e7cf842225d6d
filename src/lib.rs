//! Commander decklist analyzer.
//!
//! Parses free-text decklists, resolves each card against a trimmed MTGJSON
//! card index, and reports deck-level statistics: total cards, average mana
//! value, color identity and a best-guess commander.
//!
//! # Quick start
//!
//! ```no_run
//! use commander_deck_analyzer::DeckAnalyzer;
//!
//! let analyzer = DeckAnalyzer::builder()
//!     .dataset_path("data/mtgjson/atomic-trimmed.json")
//!     .build();
//!
//! let report = analyzer.analyze("1 Atraxa, Praetors' Voice\n1 Sol Ring");
//! println!("{} cards, commander: {:?}", report.total_cards, report.commander);
//! ```
//!
//! When the dataset file is missing or corrupt the analyzer still works in
//! stub mode: totals come from parsing alone and every card is unresolved.

pub mod analyzer;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod models;
pub mod parser;

pub use analyzer::{analyze_decklist, DeckAnalyzer, DeckAnalyzerBuilder};
#[cfg(feature = "async")]
pub use async_client::AsyncDeckAnalyzer;
pub use error::{AnalyzerError, Result};
pub use index::{CardIndex, IndexCache};
pub use models::{AnalysisSource, CardRecord, DeckAnalysis, DeckAnalysisCard, DecklistEntry};
pub use parser::parse_decklist;

use std::fmt;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DeckAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "DeckAnalyzer(source=full-index, cards={})", index.len()),
            None => write!(f, "DeckAnalyzer(source=stub)"),
        }
    }
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisSource::FullIndex => f.write_str("full-index"),
            AnalysisSource::Stub => f.write_str("stub"),
        }
    }
}
