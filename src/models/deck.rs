use serde::{Deserialize, Serialize};

use super::card::CardRecord;

// ---------------------------------------------------------------------------
// DecklistEntry — One parsed line of user input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecklistEntry {
    pub count: u32,
    pub name: String,
}

impl DecklistEntry {
    pub fn new(count: u32, name: impl Into<String>) -> Self {
        Self {
            count,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisSource — Whether a card index backed the analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    #[serde(rename = "full-index", alias = "trimmed-mtgjson")]
    FullIndex,
    #[serde(rename = "stub")]
    Stub,
}

// ---------------------------------------------------------------------------
// DeckAnalysisCard — A decklist entry merged with its resolved record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAnalysisCard {
    pub name: String,
    pub count: u32,
    pub mana_value: Option<f64>,
    pub type_line: Option<String>,
    pub types: Option<Vec<String>>,
    pub color_identity: Vec<String>,
    #[serde(skip)]
    resolved: bool,
}

impl DeckAnalysisCard {
    /// Pair an entry with its lookup result. `None` yields the all-absent
    /// defaults.
    pub fn from_entry(entry: &DecklistEntry, record: Option<&CardRecord>) -> Self {
        match record {
            Some(card) => Self {
                name: entry.name.clone(),
                count: entry.count,
                mana_value: card.mana_value,
                type_line: card.display_type_line(),
                types: card.types.clone(),
                color_identity: card.color_identity.clone().unwrap_or_default(),
                resolved: true,
            },
            None => Self {
                name: entry.name.clone(),
                count: entry.count,
                mana_value: None,
                type_line: None,
                types: None,
                color_identity: Vec::new(),
                resolved: false,
            },
        }
    }

    /// Whether the entry matched a record in the card index.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

// ---------------------------------------------------------------------------
// DeckAnalysis — The aggregate report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckAnalysis {
    pub total_cards: u32,
    pub avg_cmc: Option<f64>,
    pub colors: Vec<String>,
    pub commander: Option<String>,
    pub source: AnalysisSource,
    pub cards: Vec<DeckAnalysisCard>,
}

impl DeckAnalysis {
    /// Names of entries that did not match any card, in input order.
    pub fn unresolved(&self) -> Vec<&str> {
        self.cards
            .iter()
            .filter(|c| !c.is_resolved())
            .map(|c| c.name.as_str())
            .collect()
    }
}
