use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardRecord — One entry of the trimmed card index
// ---------------------------------------------------------------------------

/// A single card as stored in the trimmed dataset.
///
/// Only `name` is required. Everything the analyzer reads (`mana_value`,
/// `color_identity`, `type_line`, `types`) is optional, and an absent
/// `color_identity` means colorless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_identity: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legalities: Option<CommanderLegality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<CardIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faces: Option<Vec<CardFace>>,
}

impl CardRecord {
    /// Whether this card qualifies under the commander heuristic: a type line
    /// containing "Legendary Creature", or "Legendary" among the coarse types.
    pub fn is_commander_candidate(&self) -> bool {
        let by_type_line = self
            .type_line
            .as_deref()
            .map(|t| t.contains(crate::config::COMMANDER_TYPE_LINE))
            .unwrap_or(false);
        let by_types = self
            .types
            .as_ref()
            .map(|ts| ts.iter().any(|t| t == crate::config::COMMANDER_SUPERTYPE))
            .unwrap_or(false);
        by_type_line || by_types
    }

    /// The type line, or the coarse types joined by spaces when the dataset
    /// carries no full type line.
    pub fn display_type_line(&self) -> Option<String> {
        match (&self.type_line, &self.types) {
            (Some(line), _) => Some(line.clone()),
            (None, Some(types)) => Some(types.join(" ")),
            (None, None) => None,
        }
    }

    /// Whether the record is marked `Legal` in the Commander format.
    pub fn is_commander_legal(&self) -> bool {
        self.legalities
            .as_ref()
            .and_then(|l| l.commander.as_deref())
            == Some("Legal")
    }
}

/// The single legality flag kept by the trimmed dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommanderLegality {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commander: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scryfall_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scryfall_oracle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtgjson_v4_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

// ---------------------------------------------------------------------------
// CardFace — One face of a multi-faced card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_identity: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

// ---------------------------------------------------------------------------
// TrimmedDataset — The on-disk shape of the card index file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrimmedDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    pub cards: Vec<CardRecord>,
}

// ---------------------------------------------------------------------------
// AtomicCard — One variant from MTGJSON's AtomicCards.json
// ---------------------------------------------------------------------------

/// A card variant as published in MTGJSON `AtomicCards.json`.
///
/// Unknown fields are ignored. `convertedManaCost` and `cmc` are accepted as
/// legacy spellings of the mana value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomicCard {
    pub name: Option<String>,
    pub face_name: Option<String>,
    pub mana_cost: Option<String>,
    pub mana_value: Option<f64>,
    pub converted_mana_cost: Option<f64>,
    pub cmc: Option<f64>,
    pub colors: Option<Vec<String>>,
    pub color_identity: Option<Vec<String>>,
    pub types: Option<Vec<String>>,
    pub supertypes: Option<Vec<String>>,
    pub subtypes: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub layout: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub type_line: Option<String>,
    pub side: Option<String>,
    pub identifiers: Option<CardIdentifiers>,
    pub legalities: Option<CommanderLegality>,
    pub card_faces: Option<Vec<AtomicCard>>,
}

impl AtomicCard {
    /// Mana value, falling back to the legacy field names.
    pub fn resolved_mana_value(&self) -> Option<f64> {
        self.mana_value.or(self.converted_mana_cost).or(self.cmc)
    }
}
