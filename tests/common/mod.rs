//! Shared test fixtures for the deck analyzer integration tests.
//!
//! Provides a small sample card dataset (Atraxa, Sol Ring, Arcane Signet)
//! written to a temporary directory, plus helpers for building indexes
//! directly from records.

#![allow(dead_code)]

use commander_deck_analyzer::{CardIndex, CardRecord};
use std::path::PathBuf;

pub const SCENARIO_DECKLIST: &str =
    "1 Atraxa, Praetors' Voice\n1 Sol Ring\n2 Arcane Signet\n1 Unknown Card";

/// The sample dataset in its on-disk JSON shape.
pub fn sample_dataset() -> serde_json::Value {
    serde_json::json!({
        "meta": {
            "generatedAt": "2024-01-01T00:00:00.000Z",
            "commanderOnly": false,
            "source": "AtomicCards.json"
        },
        "cards": [
            {
                "name": "Atraxa, Praetors' Voice",
                "manaValue": 4,
                "colorIdentity": ["W", "U", "B", "G"],
                "type": "Legendary Creature — Angel Horror",
                "types": ["Legendary", "Creature"]
            },
            {
                "name": "Sol Ring",
                "manaValue": 1,
                "colorIdentity": [],
                "type": "Artifact",
                "types": ["Artifact"]
            },
            {
                "name": "Arcane Signet",
                "manaValue": 2,
                "colorIdentity": ["W", "U", "B", "G"],
                "type": "Artifact",
                "types": ["Artifact"]
            }
        ]
    })
}

/// Write the sample dataset into a fresh temp dir.
///
/// Returns `(dataset_path, TempDir)`. Keep the `TempDir` alive for the
/// duration of the test.
pub fn write_sample_dataset() -> (PathBuf, tempfile::TempDir) {
    write_dataset(&sample_dataset().to_string())
}

/// Write arbitrary dataset contents into a fresh temp dir.
pub fn write_dataset(contents: &str) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("atomic-trimmed.json");
    std::fs::write(&path, contents).unwrap();
    (path, tmp_dir)
}

/// The sample dataset as an in-memory index.
pub fn sample_index() -> CardIndex {
    let dataset: commander_deck_analyzer::models::TrimmedDataset =
        serde_json::from_value(sample_dataset()).unwrap();
    CardIndex::from_records(dataset.cards)
}

pub fn record(name: &str) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        ..Default::default()
    }
}
