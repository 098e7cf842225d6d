//! Reduce MTGJSON `AtomicCards.json` to the trimmed dataset the card index
//! reads.
//!
//! The input is streamed: the `data` object is visited one card name at a
//! time, so the full file never has to be held as a JSON tree. Output card
//! order follows the input.

use crate::error::{AnalyzerError, Result};
use crate::models::{AtomicCard, CardFace, CardIdentifiers, CardRecord, CommanderLegality};
use flate2::read::GzDecoder;
use serde::de::{DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Outcome of [`trim_atomic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimSummary {
    pub kept: usize,
    pub output: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputMeta<'a> {
    generated_at: String,
    commander_only: bool,
    source: &'a str,
    mtgjson: serde_json::Value,
}

#[derive(Serialize)]
struct OutputFile<'a> {
    meta: OutputMeta<'a>,
    cards: &'a [CardRecord],
}

/// Pick the printing variant to keep for one card name.
///
/// Without `commander_only` the first variant wins. With it, the first
/// variant whose Commander legality is `Legal` wins, and a card with no such
/// variant is dropped.
pub fn select_variant(variants: &[AtomicCard], commander_only: bool) -> Option<&AtomicCard> {
    if !commander_only {
        return variants.first();
    }
    variants.iter().find(|card| {
        card.legalities
            .as_ref()
            .and_then(|l| l.commander.as_deref())
            == Some("Legal")
    })
}

/// Reduce one variant to the trimmed record stored under `name`.
pub fn trim_card(name: &str, card: &AtomicCard) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        face_name: card.face_name.clone(),
        mana_cost: card.mana_cost.clone(),
        mana_value: card.resolved_mana_value(),
        colors: card.colors.clone(),
        color_identity: card.color_identity.clone(),
        types: card.types.clone(),
        supertypes: card.supertypes.clone(),
        subtypes: card.subtypes.clone(),
        keywords: card.keywords.clone(),
        layout: card.layout.clone(),
        power: card.power.clone(),
        toughness: card.toughness.clone(),
        loyalty: card.loyalty.clone(),
        text: card.text.clone(),
        type_line: card.type_line.clone(),
        side: card.side.clone(),
        legalities: card.legalities.as_ref().map(|l| CommanderLegality {
            commander: l.commander.clone(),
        }),
        identifiers: card.identifiers.as_ref().map(|ids| CardIdentifiers {
            scryfall_id: ids.scryfall_id.clone(),
            scryfall_oracle_id: ids.scryfall_oracle_id.clone(),
            oracle_id: ids.oracle_id.clone(),
            mtgjson_v4_id: ids.mtgjson_v4_id.clone(),
            uuid: ids.uuid.clone(),
        }),
        faces: card
            .card_faces
            .as_ref()
            .map(|faces| faces.iter().map(trim_face).collect()),
    }
}

fn trim_face(face: &AtomicCard) -> CardFace {
    CardFace {
        name: face.name.clone().or_else(|| face.face_name.clone()),
        mana_cost: face.mana_cost.clone(),
        mana_value: face.resolved_mana_value(),
        colors: face.colors.clone(),
        color_identity: face.color_identity.clone(),
        types: face.types.clone(),
        supertypes: face.supertypes.clone(),
        subtypes: face.subtypes.clone(),
        keywords: face.keywords.clone(),
        layout: face.layout.clone(),
        power: face.power.clone(),
        toughness: face.toughness.clone(),
        loyalty: face.loyalty.clone(),
        text: face.text.clone(),
        type_line: face.type_line.clone(),
        side: face.side.clone(),
    }
}

/// Trim `input` (plain or `.gz` `AtomicCards.json`) into `output`.
pub fn trim_atomic(input: &Path, output: &Path, commander_only: bool) -> Result<TrimSummary> {
    if !input.exists() {
        return Err(AnalyzerError::NotFound(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    let file = fs::File::open(input)?;
    let reader: Box<dyn Read> = if input.extension().and_then(|e| e.to_str()) == Some("gz") {
        Box::new(BufReader::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut de = serde_json::Deserializer::from_reader(reader);
    let atomic = (&mut de).deserialize_map(AtomicFileVisitor { commander_only })?;
    de.end()?;

    let mtgjson = atomic.meta.ok_or_else(|| {
        AnalyzerError::InvalidArgument("Meta section not found in input file".into())
    })?;

    let source = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let out = OutputFile {
        meta: OutputMeta {
            generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            commander_only,
            source,
            mtgjson,
        },
        cards: &atomic.cards,
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(output)?);
    serde_json::to_writer(&mut writer, &out)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(kept = atomic.cards.len(), output = %output.display(), "trimmed card dataset");
    Ok(TrimSummary {
        kept: atomic.cards.len(),
        output: output.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Streaming visitors
// ---------------------------------------------------------------------------

struct AtomicFile {
    meta: Option<serde_json::Value>,
    cards: Vec<CardRecord>,
}

struct AtomicFileVisitor {
    commander_only: bool,
}

impl<'de> Visitor<'de> for AtomicFileVisitor {
    type Value = AtomicFile;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an MTGJSON AtomicCards object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<AtomicFile, A::Error> {
        let mut meta = None;
        let mut cards = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "meta" => meta = Some(map.next_value()?),
                "data" => map.next_value_seed(CardDataSeed {
                    commander_only: self.commander_only,
                    out: &mut cards,
                })?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(AtomicFile { meta, cards })
    }
}

/// Visits the `data` object, keeping one trimmed record per card name.
struct CardDataSeed<'a> {
    commander_only: bool,
    out: &'a mut Vec<CardRecord>,
}

impl<'de> DeserializeSeed<'de> for CardDataSeed<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<(), D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for CardDataSeed<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of card name to printing variants")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<(), A::Error> {
        while let Some(name) = map.next_key::<String>()? {
            let variants: Vec<AtomicCard> = map.next_value()?;
            if let Some(selected) = select_variant(&variants, self.commander_only) {
                self.out.push(trim_card(&name, selected));
            }
        }
        Ok(())
    }
}
