//! Deck analysis tests against the sample dataset.

mod common;

use commander_deck_analyzer::{AnalysisSource, CardIndex, CardRecord, DeckAnalyzer};

fn sample_analyzer() -> DeckAnalyzer {
    DeckAnalyzer::with_index(common::sample_index())
}

fn sorted(colors: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = colors.iter().map(String::as_str).collect();
    out.sort_unstable();
    out
}

// ---------------------------------------------------------------------------
// Full index
// ---------------------------------------------------------------------------

#[test]
fn computes_totals_cmc_colors_and_commander() {
    let (path, _tmp) = common::write_sample_dataset();
    let analyzer = DeckAnalyzer::builder().dataset_path(&path).build();

    let analysis = analyzer.analyze(common::SCENARIO_DECKLIST);

    assert_eq!(analysis.total_cards, 5);
    assert_eq!(analysis.avg_cmc, Some(2.25));
    assert_eq!(sorted(&analysis.colors), vec!["B", "G", "U", "W"]);
    assert_eq!(analysis.commander.as_deref(), Some("Atraxa, Praetors' Voice"));
    assert_eq!(analysis.source, AnalysisSource::FullIndex);
    assert_eq!(analysis.cards.len(), 4);
}

#[test]
fn per_card_resolution() {
    let analysis = sample_analyzer().analyze(common::SCENARIO_DECKLIST);

    let atraxa = &analysis.cards[0];
    assert_eq!(atraxa.name, "Atraxa, Praetors' Voice");
    assert_eq!(atraxa.count, 1);
    assert_eq!(atraxa.mana_value, Some(4.0));
    assert_eq!(atraxa.type_line.as_deref(), Some("Legendary Creature — Angel Horror"));
    assert_eq!(
        atraxa.types.as_deref(),
        Some(&["Legendary".to_string(), "Creature".to_string()][..])
    );
    assert!(atraxa.is_resolved());

    let signet = &analysis.cards[2];
    assert_eq!(signet.count, 2);
    assert_eq!(signet.mana_value, Some(2.0));

    let unknown = &analysis.cards[3];
    assert_eq!(unknown.name, "Unknown Card");
    assert_eq!(unknown.mana_value, None);
    assert_eq!(unknown.type_line, None);
    assert_eq!(unknown.types, None);
    assert!(unknown.color_identity.is_empty());
    assert!(!unknown.is_resolved());

    assert_eq!(analysis.unresolved(), vec!["Unknown Card"]);
}

#[test]
fn lookup_ignores_input_case() {
    let analysis = sample_analyzer().analyze("1 sol ring\n1 ATRAXA, PRAETORS' VOICE");
    assert_eq!(analysis.avg_cmc, Some(2.5));
    assert_eq!(analysis.commander.as_deref(), Some("Atraxa, Praetors' Voice"));
    assert!(analysis.unresolved().is_empty());
}

#[test]
fn commander_reports_canonical_name() {
    let analysis = sample_analyzer().analyze("1 atraxa, praetors' voice");
    assert_eq!(analysis.commander.as_deref(), Some("Atraxa, Praetors' Voice"));
    assert_eq!(analysis.cards[0].name, "atraxa, praetors' voice");
}

#[test]
fn average_is_null_when_nothing_resolves() {
    let analysis = sample_analyzer().analyze("3 Unknown Card\n1 Another Unknown");
    assert_eq!(analysis.total_cards, 4);
    assert_eq!(analysis.avg_cmc, None);
    assert!(analysis.colors.is_empty());
    assert_eq!(analysis.commander, None);
    assert_eq!(analysis.source, AnalysisSource::FullIndex);
}

#[test]
fn zero_mana_value_is_not_null() {
    let mut land = common::record("Command Tower");
    land.mana_value = Some(0.0);
    let analyzer = DeckAnalyzer::with_index(CardIndex::from_records(vec![land]));

    let analysis = analyzer.analyze("1 Command Tower");
    assert_eq!(analysis.avg_cmc, Some(0.0));
}

#[test]
fn records_without_mana_value_do_not_weigh_the_average() {
    let mut sol_ring = common::record("Sol Ring");
    sol_ring.mana_value = Some(1.0);
    let mut odd = common::record("Odd Layout");
    odd.color_identity = Some(vec!["R".into()]);
    let analyzer = DeckAnalyzer::with_index(CardIndex::from_records(vec![sol_ring, odd]));

    let analysis = analyzer.analyze("1 Sol Ring\n5 Odd Layout");
    assert_eq!(analysis.total_cards, 6);
    assert_eq!(analysis.avg_cmc, Some(1.0));
    assert_eq!(analysis.colors, vec!["R".to_string()]);
    assert_eq!(analysis.cards[1].mana_value, None);
    assert!(analysis.cards[1].is_resolved());
}

#[test]
fn average_rounds_to_two_decimals() {
    let mut a = common::record("A");
    a.mana_value = Some(1.0);
    let mut b = common::record("B");
    b.mana_value = Some(2.0);
    let analyzer = DeckAnalyzer::with_index(CardIndex::from_records(vec![a, b]));

    // (1 * 2 + 2 * 1) / 3 = 1.3333...
    let analysis = analyzer.analyze("2 A\n1 B");
    assert_eq!(analysis.avg_cmc, Some(1.33));
}

#[test]
fn type_line_falls_back_to_joined_types() {
    let mut card = common::record("Typeless Line");
    card.types = Some(vec!["Legendary".into(), "Artifact".into()]);
    let analyzer = DeckAnalyzer::with_index(CardIndex::from_records(vec![card]));

    let analysis = analyzer.analyze("Typeless Line");
    assert_eq!(analysis.cards[0].type_line.as_deref(), Some("Legendary Artifact"));
}

// ---------------------------------------------------------------------------
// Commander heuristic
// ---------------------------------------------------------------------------

fn legendary(name: &str, type_line: Option<&str>, types: Option<&[&str]>) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        type_line: type_line.map(str::to_string),
        types: types.map(|ts| ts.iter().map(|t| t.to_string()).collect()),
        ..Default::default()
    }
}

#[test]
fn first_qualifying_entry_wins() {
    let index = CardIndex::from_records(vec![
        legendary("Sol Ring", Some("Artifact"), Some(&["Artifact"])),
        legendary("Kenrith, the Returned King", Some("Legendary Creature — Human Noble"), None),
        legendary("Atraxa, Praetors' Voice", Some("Legendary Creature — Angel Horror"), None),
    ]);
    let analyzer = DeckAnalyzer::with_index(index);

    let analysis = analyzer.analyze("1 Sol Ring\n1 Atraxa, Praetors' Voice\n1 Kenrith, the Returned King");
    assert_eq!(analysis.commander.as_deref(), Some("Atraxa, Praetors' Voice"));
}

#[test]
fn legendary_in_types_qualifies() {
    // Legendary non-creatures qualify through the coarse types list.
    let index = CardIndex::from_records(vec![legendary(
        "The One Ring",
        Some("Legendary Artifact"),
        Some(&["Legendary", "Artifact"]),
    )]);
    let analysis = DeckAnalyzer::with_index(index).analyze("1 The One Ring");
    assert_eq!(analysis.commander.as_deref(), Some("The One Ring"));
}

#[test]
fn legendary_type_line_without_creature_does_not_qualify() {
    let index = CardIndex::from_records(vec![
        legendary("Urza's Saga", Some("Enchantment Land — Urza's Saga"), None),
        legendary("Mox Amber", Some("Legendary Artifact"), Some(&["Artifact"])),
    ]);
    let analysis = DeckAnalyzer::with_index(index).analyze("1 Urza's Saga\n1 Mox Amber");
    assert_eq!(analysis.commander, None);
}

#[test]
fn unresolved_entries_never_qualify() {
    let analysis = sample_analyzer().analyze("1 Legendary Creature\n1 Sol Ring");
    assert_eq!(analysis.commander, None);
}

// ---------------------------------------------------------------------------
// Stub mode and boundaries
// ---------------------------------------------------------------------------

#[test]
fn missing_dataset_degrades_to_stub() {
    let tmp = tempfile::tempdir().unwrap();
    let analyzer = DeckAnalyzer::builder()
        .dataset_path(tmp.path().join("atomic-trimmed.json"))
        .build();

    let analysis = analyzer.analyze(common::SCENARIO_DECKLIST);

    assert_eq!(analysis.source, AnalysisSource::Stub);
    assert_eq!(analysis.total_cards, 5);
    assert_eq!(analysis.avg_cmc, None);
    assert!(analysis.colors.is_empty());
    assert_eq!(analysis.commander, None);
    assert_eq!(analysis.cards.len(), 4);
    assert!(analysis.cards.iter().all(|c| c.mana_value.is_none()));
}

#[test]
fn corrupt_dataset_degrades_to_stub() {
    let (path, _tmp) = common::write_dataset("[[[");
    let analyzer = DeckAnalyzer::builder().dataset_path(&path).build();
    assert!(analyzer.index().is_none());
    assert_eq!(analyzer.analyze("1 Sol Ring").source, AnalysisSource::Stub);
}

#[test]
fn blank_decklist_yields_empty_report() {
    let analysis = sample_analyzer().analyze("  \n\n   \t\n");
    assert_eq!(analysis.total_cards, 0);
    assert_eq!(analysis.avg_cmc, None);
    assert!(analysis.colors.is_empty());
    assert_eq!(analysis.commander, None);
    assert!(analysis.cards.is_empty());
    assert_eq!(analysis.source, AnalysisSource::FullIndex);
}

#[test]
fn duplicate_lines_stay_separate() {
    let analysis = sample_analyzer().analyze("1 Sol Ring\n2 Sol Ring");
    assert_eq!(analysis.cards.len(), 2);
    assert_eq!(analysis.total_cards, 3);
    assert_eq!(analysis.avg_cmc, Some(1.0));
}

#[test]
fn analysis_is_repeatable() {
    let analyzer = sample_analyzer();
    let first = analyzer.analyze(common::SCENARIO_DECKLIST);
    let second = analyzer.analyze(common::SCENARIO_DECKLIST);
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[test]
fn serializes_in_camel_case() {
    let analysis = sample_analyzer().analyze("1 Sol Ring\n1 Unknown Card");
    let value = serde_json::to_value(&analysis).unwrap();

    assert_eq!(value["totalCards"], 2);
    assert_eq!(value["avgCmc"], 1.0);
    assert_eq!(value["commander"], serde_json::Value::Null);
    assert_eq!(value["source"], "full-index");
    assert_eq!(value["cards"][0]["manaValue"], 1.0);
    assert_eq!(value["cards"][0]["typeLine"], "Artifact");
    assert_eq!(value["cards"][0]["colorIdentity"], serde_json::json!([]));
    assert_eq!(value["cards"][1]["manaValue"], serde_json::Value::Null);
    assert_eq!(value["cards"][1]["types"], serde_json::Value::Null);
    assert!(value["cards"][1].get("resolved").is_none());
}

#[test]
fn stub_source_serializes_as_stub() {
    let value = serde_json::to_value(DeckAnalyzer::stub().analyze("1 Sol Ring")).unwrap();
    assert_eq!(value["source"], "stub");
    assert_eq!(value["avgCmc"], serde_json::Value::Null);
}

#[test]
fn legacy_source_name_deserializes() {
    let source: AnalysisSource = serde_json::from_str(r#""trimmed-mtgjson""#).unwrap();
    assert_eq!(source, AnalysisSource::FullIndex);
}
