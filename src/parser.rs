//! Decklist text parsing.
//!
//! Each non-blank line is either `<count> <name>` or a bare `<name>`. Parsing
//! never fails; deciding whether a name is a real card happens later, against
//! the card index.

use crate::models::DecklistEntry;

/// Parse raw decklist text into entries, one per non-blank line, in order.
///
/// ```
/// use commander_deck_analyzer::parse_decklist;
///
/// let entries = parse_decklist("2 Sol Ring\nAtraxa, Praetors' Voice\n");
/// assert_eq!(entries[0].count, 2);
/// assert_eq!(entries[1].name, "Atraxa, Praetors' Voice");
/// ```
pub fn parse_decklist(text: &str) -> Vec<DecklistEntry> {
    text.split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Trim whitespace and byte-order marks from both ends of a line.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parse one already-trimmed, non-empty line.
pub fn parse_line(line: &str) -> DecklistEntry {
    split_count(line)
        .map(|(count, name)| DecklistEntry::new(count, name))
        .unwrap_or_else(|| DecklistEntry::new(1, line))
}

/// Split a leading digit run and the whitespace after it from the name.
///
/// Returns `None` when there is no digit run, no whitespace after it, nothing
/// after the whitespace, or the digits are not a count in `1..=u32::MAX`.
fn split_count(line: &str) -> Option<(u32, &str)> {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }

    let rest = &line[digits_end..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim_start();
    if name.is_empty() {
        return None;
    }

    let count: u32 = line[..digits_end].parse().ok()?;
    if count == 0 {
        return None;
    }
    Some((count, name))
}
