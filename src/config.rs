use std::path::PathBuf;

pub const CDN_BASE: &str = "https://mtgjson.com/api/v5";

/// Where the trimmed card index is expected, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/mtgjson/atomic-trimmed.json";

/// Where downloaded MTGJSON files land by default.
pub const DEFAULT_DATA_DIR: &str = "data/mtgjson";

/// Environment variable overriding [`DEFAULT_DATASET_PATH`].
pub const DATASET_PATH_ENV: &str = "DECK_ANALYZER_DATASET";

/// Substring of a type line that marks a commander candidate.
pub const COMMANDER_TYPE_LINE: &str = "Legendary Creature";

/// Coarse type that marks a commander candidate.
pub const COMMANDER_SUPERTYPE: &str = "Legendary";

pub fn dataset_path() -> PathBuf {
    match std::env::var_os(DATASET_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATASET_PATH),
    }
}
