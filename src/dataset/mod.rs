//! Preparation of the trimmed card dataset consumed by [`CardIndex`](crate::CardIndex).
//!
//! [`fetch`] downloads MTGJSON files with SHA-256 verification, and [`trim`]
//! reduces `AtomicCards.json` to one small record per card name.

pub mod fetch;
pub mod trim;

pub use fetch::{DatasetKind, FetchOutcome, Fetcher};
pub use trim::{select_variant, trim_atomic, trim_card, TrimSummary};
