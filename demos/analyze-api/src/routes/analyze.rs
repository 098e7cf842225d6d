use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use commander_deck_analyzer::DeckAnalysis;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Pull a non-blank `decklist` string out of a request body.
///
/// Unparsable JSON, a missing field and a non-string value are all treated
/// as "no decklist".
fn extract_decklist(body: &[u8]) -> Option<String> {
    let parsed: Value = serde_json::from_slice(body).ok()?;
    let decklist = parsed.get("decklist")?.as_str()?;
    if decklist.trim().is_empty() {
        None
    } else {
        Some(decklist.to_string())
    }
}

/// POST /api/analyze
///
/// Body: `{"decklist": "1 Sol Ring\n..."}`. Returns the deck analysis, or
/// 400 when the decklist is missing or blank.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DeckAnalysis>, AppError> {
    let decklist =
        extract_decklist(&body).ok_or_else(|| AppError::bad_request("Decklist is required."))?;

    let analysis = state.analyzer.analyze(decklist).await?;
    Ok(Json(analysis))
}
