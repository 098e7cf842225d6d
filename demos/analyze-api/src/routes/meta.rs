use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/meta
///
/// Reports whether a card index is loaded, its size, and the dataset's
/// `meta` block (generation time, commander-only policy, MTGJSON version).
pub async fn get_meta(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let analyzer = state.analyzer.snapshot().await?;
    let source = analyzer.source();

    let body = match analyzer.index() {
        Some(index) => json!({
            "source": source,
            "cards": index.len(),
            "meta": index.meta().cloned().unwrap_or(Value::Null),
        }),
        None => json!({
            "source": source,
            "cards": 0,
            "meta": Value::Null,
        }),
    };

    Ok(Json(body))
}
