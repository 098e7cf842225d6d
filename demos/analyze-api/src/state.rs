use commander_deck_analyzer::AsyncDeckAnalyzer;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Analyzer backed by the process-wide card index. Requests fall back to
    /// stub mode until the dataset is readable.
    pub analyzer: AsyncDeckAnalyzer,
}
