use deckcore::Deckcore;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The blocking analysis engine. Each request runs one self-contained
    /// pipeline pass inside `spawn_blocking`; no state is shared between
    /// runs beyond the HTTP client.
    pub engine: Deckcore,
}
