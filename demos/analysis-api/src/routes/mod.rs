pub mod deck;
pub mod limitless;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PokemonParams {
    pub pokemon: Option<String>,
}

/// Extract the mandatory `pokemon` query parameter.
pub fn require_pokemon(params: PokemonParams) -> Result<String, AppError> {
    params
        .pokemon
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required query parameter: pokemon"))
}

/// Run the full blocking pipeline for one name on the blocking pool.
pub async fn run_pipeline(
    state: Arc<AppState>,
    pokemon: String,
) -> Result<deckcore::AnalysisRun, AppError> {
    tokio::task::spawn_blocking(move || state.engine.run(&pokemon))
        .await
        .map_err(|_| AppError::internal("analysis task panicked"))?
        .map_err(AppError::from)
}
