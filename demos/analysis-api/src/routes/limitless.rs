use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::routes::{require_pokemon, PokemonParams};
use crate::state::AppState;

/// GET /v1/limitless/count?pokemon=charizard
///
/// Resolve the name and count its winning rows since the cutoff.
/// Zero matches is a valid answer here, not an error.
pub async fn count(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PokemonParams>,
) -> Result<Json<Value>, AppError> {
    let pokemon = require_pokemon(params)?;
    let min_date = state.engine.config().cutoff;

    let input = pokemon.clone();
    let st = state.clone();
    let (found, matches) = tokio::task::spawn_blocking(
        move || -> deckcore::Result<(String, Vec<deckcore::MatchRow>)> {
            let found = st.engine.resolver().resolve(&input)?;
            let matches = st
                .engine
                .crawler()
                .winning_rows(&found, st.engine.config().cutoff)?;
            Ok((found, matches))
        },
    )
    .await
    .map_err(|_| AppError::internal("crawl task panicked"))??;

    Ok(Json(json!({
        "pokemonInput": pokemon,
        "pokemonFound": found,
        "minDate": min_date,
        "count": matches.len(),
    })))
}
