use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

use deckcore::analysis::round_half_up;
use deckcore::basedeck::build_base_deck;

use crate::error::AppError;
use crate::routes::{require_pokemon, run_pipeline, PokemonParams};
use crate::state::AppState;

/// GET /v1/deck/core?pokemon=charizard
///
/// Full pipeline; returns the core card list with categories, the quota
/// targets, and the ACE SPEC pick.
pub async fn core(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PokemonParams>,
) -> Result<Json<Value>, AppError> {
    let pokemon = require_pokemon(params)?;
    let run = run_pipeline(state, pokemon.clone()).await?;
    let result = &run.result;

    let mut core_names: Vec<&String> = result.core.keys().collect();
    core_names.sort_by_key(|n| n.to_lowercase());
    let core_list: Vec<Value> = core_names
        .into_iter()
        .map(|name| {
            json!({
                "name": name,
                "qty": result.core[name],
                "category": result.category_of(name),
            })
        })
        .collect();

    Ok(Json(json!({
        "pokemonInput": pokemon,
        "pokemonFound": run.found,
        "minDate": run.since,
        "matchesFound": run.matches_found,
        "decklistsParsed": run.decklists_parsed,
        "aceSpec": result.ace_spec,
        "avgCategoryTotals": result.avg_category_totals,
        "coreTotalCards": result.core_count_cards,
        "core": core_list,
        "errorsCount": run.errors.len(),
    })))
}

/// GET /v1/deck/above50?pokemon=charizard
///
/// Non-core cards present in more than half of the analyzed decklists.
pub async fn above50(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PokemonParams>,
) -> Result<Json<Value>, AppError> {
    let pokemon = require_pokemon(params)?;
    let run = run_pipeline(state, pokemon.clone()).await?;
    let result = &run.result;

    // `remaining` is already sorted by presence desc, name asc
    let cards: Vec<Value> = result
        .remaining
        .iter()
        .filter(|s| s.presence_pct > 50.0)
        .map(|s| {
            json!({
                "name": s.name,
                "category": s.category,
                "presentIn": s.present_in,
                "nLists": result.n_lists,
                "presencePct": round_half_up(s.presence_pct),
                "avgQty": s.avg_qty_round,
            })
        })
        .collect();

    Ok(Json(json!({
        "pokemonInput": pokemon,
        "pokemonFound": run.found,
        "minDate": run.since,
        "matchesFound": run.matches_found,
        "decklistsParsed": run.decklists_parsed,
        "thresholdPct": 50,
        "count": cards.len(),
        "cards": cards,
        "errorsCount": run.errors.len(),
    })))
}

/// GET /v1/deck/base?pokemon=charizard
///
/// Build a quota-respecting base deck: core first, then the most-present
/// non-core cards per category. 409 when the core overflows a quota.
pub async fn base(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PokemonParams>,
) -> Result<Json<Value>, AppError> {
    let pokemon = require_pokemon(params)?;
    let run = run_pipeline(state, pokemon.clone()).await?;

    let deck = build_base_deck(&run.result).map_err(AppError::from)?;

    Ok(Json(json!({
        "pokemonInput": pokemon,
        "pokemonFound": run.found,
        "minDate": run.since,
        "matchesFound": run.matches_found,
        "decklistsParsed": run.decklists_parsed,
        "avgCategoryTotals": deck.targets,
        "coreCategoryTotals": deck.core_totals,
        "remainingSlotsAfterFill": deck.remaining_slots,
        "finalCategoryCounts": deck.final_counts,
        "totalCards": deck.total_cards,
        "deckBase": {
            "Pokemon": deck.pokemon,
            "Trainer": deck.trainer,
            "Energy": deck.energy,
        },
        "errorsCount": run.errors.len(),
    })))
}
