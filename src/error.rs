use chrono::NaiveDate;

use crate::models::{Category, CategoryTotals, FetchFailure};

#[derive(Debug, thiserror::Error)]
pub enum DeckcoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no Pokémon in the catalog matched; tried {candidates:?}")]
    UnknownPokemon { candidates: Vec<String> },

    #[error("no winning decklists found for '{name}' since {since}")]
    NoMatches { name: String, since: NaiveDate },

    #[error("none of the {attempted} decklists could be fetched and parsed")]
    NoUsableDecklists {
        attempted: usize,
        errors: Vec<FetchFailure>,
    },

    #[error("core cards exceed the category quota: {overflow:?}")]
    CoreOverflow {
        targets: CategoryTotals,
        core_totals: CategoryTotals,
        overflow: Vec<(Category, u32)>,
    },
}

pub type Result<T> = std::result::Result<T, DeckcoreError>;
