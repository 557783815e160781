use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deck::{Category, CategoryTotals, FetchFailure};

// ---------------------------------------------------------------------------
// CardStat — per-card aggregation output
// ---------------------------------------------------------------------------

/// Aggregated statistics for one card across all analyzed decklists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStat {
    pub name: String,
    pub category: Category,
    /// Number of decks containing the card at all.
    pub present_in: usize,
    /// Exactly `present_in / n_lists * 100`.
    pub presence_pct: f64,
    /// Mean quantity over only the decks where the card appears.
    pub avg_qty_raw: f64,
    /// `avg_qty_raw` rounded half-up to an integer.
    pub avg_qty_round: u32,
}

// ---------------------------------------------------------------------------
// AnalysisResult — terminal output of one analysis run
// ---------------------------------------------------------------------------

/// The immutable result of aggregating one set of decklists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub n_lists: usize,
    /// Cards present in every deck, mapped to their core quantity.
    /// `BTreeMap` keeps iteration deterministic.
    pub core: BTreeMap<String, u32>,
    pub core_count_cards: u32,
    /// Per-category quota, forced to sum to the target whenever feasible.
    pub avg_category_totals: CategoryTotals,
    pub ace_spec: Option<String>,
    /// Non-core cards, sorted by presence descending then name ascending.
    pub remaining: Vec<CardStat>,
    /// Every card, same sort order as `remaining`.
    pub all_stats: Vec<CardStat>,
}

impl AnalysisResult {
    /// The classified category of a card, defaulting to Trainer for names
    /// the analysis never saw.
    pub fn category_of(&self, name: &str) -> Category {
        self.all_stats
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.category)
            .unwrap_or(Category::Trainer)
    }
}

// ---------------------------------------------------------------------------
// AnalysisRun — full pipeline output
// ---------------------------------------------------------------------------

/// Everything produced by one end-to-end pipeline run: the resolved name,
/// crawl and fetch figures, per-item failures, and the analysis itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub input: String,
    pub found: String,
    pub since: NaiveDate,
    pub matches_found: usize,
    pub decklists_parsed: usize,
    pub errors: Vec<FetchFailure>,
    pub result: AnalysisResult,
}

// ---------------------------------------------------------------------------
// BaseDeck — quota-filled deck derived from an AnalysisResult
// ---------------------------------------------------------------------------

/// One card slot in a built base deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDeckEntry {
    pub name: String,
    pub qty: u32,
    /// Presence percentage rounded to an integer; core cards report 100.
    pub presence_pct: u32,
}

/// A base deck: core cards plus the most-present non-core cards, filled
/// per category up to the quota targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDeck {
    pub pokemon: Vec<BaseDeckEntry>,
    pub trainer: Vec<BaseDeckEntry>,
    pub energy: Vec<BaseDeckEntry>,
    pub targets: CategoryTotals,
    pub core_totals: CategoryTotals,
    /// Slots still open after the fill pass (zero when fully filled).
    pub remaining_slots: CategoryTotals,
    pub final_counts: CategoryTotals,
    pub total_cards: u32,
}

impl BaseDeck {
    pub fn cards(&self, cat: Category) -> &[BaseDeckEntry] {
        match cat {
            Category::Pokemon => &self.pokemon,
            Category::Trainer => &self.trainer,
            Category::Energy => &self.energy,
        }
    }

    pub(crate) fn cards_mut(&mut self, cat: Category) -> &mut Vec<BaseDeckEntry> {
        match cat {
            Category::Pokemon => &mut self.pokemon,
            Category::Trainer => &mut self.trainer,
            Category::Energy => &mut self.energy,
        }
    }
}
