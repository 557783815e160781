use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The three card categories of a decklist.
///
/// Declaration order doubles as the fixed precedence order: category-vote
/// ties resolve to the earlier variant, and quota allocation iterates
/// categories in this order so cost ties resolve the same way every run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Pokemon,
    Trainer,
    Energy,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Pokemon, Category::Trainer, Category::Energy];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Pokemon => "Pokemon",
            Category::Trainer => "Trainer",
            Category::Energy => "Energy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CategoryTotals
// ---------------------------------------------------------------------------

/// A per-category card count, used for deck totals and quota targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryTotals {
    pub pokemon: u32,
    pub trainer: u32,
    pub energy: u32,
}

impl CategoryTotals {
    pub fn get(&self, cat: Category) -> u32 {
        match cat {
            Category::Pokemon => self.pokemon,
            Category::Trainer => self.trainer,
            Category::Energy => self.energy,
        }
    }

    pub fn get_mut(&mut self, cat: Category) -> &mut u32 {
        match cat {
            Category::Pokemon => &mut self.pokemon,
            Category::Trainer => &mut self.trainer,
            Category::Energy => &mut self.energy,
        }
    }

    pub fn add(&mut self, cat: Category, qty: u32) {
        *self.get_mut(cat) += qty;
    }

    pub fn sum(&self) -> u32 {
        self.pokemon + self.trainer + self.energy
    }
}

// ---------------------------------------------------------------------------
// MatchRow — one matching row from the tournament listing
// ---------------------------------------------------------------------------

/// A single tournament-listing row whose winner matched the target name.
///
/// Produced by the crawler, consumed exactly once to fetch the decklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRow {
    pub date: NaiveDate,
    /// Lowercase `alt` strings from the winner column images, identifying
    /// the winning card and its forms.
    pub winners: Vec<String>,
    pub tournament_url: Option<String>,
    pub decklist_url: Option<String>,
}

// ---------------------------------------------------------------------------
// ParsedDecklist — the three category-tagged quantity/name lists
// ---------------------------------------------------------------------------

/// One decklist document segmented into its three categories.
///
/// Entries keep the raw `"<qty> <name>"` form produced by the parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDecklist {
    pub pokemon: Vec<String>,
    pub trainer: Vec<String>,
    pub energy: Vec<String>,
}

impl ParsedDecklist {
    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty() && self.trainer.is_empty() && self.energy.is_empty()
    }

    pub fn lines(&self, cat: Category) -> &[String] {
        match cat {
            Category::Pokemon => &self.pokemon,
            Category::Trainer => &self.trainer,
            Category::Energy => &self.energy,
        }
    }
}

// ---------------------------------------------------------------------------
// FetchFailure — per-item decklist failure record
// ---------------------------------------------------------------------------

/// A decklist that could not be fetched or parsed.
///
/// These never abort the batch; they are collected and reported alongside
/// the successful entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchFailure {
    pub date: NaiveDate,
    pub decklist_url: Option<String>,
    pub reason: String,
}
