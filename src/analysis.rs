//! Statistical aggregation over a set of parsed decklists.
//!
//! Produces per-card presence statistics, the core/remaining partition, the
//! forced-sum per-category quota, and the ACE SPEC pick. Every tally is
//! keyed through `BTreeMap` so repeated runs over the same decklists yield
//! byte-identical results.

use std::collections::BTreeMap;

use crate::config;
use crate::models::{AnalysisResult, CardStat, Category, CategoryTotals, ParsedDecklist};

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Engine configuration: the quota target and the recognized ACE SPEC set.
///
/// Injected at construction so tests can run alternate quotas and rulesets
/// without touching engine code.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub quota_target: u32,
    pub ace_specs: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            quota_target: config::DEFAULT_QUOTA_TARGET,
            ace_specs: config::ace_spec_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round half-up to the nearest integer: 3.5 -> 4, 8.5 -> 9, 2.4 -> 2.
///
/// Quantities and percentages here are never negative, so half-up and
/// half-away-from-zero coincide.
pub fn round_half_up(x: f64) -> u32 {
    (x + 0.5).floor() as u32
}

/// Split a `"qty name"` line. Malformed lines yield `None`.
fn parse_line(line: &str) -> Option<(u32, String)> {
    let (qty, name) = line.trim().split_once(char::is_whitespace)?;
    let qty = qty.parse::<u32>().ok()?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((qty, name.to_string()))
}

/// Flatten one deck into name -> summed quantity and name -> category.
///
/// Duplicate lines for the same name are summed; category assignment is
/// exclusive per deck by construction of the decklist parser.
pub fn normalize_deck(
    deck: &ParsedDecklist,
) -> (BTreeMap<String, u32>, BTreeMap<String, Category>) {
    let mut qty_map: BTreeMap<String, u32> = BTreeMap::new();
    let mut cat_map: BTreeMap<String, Category> = BTreeMap::new();

    for cat in Category::ALL {
        for line in deck.lines(cat) {
            if let Some((qty, name)) = parse_line(line) {
                *qty_map.entry(name.clone()).or_insert(0) += qty;
                cat_map.insert(name, cat);
            }
        }
    }

    (qty_map, cat_map)
}

// ---------------------------------------------------------------------------
// Quota allocation
// ---------------------------------------------------------------------------

/// Average the per-deck category totals and force the rounded values to sum
/// to `target`.
///
/// While the rounded sum misses the target, the category whose adjusted
/// integer stays closest to its raw average moves one unit toward the
/// target; cost ties go to the first category in the fixed order. If no
/// category is eligible to move (all at zero with more decrement needed)
/// the loop stops and the total legitimately stays under the target.
pub fn force_sum_category_totals(per_deck: &[CategoryTotals], target: u32) -> CategoryTotals {
    let n = per_deck.len();
    let mut raw = [0f64; 3];
    let mut rounded = [0i64; 3];

    for (i, cat) in Category::ALL.iter().enumerate() {
        let avg = if n == 0 {
            0.0
        } else {
            per_deck.iter().map(|t| t.get(*cat) as f64).sum::<f64>() / n as f64
        };
        raw[i] = avg;
        rounded[i] = round_half_up(avg) as i64;
    }

    let mut diff = target as i64 - rounded.iter().sum::<i64>();
    while diff != 0 {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..3 {
            let cost = if diff > 0 {
                (rounded[i] + 1) as f64 - raw[i]
            } else {
                if rounded[i] <= 0 {
                    continue;
                }
                raw[i] - (rounded[i] - 1) as f64
            };
            if best.map_or(true, |(_, c)| cost < c) {
                best = Some((i, cost));
            }
        }
        let Some((i, _)) = best else {
            break;
        };
        if diff > 0 {
            rounded[i] += 1;
            diff -= 1;
        } else {
            rounded[i] -= 1;
            diff += 1;
        }
    }

    let mut out = CategoryTotals::default();
    for (i, cat) in Category::ALL.iter().enumerate() {
        *out.get_mut(*cat) = rounded[i].max(0) as u32;
    }
    out
}

// ---------------------------------------------------------------------------
// Core analysis
// ---------------------------------------------------------------------------

/// Aggregate `decklists` into an [`AnalysisResult`].
///
/// Zero input decks produce the empty result; the pipeline facade treats
/// that case as an error before calling in here.
pub fn analyze(decklists: &[ParsedDecklist], config: &AnalysisConfig) -> AnalysisResult {
    let n = decklists.len();
    if n == 0 {
        return AnalysisResult {
            n_lists: 0,
            core: BTreeMap::new(),
            core_count_cards: 0,
            avg_category_totals: CategoryTotals::default(),
            ace_spec: None,
            remaining: Vec::new(),
            all_stats: Vec::new(),
        };
    }

    let mut per_deck_qty = Vec::with_capacity(n);
    let mut per_deck_totals = Vec::with_capacity(n);
    // category votes per name, one slot per category
    let mut votes: BTreeMap<String, [usize; 3]> = BTreeMap::new();

    for deck in decklists {
        let (qty_map, cat_map) = normalize_deck(deck);

        let mut totals = CategoryTotals::default();
        for (name, qty) in &qty_map {
            totals.add(cat_map[name], *qty);
        }
        per_deck_totals.push(totals);

        for (name, cat) in &cat_map {
            votes.entry(name.clone()).or_insert([0; 3])[*cat as usize] += 1;
        }
        per_deck_qty.push(qty_map);
    }

    // Quantity per deck for each name; entry count is the presence count.
    let mut qty_lists: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for deck in &per_deck_qty {
        for (name, qty) in deck {
            qty_lists.entry(name.clone()).or_default().push(*qty);
        }
    }

    // Most-voted category; ties resolve to the earlier category in the
    // fixed precedence order (Pokemon, Trainer, Energy).
    let best_category = |name: &str| -> Category {
        let counts = votes.get(name).copied().unwrap_or([0; 3]);
        let mut best = Category::Pokemon;
        let mut best_count = 0;
        for cat in Category::ALL {
            if counts[cat as usize] > best_count {
                best = cat;
                best_count = counts[cat as usize];
            }
        }
        best
    };

    let mut core: BTreeMap<String, u32> = BTreeMap::new();
    let mut all_stats: Vec<CardStat> = Vec::new();
    let mut remaining: Vec<CardStat> = Vec::new();

    for (name, qtys) in &qty_lists {
        let present = qtys.len();
        let pct = present as f64 / n as f64 * 100.0;
        let avg_raw = qtys.iter().map(|q| *q as f64).sum::<f64>() / qtys.len() as f64;
        let avg_round = round_half_up(avg_raw);

        let stat = CardStat {
            name: name.clone(),
            category: best_category(name),
            present_in: present,
            presence_pct: pct,
            avg_qty_raw: avg_raw,
            avg_qty_round: avg_round,
        };

        if present == n {
            // at least one copy even when rounding would drop to zero
            core.insert(name.clone(), avg_round.max(1));
        } else {
            remaining.push(stat.clone());
        }
        all_stats.push(stat);
    }

    // ACE SPEC: most present among the recognized single-copy cards,
    // ties broken by ascending case-insensitive name.
    let ace_candidates: Vec<&CardStat> = all_stats
        .iter()
        .filter(|s| config.ace_specs.iter().any(|a| a == &s.name))
        .collect();
    let ace_spec = if ace_candidates.is_empty() {
        None
    } else {
        let max_count = ace_candidates
            .iter()
            .map(|s| s.present_in)
            .max()
            .unwrap_or(0);
        let mut names: Vec<&str> = ace_candidates
            .iter()
            .filter(|s| s.present_in == max_count)
            .map(|s| s.name.as_str())
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        names.first().map(|n| n.to_string())
    };

    let avg_category_totals = force_sum_category_totals(&per_deck_totals, config.quota_target);
    let core_count_cards = core.values().sum();

    let by_presence = |a: &CardStat, b: &CardStat| {
        b.presence_pct
            .total_cmp(&a.presence_pct)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    };
    remaining.sort_by(by_presence);
    all_stats.sort_by(by_presence);

    AnalysisResult {
        n_lists: n,
        core,
        core_count_cards,
        avg_category_totals,
        ace_spec,
        remaining,
        all_stats,
    }
}
