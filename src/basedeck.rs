//! Base-deck construction from an analysis result.
//!
//! Starts from the core cards, verifies they fit inside each category's
//! quota, then fills the remaining slots with the most-present non-core
//! cards until every category is full or candidates run out.

use crate::analysis::round_half_up;
use crate::error::{DeckcoreError, Result};
use crate::models::{AnalysisResult, BaseDeck, BaseDeckEntry, Category, CategoryTotals};

/// Build a base deck from `result`, honoring the per-category quotas.
///
/// Fails with [`DeckcoreError::CoreOverflow`] when the core alone exceeds
/// any category's target; the error carries the targets, core totals, and
/// per-category overflow so callers can report the conflict.
pub fn build_base_deck(result: &AnalysisResult) -> Result<BaseDeck> {
    let targets = result.avg_category_totals;

    let mut deck = BaseDeck {
        pokemon: Vec::new(),
        trainer: Vec::new(),
        energy: Vec::new(),
        targets,
        core_totals: CategoryTotals::default(),
        remaining_slots: CategoryTotals::default(),
        final_counts: CategoryTotals::default(),
        total_cards: 0,
    };

    for (name, qty) in &result.core {
        let cat = result.category_of(name);
        deck.cards_mut(cat).push(BaseDeckEntry {
            name: name.clone(),
            qty: *qty,
            presence_pct: 100,
        });
        deck.core_totals.add(cat, *qty);
    }

    let overflow: Vec<(Category, u32)> = Category::ALL
        .iter()
        .filter_map(|cat| {
            let core = deck.core_totals.get(*cat);
            let target = targets.get(*cat);
            (core > target).then(|| (*cat, core - target))
        })
        .collect();
    if !overflow.is_empty() {
        return Err(DeckcoreError::CoreOverflow {
            targets,
            core_totals: deck.core_totals,
            overflow,
        });
    }

    let mut slots = CategoryTotals::default();
    for cat in Category::ALL {
        *slots.get_mut(cat) = targets.get(cat) - deck.core_totals.get(cat);
    }

    // all_stats is already ranked by presence descending, name ascending
    for stat in result
        .all_stats
        .iter()
        .filter(|s| !result.core.contains_key(&s.name))
    {
        let cat = stat.category;
        if slots.get(cat) == 0 {
            continue;
        }
        let desired = stat.avg_qty_round.max(1);
        let add = desired.min(slots.get(cat));
        deck.cards_mut(cat).push(BaseDeckEntry {
            name: stat.name.clone(),
            qty: add,
            presence_pct: round_half_up(stat.presence_pct),
        });
        *slots.get_mut(cat) -= add;

        if Category::ALL.iter().all(|c| slots.get(*c) == 0) {
            break;
        }
    }

    for cat in Category::ALL {
        deck.cards_mut(cat).sort_by(|a, b| {
            b.presence_pct
                .cmp(&a.presence_pct)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
    }

    deck.remaining_slots = slots;
    for cat in Category::ALL {
        let count = deck.cards(cat).iter().map(|e| e.qty).sum();
        *deck.final_counts.get_mut(cat) = count;
    }
    deck.total_cards = deck.final_counts.sum();

    Ok(deck)
}
