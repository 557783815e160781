//! Tests for the aggregation engine: core membership, presence statistics,
//! category voting, ACE SPEC selection, and quota allocation.

mod common;

use deckcore::analysis::{
    analyze, force_sum_category_totals, normalize_deck, round_half_up, AnalysisConfig,
};
use deckcore::{Category, CategoryTotals};

use common::deck;

fn cfg() -> AnalysisConfig {
    AnalysisConfig::default()
}

fn totals(pokemon: u32, trainer: u32, energy: u32) -> CategoryTotals {
    CategoryTotals {
        pokemon,
        trainer,
        energy,
    }
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

#[test]
fn rounds_half_up() {
    assert_eq!(round_half_up(3.5), 4);
    assert_eq!(round_half_up(8.5), 9);
    assert_eq!(round_half_up(2.4), 2);
    assert_eq!(round_half_up(2.5), 3);
    assert_eq!(round_half_up(0.4), 0);
    assert_eq!(round_half_up(0.5), 1);
}

// ---------------------------------------------------------------------------
// Deck normalization
// ---------------------------------------------------------------------------

#[test]
fn normalize_sums_duplicates_and_tracks_categories() {
    let d = deck(
        &["2 Pikachu", "1 Pikachu"],
        &["2 Judge"],
        &["8 Lightning Energy"],
    );
    let (qty, cat) = normalize_deck(&d);

    assert_eq!(qty["Pikachu"], 3);
    assert_eq!(qty["Judge"], 2);
    assert_eq!(cat["Pikachu"], Category::Pokemon);
    assert_eq!(cat["Lightning Energy"], Category::Energy);
}

// ---------------------------------------------------------------------------
// Core membership and quantities
// ---------------------------------------------------------------------------

#[test]
fn worked_example_riolu_judge_fighting_energy() {
    let decks = vec![
        deck(&["4 Riolu"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["3 Riolu"], &["2 Judge"], &["9 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert_eq!(result.n_lists, 2);
    assert_eq!(result.core["Riolu"], 4); // half_up(3.5)
    assert_eq!(result.core["Judge"], 2);
    assert_eq!(result.core["Fighting Energy"], 9); // half_up(8.5)
    assert_eq!(result.core_count_cards, 15);
    assert!(result.remaining.is_empty());
}

#[test]
fn card_missing_from_one_deck_is_never_core() {
    let decks = vec![
        deck(&["4 Riolu", "2 Ralts"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["3 Riolu"], &["2 Judge"], &["9 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert!(!result.core.contains_key("Ralts"));
    assert!(result.remaining.iter().any(|s| s.name == "Ralts"));
}

#[test]
fn core_quantity_is_at_least_one() {
    // a zero-quantity line in every deck still claims one core slot
    let decks = vec![
        deck(&["0 Odd Pokemon"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["0 Odd Pokemon"], &["2 Judge"], &["8 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert_eq!(result.core["Odd Pokemon"], 1);
}

#[test]
fn average_is_over_present_decks_only() {
    let decks = vec![
        deck(&["4 Riolu", "4 Ralts"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["3 Riolu"], &["2 Judge"], &["9 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    let ralts = result
        .all_stats
        .iter()
        .find(|s| s.name == "Ralts")
        .unwrap();
    // decks without the card are excluded from the mean, not zero-filled
    assert_eq!(ralts.avg_qty_raw, 4.0);
    assert_eq!(ralts.avg_qty_round, 4);
    assert_eq!(ralts.present_in, 1);
}

#[test]
fn presence_pct_is_exact() {
    let with = deck(&["2 Ralts"], &["2 Judge"], &["8 Fighting Energy"]);
    let without = deck(&["2 Kirlia"], &["2 Judge"], &["8 Fighting Energy"]);
    let decks = vec![with, without.clone(), without.clone(), without];
    let result = analyze(&decks, &cfg());

    let ralts = result
        .all_stats
        .iter()
        .find(|s| s.name == "Ralts")
        .unwrap();
    assert_eq!(ralts.presence_pct, 25.0);

    let judge = result
        .all_stats
        .iter()
        .find(|s| s.name == "Judge")
        .unwrap();
    assert_eq!(judge.presence_pct, 100.0);
}

#[test]
fn core_and_remaining_partition_all_stats() {
    let decks = vec![
        deck(&["4 Riolu", "2 Ralts"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["3 Riolu"], &["2 Judge", "1 Ultra Ball"], &["9 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert_eq!(
        result.core.len() + result.remaining.len(),
        result.all_stats.len()
    );
    for stat in &result.remaining {
        assert!(!result.core.contains_key(&stat.name));
    }
}

// ---------------------------------------------------------------------------
// Category voting
// ---------------------------------------------------------------------------

#[test]
fn majority_vote_assigns_category() {
    // mis-bucketed in one deck, correctly bucketed in two
    let decks = vec![
        deck(&[], &["2 Rare Candy"], &["8 Fighting Energy"]),
        deck(&[], &["2 Rare Candy"], &["8 Fighting Energy"]),
        deck(&[], &["8 Fighting Energy", "2 Rare Candy"], &[]),
    ];
    let result = analyze(&decks, &cfg());

    let energy = result
        .all_stats
        .iter()
        .find(|s| s.name == "Fighting Energy")
        .unwrap();
    assert_eq!(energy.category, Category::Energy);
}

#[test]
fn vote_ties_resolve_by_category_precedence() {
    // one trainer vote, one energy vote: Trainer comes first in the order
    let decks = vec![
        deck(&[], &["2 Mystery Card"], &["8 Fighting Energy"]),
        deck(&[], &[], &["2 Mystery Card", "8 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    let mystery = result
        .all_stats
        .iter()
        .find(|s| s.name == "Mystery Card")
        .unwrap();
    assert_eq!(mystery.category, Category::Trainer);

    // one pokemon vote, one energy vote: Pokemon wins
    let decks = vec![
        deck(&["2 Other Card"], &[], &["8 Fighting Energy"]),
        deck(&[], &[], &["2 Other Card", "8 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    let other = result
        .all_stats
        .iter()
        .find(|s| s.name == "Other Card")
        .unwrap();
    assert_eq!(other.category, Category::Pokemon);
}

// ---------------------------------------------------------------------------
// ACE SPEC selection
// ---------------------------------------------------------------------------

#[test]
fn ace_spec_picks_most_present() {
    let decks = vec![
        deck(&[], &["1 Prime Catcher", "1 Master Ball"], &["8 Fighting Energy"]),
        deck(&[], &["1 Prime Catcher"], &["8 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert_eq!(result.ace_spec.as_deref(), Some("Prime Catcher"));
}

#[test]
fn ace_spec_tie_breaks_by_name() {
    let decks = vec![deck(
        &[],
        &["1 Prime Catcher", "1 Master Ball"],
        &["8 Fighting Energy"],
    )];
    let result = analyze(&decks, &cfg());

    // both present in one deck; "Master Ball" sorts first case-insensitively
    assert_eq!(result.ace_spec.as_deref(), Some("Master Ball"));
}

#[test]
fn ace_spec_is_none_when_no_named_card_appears() {
    let decks = vec![deck(&["4 Riolu"], &["2 Judge"], &["8 Fighting Energy"])];
    let result = analyze(&decks, &cfg());

    assert!(result.ace_spec.is_none());
}

#[test]
fn ace_spec_set_is_injectable() {
    let decks = vec![deck(&["4 Riolu"], &["1 Judge"], &["8 Fighting Energy"])];
    let config = AnalysisConfig {
        quota_target: 60,
        ace_specs: vec!["Judge".to_string()],
    };
    let result = analyze(&decks, &config);

    assert_eq!(result.ace_spec.as_deref(), Some("Judge"));
}

// ---------------------------------------------------------------------------
// Quota allocation
// ---------------------------------------------------------------------------

#[test]
fn category_totals_sum_to_target() {
    // rounded averages alone would sum to 61; the cheapest category moves
    let decks = vec![
        deck(&["10 Pikachu"], &["30 Ultra Ball"], &["19 Lightning Energy"]),
        deck(&["11 Pikachu"], &["30 Ultra Ball"], &["20 Lightning Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    assert_eq!(result.avg_category_totals.sum(), 60);
    // pokemon (10.5) and energy (19.5) tie on cost; pokemon moves first
    assert_eq!(result.avg_category_totals, totals(10, 30, 20));
}

#[test]
fn force_sum_increments_cheapest_categories() {
    // averages 9.25 / 30.25 / 19.25 round to 58; two increments needed
    let per_deck = vec![
        totals(9, 30, 19),
        totals(9, 30, 19),
        totals(9, 30, 19),
        totals(10, 31, 20),
    ];
    let out = force_sum_category_totals(&per_deck, 60);

    assert_eq!(out.sum(), 60);
    // all three costs tie at 0.75: pokemon moves first, then trainer
    assert_eq!(out, totals(10, 31, 19));
}

#[test]
fn force_sum_already_on_target_is_untouched() {
    let per_deck = vec![totals(10, 30, 20), totals(10, 30, 20)];
    let out = force_sum_category_totals(&per_deck, 60);
    assert_eq!(out, totals(10, 30, 20));
}

#[test]
fn force_sum_target_zero_drains_every_category() {
    let per_deck = vec![totals(10, 30, 20)];
    let out = force_sum_category_totals(&per_deck, 0);
    assert_eq!(out.sum(), 0);
}

#[test]
fn force_sum_with_no_decks_stays_zero() {
    let out = force_sum_category_totals(&[], 0);
    assert_eq!(out, totals(0, 0, 0));
}

#[test]
fn quota_target_is_injectable() {
    let decks = vec![deck(&["3 Pikachu"], &["2 Judge"], &["7 Lightning Energy"])];
    let config = AnalysisConfig {
        quota_target: 12,
        ace_specs: Vec::new(),
    };
    let result = analyze(&decks, &config);

    assert_eq!(result.avg_category_totals.sum(), 12);
    assert_eq!(result.avg_category_totals, totals(3, 2, 7));
}

// ---------------------------------------------------------------------------
// Ordering and determinism
// ---------------------------------------------------------------------------

#[test]
fn remaining_sorts_by_presence_then_name() {
    let decks = vec![
        deck(
            &["2 Zubat", "2 Abra"],
            &["2 Judge", "1 Ultra Ball"],
            &["8 Fighting Energy"],
        ),
        deck(&["2 Zubat", "2 Abra"], &["2 Judge"], &["8 Fighting Energy"]),
        deck(&["2 Zubat"], &["2 Judge"], &["8 Fighting Energy"]),
    ];
    let result = analyze(&decks, &cfg());

    let names: Vec<&str> = result.remaining.iter().map(|s| s.name.as_str()).collect();
    // Abra (2/3 decks) ranks above Ultra Ball (1/3)
    assert_eq!(names, vec!["Abra", "Ultra Ball"]);
}

#[test]
fn repeated_analysis_is_deterministic() {
    let decks = vec![
        deck(
            &["4 Riolu", "2 Ralts"],
            &["2 Judge", "1 Prime Catcher"],
            &["8 Fighting Energy"],
        ),
        deck(
            &["3 Riolu"],
            &["2 Judge", "1 Master Ball"],
            &["9 Fighting Energy"],
        ),
    ];

    let a = analyze(&decks, &cfg());
    let b = analyze(&decks, &cfg());

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn zero_decks_produce_the_empty_result() {
    let result = analyze(&[], &cfg());

    assert_eq!(result.n_lists, 0);
    assert!(result.core.is_empty());
    assert!(result.all_stats.is_empty());
    assert!(result.ace_spec.is_none());
    assert_eq!(result.avg_category_totals.sum(), 0);
}
