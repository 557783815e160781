//! Plain-text report writer.
//!
//! Renders one analysis run as a human-readable document: category
//! averages, the ACE SPEC pick, the core deck grouped by category, and a
//! presence table for the remaining cards.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::analysis::round_half_up;
use crate::error::Result;
use crate::models::{AnalysisResult, Category};

/// Render the report document as a string.
pub fn render_report(found_name: &str, since: NaiveDate, result: &AnalysisResult) -> String {
    let mut buckets: [Vec<(&str, u32)>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (name, qty) in &result.core {
        let cat = result.category_of(name);
        buckets[cat as usize].push((name.as_str(), *qty));
    }
    for bucket in &mut buckets {
        bucket.sort_by_key(|(name, _)| name.to_lowercase());
    }
    let core_cat_totals: Vec<u32> = buckets
        .iter()
        .map(|b| b.iter().map(|(_, q)| *q).sum())
        .collect();

    let totals = &result.avg_category_totals;
    let mut lines: Vec<String> = Vec::new();

    lines.push("Core Deck Report".to_string());
    lines.push(format!("Pokemon: {found_name}"));
    lines.push(format!("Since: {}", since.format("%d/%m/%Y")));
    lines.push(format!("Lists analyzed: {}", result.n_lists));
    lines.push(String::new());

    lines.push("=== CATEGORY AVERAGES ===".to_string());
    lines.push(format!("Pokemon:  {}", totals.pokemon));
    lines.push(format!("Trainer:  {}", totals.trainer));
    lines.push(format!("Energy:   {}", totals.energy));
    lines.push(format!("Total:    {}", totals.sum()));
    lines.push(String::new());

    lines.push(format!(
        "Most likely ACE SPEC: {}",
        result.ace_spec.as_deref().unwrap_or("(none identified)")
    ));
    lines.push(String::new());

    lines.push("=== CORE DECK ===".to_string());
    lines.push(format!("Total core cards: {}", result.core_count_cards));
    lines.push(String::new());

    for cat in Category::ALL {
        lines.push(format!("{}: {}", cat.label(), core_cat_totals[cat as usize]));
        for (name, qty) in &buckets[cat as usize] {
            lines.push(format!("{qty} {name}"));
        }
        lines.push(String::new());
    }

    lines.push("=== REMAINING CARDS (likelihood of making the deck) ===".to_string());
    lines.push("Format: %Presence | Lists | AvgQty | Card | Type".to_string());
    lines.push(String::new());

    for s in &result.remaining {
        let pct = round_half_up(s.presence_pct);
        lines.push(format!(
            "{:>3}% | {:>2}/{} | {:>2} | {} | {}",
            pct, s.present_in, result.n_lists, s.avg_qty_round, s.name, s.category
        ));
    }

    lines.join("\n")
}

/// Write the report into `dir` as `analysis_{name}_deck_{YYYYMMDD}.txt`,
/// creating the directory if needed. Returns the path of the written file.
pub fn write_report(
    dir: &Path,
    found_name: &str,
    since: NaiveDate,
    today: NaiveDate,
    result: &AnalysisResult,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file = dir.join(format!(
        "analysis_{}_deck_{}.txt",
        found_name,
        today.format("%Y%m%d")
    ));
    fs::write(&file, render_report(found_name, since, result))?;
    Ok(file)
}
