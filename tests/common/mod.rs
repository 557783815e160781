//! Shared fixtures for the deckcore integration tests.
//!
//! Provides small builders for parsed decklists and for listing-page HTML
//! in the shape the crawler scans (a completed-tournaments table with
//! `data-date` rows and a winner column carrying images and a decklist
//! link).

#![allow(dead_code)]

use deckcore::ParsedDecklist;

/// Build a [`ParsedDecklist`] from `"qty name"` string slices.
pub fn deck(pokemon: &[&str], trainer: &[&str], energy: &[&str]) -> ParsedDecklist {
    ParsedDecklist {
        pokemon: pokemon.iter().map(|s| s.to_string()).collect(),
        trainer: trainer.iter().map(|s| s.to_string()).collect(),
        energy: energy.iter().map(|s| s.to_string()).collect(),
    }
}

/// One listing-table row: ISO date attribute, date-column tournament link,
/// and a winner column with one image per alt string, optionally wrapped
/// in a decklist anchor.
pub fn listing_row(date: &str, alts: &[&str], decklist_href: Option<&str>) -> String {
    let imgs: String = alts
        .iter()
        .map(|alt| format!(r#"<img src="/i/{alt}.png" alt="{alt}">"#))
        .collect();
    let winner = match decklist_href {
        Some(href) => format!(r#"<a href="{href}">{imgs}</a>"#),
        None => imgs,
    };
    format!(
        r#"<tr data-date="{date}">
            <td><a href="/tournaments/jp/{date}">{date}</a></td>
            <td>City League</td>
            <td>128</td>
            <td>{winner}</td>
        </tr>"#
    )
}

/// Wrap rows in a completed-tournaments table with a header row.
pub fn listing_page(rows: &str) -> String {
    format!(
        r#"<html><body>
        <table class="completed-tournaments">
          <thead><tr><th>Date</th><th>Name</th><th>Players</th><th>Winner</th></tr></thead>
          <tbody>{rows}</tbody>
        </table>
        </body></html>"#
    )
}

/// A decklist document with the three category headers and a couple of
/// price anchors that must not be collected as card lines.
pub fn decklist_page() -> String {
    r#"<html><body>
      <nav><a href="/tournaments">Tournaments</a></nav>
      <div class="decklist">
        <div class="heading">Pokémon (7)</div>
        <a href="/cards/riolu">4 Riolu</a>
        <a href="/cards/lucario">3 Lucario</a>
        <div class="heading">Trainer (4)</div>
        <a href="/cards/judge">2 Judge</a>
        <a href="/cards/ultra-ball">2 Ultra Ball</a>
        <a href="/prices/judge">$1.23</a>
        <div class="heading">Energy (9)</div>
        <a href="/cards/fighting">9 Fighting Energy</a>
        <a href="/prices/fighting">€0.50</a>
      </div>
    </body></html>"#
        .to_string()
}
