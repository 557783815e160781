//! Decklist document parsing.
//!
//! A decklist page carries three category headers ("Pokémon (12)",
//! "Trainer (35)", "Energy (13)") with the card lines rendered as anchors
//! of the form `"<qty> <name>"`. [`parse_decklist`] is a pure
//! document-to-lists function; fetching lives in [`DecklistFetcher`] so the
//! parser can be exercised on raw bytes.

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::warn;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::{Category, FetchFailure, MatchRow, ParsedDecklist};

fn is_card_line(line_re: &Regex, text: &str) -> bool {
    // price links render as currency amounts; they are not card lines
    !text.is_empty() && !text.starts_with('$') && !text.contains('€') && line_re.is_match(text)
}

/// Parse one decklist document into its three category lists.
///
/// Walks the document in order, switching the current section whenever a
/// category header is encountered and collecting every anchor whose text is
/// a quantity/name line. If any of the three headers is missing, every line
/// item lands in the trainer bucket instead -- a single mis-bucketed deck is
/// corrected downstream by the majority vote across decks.
pub fn parse_decklist(html: &str) -> ParsedDecklist {
    let line_re = Regex::new(r"^(\d+)\s+(.+)$").unwrap();
    let pokemon_re = Regex::new(r"^Pok[eé]mon\s*\(\d+\)").unwrap();
    let trainer_re = Regex::new(r"^Trainer\s*\(\d+\)").unwrap();
    let energy_re = Regex::new(r"^Energy\s*\(\d+\)").unwrap();

    let doc = Html::parse_document(html);

    let mut current: Option<Category> = None;
    let mut seen = [false; 3];
    let mut items: Vec<(Option<Category>, String)> = Vec::new();

    for node in doc.root_element().descendants() {
        if let Some(text) = node.value().as_text() {
            let trimmed = text.trim();
            if pokemon_re.is_match(trimmed) {
                current = Some(Category::Pokemon);
                seen[0] = true;
            } else if trainer_re.is_match(trimmed) {
                current = Some(Category::Trainer);
                seen[1] = true;
            } else if energy_re.is_match(trimmed) {
                current = Some(Category::Energy);
                seen[2] = true;
            }
            continue;
        }

        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if el.value().name() != "a" {
            continue;
        }
        let text: String = el.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if is_card_line(&line_re, &text) {
            items.push((current, text));
        }
    }

    let mut deck = ParsedDecklist::default();
    if seen.iter().all(|s| *s) {
        for (section, line) in items {
            match section {
                Some(Category::Pokemon) => deck.pokemon.push(line),
                Some(Category::Trainer) => deck.trainer.push(line),
                Some(Category::Energy) => deck.energy.push(line),
                // anchors before the first header belong to no section
                None => {}
            }
        }
    } else {
        deck.trainer = items.into_iter().map(|(_, line)| line).collect();
    }
    deck
}

// ---------------------------------------------------------------------------
// DecklistFetcher
// ---------------------------------------------------------------------------

/// Fetches decklist documents for crawled match rows.
pub struct DecklistFetcher<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> DecklistFetcher<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse a single decklist document.
    pub fn fetch(&self, url: &str) -> Result<ParsedDecklist> {
        let body = self.fetcher.get_text(url)?;
        Ok(parse_decklist(&body))
    }

    /// Fetch every match row's decklist, in discovery order.
    ///
    /// A missing link or a failed fetch degrades that entry into a
    /// [`FetchFailure`] record; the batch itself never aborts.
    pub fn fetch_all(&self, rows: &[MatchRow]) -> (Vec<ParsedDecklist>, Vec<FetchFailure>) {
        let mut decks = Vec::new();
        let mut failures = Vec::new();

        for row in rows {
            match &row.decklist_url {
                None => {
                    warn!(date = %row.date, "row has no decklist link in the winner column");
                    failures.push(FetchFailure {
                        date: row.date,
                        decklist_url: None,
                        reason: "no decklist link in the winner column".to_string(),
                    });
                }
                Some(url) => match self.fetch(url) {
                    Ok(deck) => decks.push(deck),
                    Err(e) => {
                        warn!(date = %row.date, %url, error = %e, "decklist fetch failed");
                        failures.push(FetchFailure {
                            date: row.date,
                            decklist_url: Some(url.clone()),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        (decks, failures)
    }
}
