//! Name resolution against the PokéAPI reference catalog.
//!
//! Free-text input is normalized into an ordered list of catalog-query
//! candidates ("Mega Charizard X" -> `charizard-mega-x`, `charizard-mega`,
//! `charizard`), then each candidate is tried against the catalog until one
//! returns 200.

use tracing::debug;

use crate::config::Config;
use crate::error::{DeckcoreError, Result};
use crate::fetch::{status_error, Fetcher};

/// Tokens dropped entirely during normalization.
const IGNORE: &[&str] = &["ex"];
/// Tokens marking an alternate form.
const FORMS: &[&str] = &["mega"];
/// Single-letter form suffixes.
const SUFFIXES: &[&str] = &["x", "y"];

/// Fold common Latin diacritics to their ASCII base letter.
///
/// Input is already lowercased; covers the accents that occur in card and
/// species names (Pokémon, Flabébé, Poké Ball).
fn fold_char(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' => 'y',
        _ => ch,
    }
}

/// Normalize free-text input into query tokens.
///
/// Lowercases, folds diacritics, treats dashes as spaces, drops every other
/// non-alphanumeric character, collapses whitespace, and removes ignorable
/// tokens (a literal `ex` suffix).
pub fn normalize_tokens(input: &str) -> Vec<String> {
    let lowered = input.trim().to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        let ch = fold_char(ch);
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch);
        } else {
            // dashes, whitespace, and punctuation all become separators
            cleaned.push(' ');
        }
    }

    cleaned
        .split_whitespace()
        .filter(|t| !IGNORE.contains(t))
        .map(str::to_string)
        .collect()
}

/// Build the ordered, de-duplicated candidate list for one input.
///
/// A detected mega form emits `base-mega-suffix` (when an `x`/`y` suffix is
/// also present) and `base-mega` before the plain `base`. An empty base
/// token list produces an empty candidate list.
pub fn build_candidates(input: &str) -> Vec<String> {
    let tokens = normalize_tokens(input);

    let has_mega = tokens.iter().any(|t| FORMS.contains(&t.as_str()));
    let suffix = tokens.iter().find(|t| SUFFIXES.contains(&t.as_str()));

    let base_tokens: Vec<&str> = tokens
        .iter()
        .filter(|t| !FORMS.contains(&t.as_str()) && !SUFFIXES.contains(&t.as_str()))
        .map(String::as_str)
        .collect();
    if base_tokens.is_empty() {
        return Vec::new();
    }
    let base = base_tokens.join("-");

    let mut candidates = Vec::new();
    if has_mega {
        if let Some(suffix) = suffix {
            candidates.push(format!("{base}-mega-{suffix}"));
        }
        candidates.push(format!("{base}-mega"));
    }
    candidates.push(base);

    let mut out: Vec<String> = Vec::with_capacity(candidates.len());
    for c in candidates {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolves a free-text name against the reference catalog.
pub struct Resolver<'a> {
    fetcher: &'a Fetcher,
    config: &'a Config,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a Fetcher, config: &'a Config) -> Self {
        Self { fetcher, config }
    }

    /// Resolve `input` to a confirmed catalog name.
    ///
    /// Candidates are queried in order; a 200-class response accepts that
    /// candidate, a 404 moves on to the next, and any other status is an
    /// unrecoverable transport error. Exhausting the list yields
    /// [`DeckcoreError::UnknownPokemon`] carrying every attempted candidate.
    pub fn resolve(&self, input: &str) -> Result<String> {
        let candidates = build_candidates(input);
        if candidates.is_empty() {
            return Err(DeckcoreError::InvalidInput(format!(
                "'{}' contains no usable name tokens",
                input.trim()
            )));
        }

        for candidate in &candidates {
            let url = format!("{}/{}", self.config.catalog_base, candidate);
            debug!(%candidate, "querying reference catalog");
            let status = self.fetcher.get_status(&url)?;
            match status {
                200..=299 => return Ok(candidate.clone()),
                404 => continue,
                other => return Err(status_error(&url, other)),
            }
        }

        Err(DeckcoreError::UnknownPokemon { candidates })
    }
}
