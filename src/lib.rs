//! Tournament decklist crawler and core-deck analyzer for the Pokémon TCG.
//!
//! Resolves a free-text card name against the PokéAPI reference catalog,
//! crawls the Limitless tournament listing for winning decklists since a
//! cutoff date, parses each decklist document, and aggregates the results
//! into presence statistics, a forced-sum-60 per-category quota, and a
//! most-likely ACE SPEC pick.
//!
//! # Quick start
//!
//! ```no_run
//! use deckcore::Deckcore;
//!
//! let engine = Deckcore::builder().build();
//!
//! let run = engine.run("Mega Charizard X").unwrap();
//! println!(
//!     "{}: {} core cards across {} lists",
//!     run.found, run.result.core_count_cards, run.result.n_lists
//! );
//! ```

pub mod analysis;
pub mod basedeck;
pub mod config;
pub mod crawler;
pub mod decklist;
pub mod error;
pub mod fetch;
pub mod models;
pub mod report;
pub mod resolver;

pub use config::Config;
pub use error::{DeckcoreError, Result};
pub use fetch::Fetcher;
pub use models::*;

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::info;

use crate::analysis::AnalysisConfig;
use crate::crawler::Crawler;
use crate::decklist::DecklistFetcher;
use crate::resolver::Resolver;

// ---------------------------------------------------------------------------
// DeckcoreBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Deckcore`] instance.
///
/// Use [`Deckcore::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DeckcoreBuilder::build) to create the
/// engine.
#[derive(Debug, Default)]
pub struct DeckcoreBuilder {
    config: Config,
}

impl DeckcoreBuilder {
    /// Set the earliest tournament date considered by the crawler.
    pub fn cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.config.cutoff = cutoff;
        self
    }

    /// Set the per-deck card total the category quota is forced to sum to.
    ///
    /// Defaults to 60, the legal deck size.
    pub fn quota_target(mut self, target: u32) -> Self {
        self.config.quota_target = target;
        self
    }

    /// Replace the set of recognized ACE SPEC card names.
    pub fn ace_specs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ace_specs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Override the reference-catalog base URL (e.g. a test server).
    pub fn catalog_base(mut self, url: impl Into<String>) -> Self {
        self.config.catalog_base = url.into();
        self
    }

    /// Override the tournament-listing base URL.
    pub fn listing_base(mut self, url: impl Into<String>) -> Self {
        self.config.listing_base = url.into();
        self
    }

    /// Override the site base used to absolutize relative links.
    pub fn site_base(mut self, url: impl Into<String>) -> Self {
        self.config.site_base = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 20 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the hard safety bound on crawled listing pages.
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Build the engine, creating the shared blocking HTTP client.
    pub fn build(self) -> Deckcore {
        let fetcher = Fetcher::new(self.config.timeout);
        Deckcore {
            config: self.config,
            fetcher,
        }
    }
}

// ---------------------------------------------------------------------------
// Deckcore
// ---------------------------------------------------------------------------

/// The main entry point for the analysis pipeline.
///
/// Owns the configuration and the blocking HTTP client, and exposes the
/// pipeline components as lightweight borrowing wrappers. Created via
/// [`Deckcore::builder()`].
#[derive(Debug)]
pub struct Deckcore {
    config: Config,
    fetcher: Fetcher,
}

impl Deckcore {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> DeckcoreBuilder {
        DeckcoreBuilder::default()
    }

    // -- Component accessors -----------------------------------------------

    /// Access the name resolver.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.fetcher, &self.config)
    }

    /// Access the tournament-listing crawler.
    pub fn crawler(&self) -> Crawler<'_> {
        Crawler::new(&self.fetcher, &self.config)
    }

    /// Access the decklist fetcher.
    pub fn decklists(&self) -> DecklistFetcher<'_> {
        DecklistFetcher::new(&self.fetcher)
    }

    /// The aggregation-engine configuration derived from this instance.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            quota_target: self.config.quota_target,
            ace_specs: self.config.ace_specs.clone(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // -- Pipeline ----------------------------------------------------------

    /// Run the full pipeline for one free-text query:
    /// resolve -> crawl -> fetch decklists -> aggregate.
    ///
    /// Per-decklist failures are collected into the run's `errors` list;
    /// the run only fails outright when the name cannot be resolved, the
    /// crawl errors or comes back empty, or zero decklists are usable.
    pub fn run(&self, query: &str) -> Result<AnalysisRun> {
        let found = self.resolver().resolve(query)?;
        info!(%found, "name validated against the reference catalog");

        let since = self.config.cutoff;
        let matches = self.crawler().winning_rows(&found, since)?;
        if matches.is_empty() {
            return Err(DeckcoreError::NoMatches { name: found, since });
        }
        info!(count = matches.len(), "winning rows found since cutoff");

        let (decks, errors) = self.decklists().fetch_all(&matches);
        if decks.is_empty() {
            return Err(DeckcoreError::NoUsableDecklists {
                attempted: matches.len(),
                errors,
            });
        }
        info!(
            parsed = decks.len(),
            failed = errors.len(),
            "decklists fetched"
        );

        let result = analysis::analyze(&decks, &self.analysis_config());
        Ok(AnalysisRun {
            input: query.to_string(),
            found,
            since,
            matches_found: matches.len(),
            decklists_parsed: decks.len(),
            errors,
            result,
        })
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Deckcore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deckcore(listing={}, cutoff={}, quota={})",
            self.config.listing_base, self.config.cutoff, self.config.quota_target
        )
    }
}
