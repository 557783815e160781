//! Paginated crawler for the tournament-results listing.
//!
//! Walks `{listing_base}?page=N` in strictly increasing page order,
//! collecting rows whose winner column matches the resolved target name.
//! Stops at the date cutoff, a repeated page (loop guard), exhausted
//! pagination, or the hard page bound -- whichever comes first.
//!
//! Page scanning is a pure function over the page bytes, so the stop rules
//! are unit-testable without any network I/O.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::{Config, DECKLIST_PATH_MARKER};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::MatchRow;

/// URL of the Nth listing page; page 1 is the bare listing.
pub fn page_url(listing_base: &str, page: usize) -> String {
    if page <= 1 {
        listing_base.to_string()
    } else {
        format!("{listing_base}?page={page}")
    }
}

/// Absolutize a site-relative href against the site base.
pub fn make_absolute_url(site_base: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{site_base}{href}")
    } else {
        href.to_string()
    }
}

/// SHA-256 fingerprint of a listing page, for the repeated-page loop guard.
pub fn page_fingerprint(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// Page scanning
// ---------------------------------------------------------------------------

/// Outcome of scanning a single listing page.
#[derive(Debug, Default)]
pub struct PageScan {
    /// Extractable rows seen (non-header rows carrying a parseable
    /// ISO date attribute). Zero means pagination is exhausted.
    pub rows: usize,
    /// Rows whose winner matched the target, in document order.
    pub matches: Vec<MatchRow>,
    /// A row older than the cutoff was reached; no further pages apply.
    pub reached_cutoff: bool,
}

/// Scan one listing page for rows matching `target` (already lowercase).
///
/// Rows are read from the completed-tournaments table (or the first table
/// in the document). Header rows and rows without a machine-readable
/// `data-date` attribute are skipped. Rows are assumed newest-first: the
/// first row dated before `since` sets `reached_cutoff` and ends the scan.
pub fn scan_page(html: &str, site_base: &str, target: &str, since: NaiveDate) -> PageScan {
    let doc = Html::parse_document(html);
    let completed = Selector::parse("table.completed-tournaments").unwrap();
    let any_table = Selector::parse("table").unwrap();
    let tr = Selector::parse("tr").unwrap();
    let th = Selector::parse("th").unwrap();
    let anchor = Selector::parse("a[href]").unwrap();
    let img = Selector::parse("img").unwrap();

    let mut scan = PageScan::default();

    let table = doc
        .select(&completed)
        .next()
        .or_else(|| doc.select(&any_table).next());
    let Some(table) = table else {
        return scan;
    };

    for row in table.select(&tr) {
        if row.select(&th).next().is_some() {
            continue;
        }
        let Some(date_attr) = row.value().attr("data-date") else {
            continue;
        };
        let Ok(date) = date_attr.parse::<NaiveDate>() else {
            continue;
        };
        scan.rows += 1;

        if date < since {
            scan.reached_cutoff = true;
            break;
        }

        // Direct-child cells only; the winner column is the fourth.
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .collect();
        if cells.len() < 4 {
            continue;
        }

        let tournament_url = cells[0]
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| make_absolute_url(site_base, href));

        let winner = cells[3];
        let decklist_url = winner
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|href| href.contains(DECKLIST_PATH_MARKER))
            .map(|href| make_absolute_url(site_base, href));

        let winners: Vec<String> = winner
            .select(&img)
            .filter_map(|i| i.value().attr("alt"))
            .map(|alt| alt.trim().to_lowercase())
            .filter(|alt| !alt.is_empty())
            .collect();

        if winners.iter().any(|alt| alt == target) {
            scan.matches.push(MatchRow {
                date,
                winners,
                tournament_url,
                decklist_url,
            });
        }
    }

    scan
}

// ---------------------------------------------------------------------------
// Crawler
// ---------------------------------------------------------------------------

/// Crawls the tournament listing for winning rows matching a name.
pub struct Crawler<'a> {
    fetcher: &'a Fetcher,
    config: &'a Config,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a Fetcher, config: &'a Config) -> Self {
        Self { fetcher, config }
    }

    /// Collect every listing row since `since` whose winner matches `name`.
    ///
    /// Any transport or HTTP error while fetching a page aborts the whole
    /// crawl; an empty result is not an error and means "no matches".
    pub fn winning_rows(&self, name: &str, since: NaiveDate) -> Result<Vec<MatchRow>> {
        let target = name.trim().to_lowercase();
        let mut matches: Vec<MatchRow> = Vec::new();
        let mut prev_fingerprint: Option<[u8; 32]> = None;

        for page in 1..=self.config.max_pages {
            let url = page_url(&self.config.listing_base, page);
            debug!(page, %url, "fetching listing page");
            let body = self.fetcher.get_text(&url)?;

            let fingerprint = page_fingerprint(body.as_bytes());
            if prev_fingerprint == Some(fingerprint) {
                debug!(page, "listing page repeated; stopping crawl");
                break;
            }
            prev_fingerprint = Some(fingerprint);

            let scan = scan_page(&body, &self.config.site_base, &target, since);
            if scan.rows == 0 {
                break;
            }
            matches.extend(scan.matches);
            if scan.reached_cutoff {
                break;
            }
        }

        Ok(matches)
    }
}
