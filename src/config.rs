use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

pub const CATALOG_BASE: &str = "https://pokeapi.co/api/v2/pokemon";
pub const LISTING_BASE: &str = "https://limitlesstcg.com/tournaments/jp";
pub const SITE_BASE: &str = "https://limitlesstcg.com";

/// Path fragment identifying a decklist link inside a winner column.
pub const DECKLIST_PATH_MARKER: &str = "/decks/list/";

pub const DEFAULT_QUOTA_TARGET: u32 = 60;
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Earliest tournament date considered when no override is given.
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 23).expect("valid calendar date")
}

/// The single-copy ACE SPEC cards recognized by the analysis engine.
pub fn ace_spec_names() -> &'static [&'static str] {
    &[
        "Neo Upper Energy",
        "Reboot Pod",
        "Prime Catcher",
        "Maximum Belt",
        "Master Ball",
        "Hero's Cape",
        "Awakening Drum",
        "Legacy Energy",
        "Unfair Stamp",
        "Survival Brace",
        "Secret Box",
        "Scoop Up Cyclone",
        "Hyper Aroma",
        "Poké Vital A",
        "Neutralization Zone",
        "Dangerous Laser",
        "Sparkling Crystal",
        "Grand Tree",
        "Deluxe Bomb",
        "Enriching Energy",
        "Scramble Switch",
        "Precious Trolley",
        "Miracle Headset",
        "Megaton Blower",
        "Energy Search Pro",
        "Brilliant Blender",
        "Amulet of Hope",
        "Treasure Tracker",
        "Max Rod",
    ]
}

/// Default directory for plain-text analysis reports.
pub fn default_report_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        home.join("Deck_Analysis")
    } else {
        PathBuf::from("Deck_Analysis")
    }
}

/// Runtime configuration for a [`Deckcore`](crate::Deckcore) instance.
///
/// Every remote endpoint, the date cutoff, the quota target, and the
/// ACE SPEC set can be overridden through the builder, which makes the
/// pipeline testable against local servers and alternate rulesets.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_base: String,
    pub listing_base: String,
    pub site_base: String,
    pub cutoff: NaiveDate,
    pub quota_target: u32,
    pub ace_specs: Vec<String>,
    pub max_pages: usize,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base: CATALOG_BASE.to_string(),
            listing_base: LISTING_BASE.to_string(),
            site_base: SITE_BASE.to_string(),
            cutoff: default_cutoff(),
            quota_target: DEFAULT_QUOTA_TARGET,
            ace_specs: ace_spec_names().iter().map(|s| s.to_string()).collect(),
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(20),
        }
    }
}
