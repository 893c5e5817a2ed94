use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The storefront a listing was extracted from.
///
/// Serialized with the human-readable site names (e.g. `"Vijay Sales"`) so
/// exported result sets keep the schema the surrounding application already
/// consumes. [`FromStr`] accepts the lower-case config tokens instead
/// (`"vijay_sales"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Flipkart,
    Amazon,
    #[serde(rename = "Vijay Sales")]
    VijaySales,
    JioMart,
    Croma,
}

impl Source {
    /// All supported sources, in the order the orchestrator visits them.
    pub const ALL: [Source; 5] = [
        Source::Flipkart,
        Source::Amazon,
        Source::VijaySales,
        Source::JioMart,
        Source::Croma,
    ];

    /// The config-file / environment token for this source.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Source::Flipkart => "flipkart",
            Source::Amazon => "amazon",
            Source::VijaySales => "vijay_sales",
            Source::JioMart => "jiomart",
            Source::Croma => "croma",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Flipkart => "Flipkart",
            Source::Amazon => "Amazon",
            Source::VijaySales => "Vijay Sales",
            Source::JioMart => "JioMart",
            Source::Croma => "Croma",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flipkart" => Ok(Source::Flipkart),
            "amazon" => Ok(Source::Amazon),
            "vijay_sales" | "vijaysales" => Ok(Source::VijaySales),
            "jiomart" => Ok(Source::JioMart),
            "croma" => Ok(Source::Croma),
            _ => Err(UnknownSource(s.trim().to_owned())),
        }
    }
}

/// Error returned when parsing an unrecognized source token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown source \"{0}\"")]
pub struct UnknownSource(pub String);

/// One accepted product listing.
///
/// Built transiently during a site's container scan and immutable once
/// appended to the run's result list. The same product may legitimately
/// appear once per source; no cross-site deduplication happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Listing title as displayed. Never empty, always at least 3 chars.
    pub title: String,
    /// Price text exactly as displayed, currency glyphs and separators
    /// included.
    pub raw_price: String,
    /// Whole-currency-unit magnitude extracted from `raw_price`, or `None`
    /// when no digit token was found.
    pub price: Option<u64>,
    /// Opaque rating display string, `"N/A"` when the site shows none.
    pub rating: String,
    /// One value from the fixed taxonomy, `"General Products"` by default.
    pub category: String,
    pub source: Source,
    /// Absolute product URL; the search-results URL when no
    /// product-specific link could be derived.
    pub url: String,
    /// Absolute image URL or `"N/A"`; placeholder images are excluded at
    /// extraction time.
    pub image: String,
    /// Up to five short offer phrases joined with `" | "`, or `"N/A"`.
    pub offers: String,
}
