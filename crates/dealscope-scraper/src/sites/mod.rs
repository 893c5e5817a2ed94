//! Per-site extraction profiles.
//!
//! One module per source. A profile is pure data — selector tables, timing
//! bounds, link patterns — consumed by the shared engine in
//! [`crate::extract`]. Everything here is tunable configuration: the values
//! are tuned to each site's observed loading behavior, not invariants.

mod amazon;
mod croma;
mod flipkart;
mod jiomart;
mod vijay_sales;

use dealscope_core::{config::SiteTuning, Source};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::selectors::FieldPlan;
use crate::wait::SettleRange;

/// Bounded scroll-and-wait cycles that trigger lazy loading.
#[derive(Debug, Clone, Copy)]
pub struct ScrollPlan {
    pub cycles: u32,
    pub step_px: i64,
    pub pause_ms: u64,
    /// Scroll back to the top after the cycles (some grids only hydrate
    /// rows that have been back in view).
    pub return_to_top: bool,
}

/// Bounded wait-for-clickable probe for a transient interstitial.
/// Absence of the interstitial is not an error.
#[derive(Debug, Clone, Copy)]
pub struct PopupProbe {
    /// Candidate selectors for the dismiss control, tried in order.
    pub selectors: &'static [&'static str],
    pub attempts: u32,
    pub pause_ms: u64,
}

/// Last-resort container discovery when every selector candidate misses:
/// scan generic elements for ones holding both an image and price-shaped
/// text.
#[derive(Debug, Clone, Copy)]
pub struct StructuralFallback {
    pub probe_selector: &'static str,
    /// Upper bound on probed elements, keeps the scan cheap on huge pages.
    pub max_probe: usize,
}

/// Container attribute holding a product id (e.g. Amazon's `data-asin`).
#[derive(Debug, Clone, Copy)]
pub struct ContainerId {
    pub attribute: &'static str,
    pub exact_len: Option<usize>,
    pub alphanumeric: bool,
}

/// How a product-specific URL is derived from a container.
#[derive(Debug, Clone, Copy)]
pub struct LinkPlan {
    /// Product id read straight off the container element, canonicalized
    /// via [`LinkPlan::canonical`]. Tried first.
    pub container_id: Option<ContainerId>,
    /// Container attributes that may carry the product URL directly.
    pub container_url_attrs: &'static [&'static str],
    /// Substrings identifying a product-path href among contained links.
    pub href_patterns: &'static [&'static str],
    /// Regex (capture group 1) extracting a product id from an href.
    pub id_pattern: Option<&'static str>,
    /// Builds the canonical product URL from an extracted id.
    pub canonical: Option<fn(&str) -> String>,
    /// When true, containers with no derivable product URL are skipped
    /// instead of falling back to the search-results URL.
    pub require_product_url: bool,
}

impl LinkPlan {
    /// A plan that only scans contained links for the given patterns.
    #[must_use]
    pub const fn href_only(href_patterns: &'static [&'static str]) -> Self {
        Self {
            container_id: None,
            container_url_attrs: &[],
            href_patterns,
            id_pattern: None,
            canonical: None,
            require_product_url: false,
        }
    }
}

/// Everything the shared engine needs to extract one site.
#[derive(Debug, Clone, Copy)]
pub struct SiteProfile {
    pub source: Source,
    /// Origin used to absolutize relative hrefs and image URLs.
    pub base_url: &'static str,
    pub search_url: fn(&str) -> String,
    pub settle: SettleRange,
    pub scroll: ScrollPlan,
    pub popup: Option<PopupProbe>,
    /// Ordered container selector candidates; first one yielding at least
    /// [`SiteProfile::min_containers`] matches wins.
    pub container_selectors: &'static [&'static str],
    pub min_containers: usize,
    /// Cap on containers scanned per run.
    pub max_containers: usize,
    pub fallback: Option<StructuralFallback>,
    pub title: FieldPlan,
    pub price: FieldPlan,
    /// `None` for sites that never display ratings on results pages.
    pub rating: Option<FieldPlan>,
    pub image: FieldPlan,
    pub link: LinkPlan,
}

/// Percent-encodes a query for use in a search URL.
pub(crate) fn encode_query(query: &str) -> String {
    utf8_percent_encode(query.trim(), NON_ALPHANUMERIC).to_string()
}

/// The profile for one source.
#[must_use]
pub fn profile_for(source: Source) -> SiteProfile {
    match source {
        Source::Flipkart => flipkart::profile(),
        Source::Amazon => amazon::profile(),
        Source::VijaySales => vijay_sales::profile(),
        Source::JioMart => jiomart::profile(),
        Source::Croma => croma::profile(),
    }
}

/// Profiles for the selected sources, in order, with global tuning
/// overrides applied.
#[must_use]
pub fn profiles_for(sources: &[Source], tuning: SiteTuning) -> Vec<SiteProfile> {
    sources
        .iter()
        .map(|&source| {
            let mut profile = profile_for(source);
            if let Some((min_ms, max_ms)) = tuning.settle_ms {
                profile.settle = SettleRange::new(min_ms, max_ms);
            }
            if let Some(cap) = tuning.max_containers {
                profile.max_containers = cap;
            }
            profile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_query_escapes_spaces_and_symbols() {
        assert_eq!(encode_query("iphone 15"), "iphone%2015");
        assert_eq!(encode_query("tea & coffee"), "tea%20%26%20coffee");
    }

    #[test]
    fn every_source_has_a_profile() {
        for source in Source::ALL {
            let profile = profile_for(source);
            assert_eq!(profile.source, source);
            assert!(!profile.container_selectors.is_empty());
            assert!(!profile.title.candidates.is_empty());
            assert!(!profile.price.candidates.is_empty());
            assert!(profile.min_containers >= 2);
            assert!((15..=25).contains(&profile.max_containers));
        }
    }

    #[test]
    fn search_urls_embed_the_encoded_query() {
        for source in Source::ALL {
            let url = (profile_for(source).search_url)("iphone 15");
            assert!(
                url.contains("iphone%2015"),
                "{source} search URL missing encoded query: {url}"
            );
            assert!(url.starts_with("https://"));
        }
    }

    #[test]
    fn tuning_overrides_settle_and_cap() {
        let tuning = SiteTuning {
            settle_ms: Some((5, 10)),
            max_containers: Some(3),
        };
        for profile in profiles_for(&Source::ALL, tuning) {
            assert_eq!(profile.settle, SettleRange::new(5, 10));
            assert_eq!(profile.max_containers, 3);
        }
    }

    #[test]
    fn only_amazon_requires_a_product_url() {
        for source in Source::ALL {
            let profile = profile_for(source);
            assert_eq!(
                profile.link.require_product_url,
                source == Source::Amazon,
                "{source}"
            );
        }
    }

    #[test]
    fn jiomart_shows_no_rating() {
        assert!(profile_for(Source::JioMart).rating.is_none());
        assert!(profile_for(Source::Flipkart).rating.is_some());
    }
}
