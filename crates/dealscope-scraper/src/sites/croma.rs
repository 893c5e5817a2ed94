//! Croma results-page profile.
//!
//! Croma raises a location-permission interstitial on first visit; the
//! popup probe clicks it away when present. Its absence is not an error.

use dealscope_core::Source;

use crate::selectors::{Accept, Candidate, FieldPlan};
use crate::wait::SettleRange;

use super::{
    encode_query, LinkPlan, PopupProbe, ScrollPlan, SiteProfile, StructuralFallback,
};

fn search_url(query: &str) -> String {
    let encoded = encode_query(query);
    format!("https://www.croma.com/searchB?q={encoded}%3Arelevance&text={encoded}")
}

const POPUP_SELECTORS: &[&str] = &[
    "button#allow-button",
    "#allow-button",
    "button[class*='allow']",
];

const CONTAINER_SELECTORS: &[&str] = &[
    "li.product-item",
    "div.product-item",
    "div.product",
    "li[class*='product']",
    "div[class*='product-card']",
    "article.product",
];

const TITLE: &[Candidate] = &[
    Candidate::text_or_attribute("h3.product-title a", "title"),
    Candidate::text_or_attribute("a.product-title", "title"),
    Candidate::text("h3 a"),
    Candidate::text_or_attribute("a[class*='product-title']", "title"),
    Candidate::text("div.product-title"),
    Candidate::text("span.product-title"),
    Candidate::text_or_attribute("a[href*='/p/']", "title"),
];

const PRICE: &[Candidate] = &[
    Candidate::text("span.amount"),
    Candidate::text("span.price"),
    Candidate::text("div.price"),
    Candidate::text("span[class*='price']"),
    Candidate::text("div[class*='price']"),
    Candidate::text("span.new-price"),
    Candidate::text("span.plp-srp-new-amount"),
];

const RATING: &[Candidate] = &[
    Candidate::attribute(".rating", "title"),
    Candidate::text(".rating"),
    Candidate::text("[class*='rating']"),
    Candidate::text("[class*='star']"),
];

const IMAGE: &[Candidate] = &[
    Candidate::attribute("img", "src"),
    Candidate::attribute("img", "data-src"),
];

pub(super) fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Croma,
        base_url: "https://www.croma.com",
        search_url,
        settle: SettleRange::new(3_000, 4_000),
        scroll: ScrollPlan {
            cycles: 5,
            step_px: 1_000,
            pause_ms: 2_000,
            return_to_top: false,
        },
        popup: Some(PopupProbe {
            selectors: POPUP_SELECTORS,
            attempts: 5,
            pause_ms: 1_000,
        }),
        container_selectors: CONTAINER_SELECTORS,
        min_containers: 2,
        max_containers: 20,
        fallback: Some(StructuralFallback {
            probe_selector: "div[class]",
            max_probe: 300,
        }),
        title: FieldPlan {
            field: "title",
            candidates: TITLE,
            accept: Accept::MinLen(4),
        },
        price: FieldPlan {
            field: "price",
            candidates: PRICE,
            accept: Accept::PriceText,
        },
        rating: Some(FieldPlan {
            field: "rating",
            candidates: RATING,
            accept: Accept::NonEmpty,
        }),
        image: FieldPlan {
            field: "image",
            candidates: IMAGE,
            accept: Accept::NonEmpty,
        },
        link: LinkPlan::href_only(&["/p/"]),
    }
}
