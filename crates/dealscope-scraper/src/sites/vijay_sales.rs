//! Vijay Sales results-page profile.
//!
//! The slowest-loading site in the set: long settle bounds, eight scroll
//! cycles, and a return-to-top pass so the lazy grid finishes hydrating.

use dealscope_core::Source;

use crate::selectors::{Accept, Candidate, FieldPlan};
use crate::wait::SettleRange;

use super::{encode_query, LinkPlan, ScrollPlan, SiteProfile, StructuralFallback};

fn search_url(query: &str) -> String {
    format!(
        "https://www.vijaysales.com/search-listing?q={}",
        encode_query(query)
    )
}

const CONTAINER_SELECTORS: &[&str] = &[
    "div.product-layout.product-grid",
    "div.product-layout",
    "div.product-thumb",
    "article.product-item",
    "div.product-item",
    "li.product-item",
    ".product-grid > div",
    "div[class*='col-'][class*='product']",
];

const TITLE: &[Candidate] = &[
    Candidate::text_or_attribute("h4.product-name a", "title"),
    Candidate::text_or_attribute("div.product-name a", "title"),
    Candidate::text_or_attribute("a.product-name", "title"),
    Candidate::text(".caption h4 a"),
    Candidate::text(".caption h4"),
    Candidate::text("h4 a"),
    Candidate::text("h3 a"),
    Candidate::text("div.name a"),
    Candidate::text("div.name"),
    Candidate::text_or_attribute("a[href*='/p/']", "title"),
    Candidate::text_or_attribute("a[href*='product']", "title"),
    Candidate::attribute("a[title]", "title"),
    Candidate::text(".product-title a"),
    Candidate::text(".product-title"),
];

const PRICE: &[Candidate] = &[
    Candidate::text("span.price-new"),
    Candidate::text("div.price span.price-new"),
    Candidate::text("div.price"),
    Candidate::text(".price-new"),
    Candidate::text("span.price"),
    Candidate::text(".product-price"),
    Candidate::text("p.price"),
    Candidate::text(".amount"),
    Candidate::text("span[class*='price']"),
    Candidate::text("div[class*='price']"),
];

const RATING: &[Candidate] = &[
    Candidate::attribute(".rating", "title"),
    Candidate::text(".rating"),
    Candidate::text(".rating-result"),
    Candidate::text("[class*='rating']"),
    Candidate::text("[class*='star']"),
];

const IMAGE: &[Candidate] = &[
    Candidate::attribute("img", "src"),
    Candidate::attribute("img", "data-src"),
    Candidate::attribute("img", "data-lazy"),
];

pub(super) fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::VijaySales,
        base_url: "https://www.vijaysales.com",
        search_url,
        settle: SettleRange::new(8_000, 10_000),
        scroll: ScrollPlan {
            cycles: 8,
            step_px: 800,
            pause_ms: 2_000,
            return_to_top: true,
        },
        popup: None,
        container_selectors: CONTAINER_SELECTORS,
        min_containers: 2,
        max_containers: 25,
        fallback: Some(StructuralFallback {
            probe_selector: "div[class]",
            max_probe: 400,
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
        link: LinkPlan::href_only(&["/p/", "product"]),
    }
}
