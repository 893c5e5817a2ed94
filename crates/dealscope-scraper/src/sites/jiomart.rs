//! JioMart results-page profile.
//!
//! JioMart renders no rating on results cards, and product links often live
//! on wrapper attributes (`data-url`) rather than anchors inside the card.

use dealscope_core::Source;

use crate::selectors::{Accept, Candidate, FieldPlan};
use crate::wait::SettleRange;

use super::{encode_query, LinkPlan, ScrollPlan, SiteProfile, StructuralFallback};

fn search_url(query: &str) -> String {
    format!("https://www.jiomart.com/search/{}", encode_query(query))
}

const CONTAINER_SELECTORS: &[&str] = &[
    "div.plp-card-container",
    "div[data-test='product-card']",
    "div.product-card",
    "article.product",
];

const TITLE: &[Candidate] = &[
    Candidate::text("div.plp-card-details-name"),
    Candidate::text("div.jm-body-xs"),
    Candidate::text("h3"),
    Candidate::attribute("a[title]", "title"),
];

const PRICE: &[Candidate] = &[
    Candidate::text("span.jm-heading-xxs"),
    Candidate::text("span.jm-heading-xs"),
    Candidate::text("span[class*='price']"),
    Candidate::text("div[class*='price']"),
];

const IMAGE: &[Candidate] = &[
    Candidate::attribute("img", "src"),
    Candidate::attribute("img", "data-src"),
];

pub(super) fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::JioMart,
        base_url: "https://www.jiomart.com",
        search_url,
        settle: SettleRange::new(5_000, 7_000),
        scroll: ScrollPlan {
            cycles: 4,
            step_px: 1_000,
            pause_ms: 2_000,
            return_to_top: false,
        },
        popup: None,
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
            accept: Accept::ContainsDigit,
        },
        rating: None,
        image: FieldPlan {
            field: "image",
            candidates: IMAGE,
            accept: Accept::NonEmpty,
        },
        link: LinkPlan {
            container_id: None,
            container_url_attrs: &["data-url", "data-href"],
            href_patterns: &["/p/", "product"],
            id_pattern: None,
            canonical: None,
            require_product_url: false,
        },
    }
}
