//! Flipkart results-page profile.

use dealscope_core::Source;

use crate::selectors::{Accept, Candidate, FieldPlan};
use crate::wait::SettleRange;

use super::{encode_query, LinkPlan, ScrollPlan, SiteProfile, StructuralFallback};

fn search_url(query: &str) -> String {
    format!("https://www.flipkart.com/search?q={}", encode_query(query))
}

// Flipkart rotates obfuscated class names on redesigns; the chain keeps the
// last several generations alive.
const CONTAINER_SELECTORS: &[&str] = &[
    "div[data-id]",
    "div._1AtVbE",
    "div._13oc-S",
    "div.tUxRFH",
    "div._2kHMtA",
    "div.cPHDOP",
    "div.slAVV4",
    "div._2-gKeQ",
];

const TITLE: &[Candidate] = &[
    Candidate::text_or_attribute("a.wjcEIp", "title"),
    Candidate::text_or_attribute("a.WKTcLC", "title"),
    Candidate::text("div.KzDlHZ"),
    Candidate::text_or_attribute("a.IRpwTa", "title"),
    Candidate::text("div._2WkVRV"),
    Candidate::text_or_attribute("a.s1Q9rs", "title"),
    Candidate::text_or_attribute("a._2rpwqI", "title"),
    Candidate::text("div._4rR01T"),
    Candidate::text_or_attribute("a.CGtC98", "title"),
    Candidate::attribute("a[title]", "title"),
    Candidate::attribute("div[title]", "title"),
];

const PRICE: &[Candidate] = &[
    Candidate::text("div.Nx9bqj"),
    Candidate::text("div._30jeq3"),
    Candidate::text("div._3I9_wc"),
    Candidate::text("div._25b18c"),
    Candidate::text("div.hl05eU"),
    Candidate::text("div._16Jk6d"),
    Candidate::text("div._2rQ-NK"),
];

const RATING: &[Candidate] = &[
    Candidate::text("span.Wphh3N"),
    Candidate::text("div.XQDdHH"),
    Candidate::text("div._3LWZlK"),
    Candidate::text("span._2_R_DZ"),
];

const IMAGE: &[Candidate] = &[
    Candidate::attribute("img", "src"),
    Candidate::attribute("img", "data-src"),
];

pub(super) fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Flipkart,
        base_url: "https://www.flipkart.com",
        search_url,
        settle: SettleRange::new(4_000, 6_000),
        scroll: ScrollPlan {
            cycles: 4,
            step_px: 1_000,
            pause_ms: 2_000,
            return_to_top: false,
        },
        popup: None,
        container_selectors: CONTAINER_SELECTORS,
        min_containers: 3,
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
        link: LinkPlan::href_only(&["/p/", "/dp/", "pid="]),
    }
}
