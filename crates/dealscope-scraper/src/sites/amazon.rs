//! Amazon.in results-page profile.
//!
//! Amazon is the one site where a container without a derivable product URL
//! is dropped: the `data-asin` attribute (or a `/dp/` href) is reliable
//! enough that its absence means the container is an ad slot or a widget,
//! not a listing.

use dealscope_core::Source;

use crate::selectors::{Accept, Candidate, FieldPlan};
use crate::wait::SettleRange;

use super::{
    encode_query, ContainerId, LinkPlan, ScrollPlan, SiteProfile, StructuralFallback,
};

fn search_url(query: &str) -> String {
    format!(
        "https://www.amazon.in/s?k={}&ref=nb_sb_noss",
        encode_query(query)
    )
}

fn asin_url(asin: &str) -> String {
    format!("https://www.amazon.in/dp/{asin}")
}

const CONTAINER_SELECTORS: &[&str] = &[
    "div[data-component-type='s-search-result']",
    "div.s-result-item[data-asin]",
];

const TITLE: &[Candidate] = &[
    Candidate::text("h2 a span"),
    Candidate::text("h2 span"),
    Candidate::text(".a-size-mini span"),
    Candidate::text(".a-size-base-plus"),
    Candidate::text(".a-size-base"),
    Candidate::text("span.a-text-normal"),
    Candidate::text("h2.a-size-base-plus span"),
    Candidate::text(".a-size-medium"),
];

const PRICE: &[Candidate] = &[
    Candidate::text(".a-price-whole"),
    Candidate::text_or_attribute(".a-price .a-offscreen", "textContent"),
    Candidate::text(".a-price"),
];

const RATING: &[Candidate] = &[
    Candidate::attribute(".a-icon-alt", "title"),
    Candidate::text(".a-icon-alt"),
    Candidate::attribute("span[aria-label*='out of']", "aria-label"),
];

const IMAGE: &[Candidate] = &[Candidate::attribute("img.s-image", "src")];

pub(super) fn profile() -> SiteProfile {
    SiteProfile {
        source: Source::Amazon,
        base_url: "https://www.amazon.in",
        search_url,
        settle: SettleRange::new(5_000, 7_000),
        scroll: ScrollPlan {
            cycles: 3,
            step_px: 800,
            pause_ms: 1_500,
            return_to_top: false,
        },
        popup: None,
        container_selectors: CONTAINER_SELECTORS,
        min_containers: 2,
        max_containers: 15,
        fallback: Some(StructuralFallback {
            probe_selector: "div[class]",
            max_probe: 300,
        }),
        title: FieldPlan {
            field: "title",
            candidates: TITLE,
            accept: Accept::MinLen(6),
        },
        price: FieldPlan {
            field: "price",
            candidates: PRICE,
            accept: Accept::ContainsDigit,
        },
        rating: Some(FieldPlan {
            field: "rating",
            candidates: RATING,
            accept: Accept::ContainsDigit,
        }),
        image: FieldPlan {
            field: "image",
            candidates: IMAGE,
            accept: Accept::NonEmpty,
        },
        link: LinkPlan {
            container_id: Some(ContainerId {
                attribute: "data-asin",
                exact_len: Some(10),
                alphanumeric: true,
            }),
            container_url_attrs: &[],
            href_patterns: &["/dp/"],
            id_pattern: Some(r"/dp/([A-Z0-9]{10})"),
            canonical: Some(asin_url),
            require_product_url: true,
        },
    }
}
