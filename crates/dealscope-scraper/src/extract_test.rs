use dealscope_core::Source;

use super::*;
use crate::fake::{FakeElement, FakeSession};
use crate::sites::profile_for;

const FLIPKART_IMG: &str = "https://rukminim2.flixcart.com/image/apple-iphone-15.jpg";

/// A complete, relevant Flipkart listing container.
fn flipkart_container(title: &str, price: &str) -> FakeElement {
    FakeElement::new(&format!("{title}\n{price}\n10% instant discount\nbank offer available"))
        .with_child("a.wjcEIp", FakeElement::new(title))
        .with_child("div.Nx9bqj", FakeElement::new(price))
        .with_child("span.Wphh3N", FakeElement::new("4.6"))
        .with_child("img", FakeElement::new("").with_attribute("src", FLIPKART_IMG))
        .with_child(
            "a",
            FakeElement::new(title)
                .with_attribute("href", "https://www.flipkart.com/apple-iphone-15/p/itm123"),
        )
}

#[tokio::test(start_paused = true)]
async fn flipkart_happy_path_builds_normalized_records() {
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![
            flipkart_container("Apple iPhone 15 (128GB)", "\u{20b9}65,999"),
            flipkart_container("Apple iPhone 15 (256GB)", "\u{20b9}75,999"),
            flipkart_container("Apple iPhone 15 Plus", "\u{20b9}79,999"),
        ],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();

    assert_eq!(records.len(), 3);
    let first = &records[0];
    assert_eq!(first.title, "Apple iPhone 15 (128GB)");
    assert_eq!(first.raw_price, "\u{20b9}65,999");
    assert_eq!(first.price, Some(65_999));
    assert_eq!(first.rating, "4.6");
    assert_eq!(first.category, "Mobile Phones");
    assert_eq!(first.source, Source::Flipkart);
    assert_eq!(first.url, "https://www.flipkart.com/apple-iphone-15/p/itm123");
    assert_eq!(first.image, FLIPKART_IMG);
    assert_eq!(first.offers, "10% Instant Discount | Bank Offer Available");
}

#[tokio::test(start_paused = true)]
async fn container_selector_fallback_tries_candidates_in_order() {
    // Nothing under the preferred selector; the second-generation class
    // still matches enough containers.
    let session = FakeSession::new().with_elements(
        "div._1AtVbE",
        vec![
            flipkart_container("Apple iPhone 15 (128GB)", "\u{20b9}65,999"),
            flipkart_container("Apple iPhone 15 (256GB)", "\u{20b9}75,999"),
            flipkart_container("Apple iPhone 15 Plus", "\u{20b9}79,999"),
        ],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn below_minimum_match_count_is_a_miss() {
    // Two containers under a selector requiring three: the chain moves on
    // and, with nothing else matching, the site yields zero records.
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![
            flipkart_container("Apple iPhone 15 (128GB)", "\u{20b9}65,999"),
            flipkart_container("Apple iPhone 15 (256GB)", "\u{20b9}75,999"),
        ],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn structural_fallback_finds_image_and_price_containers() {
    let probe_container = || {
        FakeElement::new("Apple iPhone 15 (128GB)\n\u{20b9}65,999")
            .with_child("img", FakeElement::new("").with_attribute("src", FLIPKART_IMG))
            .with_child("a.wjcEIp", FakeElement::new("Apple iPhone 15 (128GB)"))
            .with_child("div.Nx9bqj", FakeElement::new("\u{20b9}65,999"))
    };
    // Noise element: has an image but no price-shaped text.
    let noise = FakeElement::new("Sponsored banner")
        .with_child("img", FakeElement::new("").with_attribute("src", FLIPKART_IMG));

    let session = FakeSession::new().with_elements(
        "div[class]",
        vec![probe_container(), noise, probe_container(), probe_container()],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn irrelevant_and_priceless_containers_are_skipped() {
    let no_price = FakeElement::new("Apple iPhone 15 Plus")
        .with_child("a.wjcEIp", FakeElement::new("Apple iPhone 15 Plus"));
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![
            flipkart_container("Apple iPhone 15 (128GB)", "\u{20b9}65,999"),
            // Accessory: relevance filter rejects it for a device query.
            flipkart_container("iPhone 15 Pro Case", "\u{20b9}499"),
            no_price,
        ],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Apple iPhone 15 (128GB)");
}

#[tokio::test(start_paused = true)]
async fn missing_fields_default_to_na_without_aborting() {
    let bare = FakeElement::new("Apple iPhone 15 (128GB)\n\u{20b9}65,999")
        .with_child("a.wjcEIp", FakeElement::new("Apple iPhone 15 (128GB)"))
        .with_child("div.Nx9bqj", FakeElement::new("\u{20b9}65,999"));
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![bare.clone(), bare.clone(), bare],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records.len(), 3);
    let record = &records[0];
    assert_eq!(record.rating, "N/A");
    assert_eq!(record.image, "N/A");
    assert_eq!(record.offers, "N/A");
    // No product link derivable: fall back to the search-results URL.
    assert!(record.url.starts_with("https://www.flipkart.com/search?q="));
}

#[tokio::test(start_paused = true)]
async fn placeholder_and_stub_images_are_excluded() {
    let with_placeholder = FakeElement::new("Apple iPhone 15 (128GB)")
        .with_child("a.wjcEIp", FakeElement::new("Apple iPhone 15 (128GB)"))
        .with_child("div.Nx9bqj", FakeElement::new("\u{20b9}65,999"))
        .with_child(
            "img",
            FakeElement::new("")
                .with_attribute("src", "https://img.flixcart.com/PLACEHOLDER-image.png"),
        );
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![
            with_placeholder,
            flipkart_container("Apple iPhone 15 (256GB)", "\u{20b9}75,999"),
            flipkart_container("Apple iPhone 15 Plus", "\u{20b9}79,999"),
        ],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records[0].image, "N/A");
    assert_eq!(records[1].image, FLIPKART_IMG);
}

#[tokio::test(start_paused = true)]
async fn relative_urls_are_absolutized_against_the_site_origin() {
    let container = FakeElement::new("Apple iPhone 15 (128GB)\n\u{20b9}65,999")
        .with_child("a.wjcEIp", FakeElement::new("Apple iPhone 15 (128GB)"))
        .with_child("div.Nx9bqj", FakeElement::new("\u{20b9}65,999"))
        .with_child(
            "img",
            FakeElement::new("")
                .with_attribute("src", "/image/apple-iphone-15-front-back.jpg"),
        )
        .with_child(
            "a",
            FakeElement::new("").with_attribute("href", "/apple-iphone-15/p/itm123"),
        );
    let session = FakeSession::new().with_elements(
        "div[data-id]",
        vec![container.clone(), container.clone(), container],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(
        records[0].url,
        "https://www.flipkart.com/apple-iphone-15/p/itm123"
    );
    assert_eq!(
        records[0].image,
        "https://www.flipkart.com/image/apple-iphone-15-front-back.jpg"
    );
}

#[tokio::test(start_paused = true)]
async fn amazon_canonicalizes_asin_and_requires_a_product_url() {
    let with_asin = FakeElement::new("Apple iPhone 15 (128GB)\n\u{20b9}64,999")
        .with_attribute("data-asin", "B0CHX1W1XY")
        .with_child("h2 a span", FakeElement::new("Apple iPhone 15 (128GB)"))
        .with_child(".a-price-whole", FakeElement::new("64,999"));
    // Ad widget: no ASIN, no /dp/ link — must be dropped, not defaulted.
    let without_asin = FakeElement::new("Apple iPhone 15 (256GB)\n\u{20b9}74,999")
        .with_child("h2 a span", FakeElement::new("Apple iPhone 15 (256GB)"))
        .with_child(".a-price-whole", FakeElement::new("74,999"));

    let session = FakeSession::new().with_elements(
        "div[data-component-type='s-search-result']",
        vec![with_asin, without_asin],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Amazon));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://www.amazon.in/dp/B0CHX1W1XY");
}

#[tokio::test(start_paused = true)]
async fn amazon_extracts_asin_from_dp_href_when_attribute_missing() {
    let container = FakeElement::new("Apple iPhone 15 (128GB)\n\u{20b9}64,999")
        .with_child("h2 a span", FakeElement::new("Apple iPhone 15 (128GB)"))
        .with_child(".a-price-whole", FakeElement::new("64,999"))
        .with_child(
            "a",
            FakeElement::new("").with_attribute(
                "href",
                "https://www.amazon.in/apple-iphone-15/dp/B0CHX1W1XY/ref=sr_1_1",
            ),
        );
    let session = FakeSession::new().with_elements(
        "div[data-component-type='s-search-result']",
        vec![container.clone(), container],
    );
    let adapter = ProfileAdapter::new(profile_for(Source::Amazon));

    let records = adapter.extract(&session, "iphone 15").await.unwrap();
    assert_eq!(records[0].url, "https://www.amazon.in/dp/B0CHX1W1XY");
}

#[tokio::test(start_paused = true)]
async fn jiomart_reads_product_url_from_container_attribute() {
    let container = FakeElement::new("Basmati Rice 5kg\n\u{20b9}499")
        .with_attribute("data-url", "/groceries/basmati-rice-5kg/p/591234567")
        .with_child("div.plp-card-details-name", FakeElement::new("Basmati Rice 5kg"))
        .with_child("span.jm-heading-xxs", FakeElement::new("\u{20b9}499"));
    let session = FakeSession::new()
        .with_elements("div.plp-card-container", vec![container.clone(), container]);
    let adapter = ProfileAdapter::new(profile_for(Source::JioMart));

    let records = adapter.extract(&session, "basmati rice").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].url,
        "https://www.jiomart.com/groceries/basmati-rice-5kg/p/591234567"
    );
    // JioMart results cards carry no rating.
    assert_eq!(records[0].rating, "N/A");
}

#[tokio::test(start_paused = true)]
async fn navigation_failure_is_an_adapter_error() {
    let session = FakeSession::failing_navigation();
    let adapter = ProfileAdapter::new(profile_for(Source::Flipkart));

    let err = adapter.extract(&session, "iphone 15").await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::Adapter { site: Source::Flipkart, .. }),
        "expected adapter failure, got: {err:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn croma_popup_probe_tolerates_absent_interstitial() {
    let container = FakeElement::new("Sony Bravia 43 inch TV\n\u{20b9}41,990")
        .with_child("h3 a", FakeElement::new("Sony Bravia 43 inch TV"))
        .with_child("span.amount", FakeElement::new("\u{20b9}41,990"));
    let session = FakeSession::new()
        .with_elements("li.product-item", vec![container.clone(), container]);
    let adapter = ProfileAdapter::new(profile_for(Source::Croma));

    // No popup elements exist anywhere; extraction must still succeed.
    let records = adapter.extract(&session, "sony bravia tv").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, "Television");
}
