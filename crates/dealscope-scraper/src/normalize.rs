//! Text normalizers: display-price parsing and offer-line detection.
//!
//! Uses manual byte scanning rather than `regex` for the hot price path;
//! see [`crate::extract`] for how these compose into record building.

/// Phrases that mark a line of container text as a promotional offer.
const OFFER_KEYWORDS: [&str; 12] = [
    "off",
    "discount",
    "bank offer",
    "exchange",
    "cashback",
    "save",
    "bonus",
    "deal",
    "extra",
    "free",
    "coupon",
    "promo",
];

/// Maximum number of offer phrases kept per listing.
const MAX_OFFERS: usize = 5;

/// Extracts the whole-currency-unit price from a display string.
///
/// Strips currency glyphs, thousands separators, and any other non-digit
/// noise, then takes the first contiguous digit run. Decimal fragments are
/// informational only: `"₹1,234.56"` → `1234` (truncated, not rounded).
///
/// Returns `None` for empty input, literal `"N/A"`, and strings with no
/// digit token.
#[must_use]
pub fn parse_price(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return None;
    }

    // Thousands separators would split the digit run; drop them up front.
    // Currency glyphs and locale text fall out of the scan naturally.
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let bytes = cleaned.as_bytes();

    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    cleaned[start..start + len].parse::<u64>().ok()
}

/// True when `text` looks like it contains a price: a rupee glyph or a run
/// of at least three consecutive digits. Used by the structural container
/// fallback and by price-text acceptance checks.
#[must_use]
pub(crate) fn has_price_token(text: &str) -> bool {
    if text.contains('\u{20b9}') {
        return true;
    }
    let mut run = 0usize;
    for b in text.bytes() {
        if b.is_ascii_digit() {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Scans container text for promotional offer lines.
///
/// Splits on newlines, keeps lines containing an offer keyword, and drops
/// lines that are purely numeric, a bare percentage, or outside the 4–199
/// character window. Survivors are title-cased; at most [`MAX_OFFERS`] are
/// returned, in scan order.
#[must_use]
pub fn detect_offers(container_text: &str) -> Vec<String> {
    let mut offers = Vec::new();

    for line in container_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if !OFFER_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        if is_purely_numeric(&lower) || is_bare_percentage(&lower) {
            continue;
        }
        let chars = lower.chars().count();
        if chars <= 3 || chars >= 200 {
            continue;
        }

        offers.push(title_case(&lower));
        if offers.len() == MAX_OFFERS {
            break;
        }
    }

    offers
}

/// Joins detected offers for display, `"N/A"` when there are none.
#[must_use]
pub fn join_offers(offers: &[String]) -> String {
    if offers.is_empty() {
        "N/A".to_owned()
    } else {
        offers.join(" | ")
    }
}

/// True for lines consisting only of digits and commas (a price fragment,
/// not an offer).
fn is_purely_numeric(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit() || c == ',')
}

/// True for lines like `"15%"` — a discount badge with no offer text.
fn is_bare_percentage(line: &str) -> bool {
    line.strip_suffix('%')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Uppercases every letter that follows a non-alphabetic character and
/// lowercases the rest: `"10% instant discount"` → `"10% Instant Discount"`.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
