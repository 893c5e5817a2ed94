//! Title-vs-query relevance filtering.
//!
//! Rules are evaluated in a fixed order, first decision wins:
//!
//! 1. reject degenerate titles,
//! 2. reject accessories when the query asks for a main device,
//! 3. reject model-number mismatches within a recognized product line,
//! 4. accept on significant-token overlap.
//!
//! Strict AND-matching of every token starves recall; bag-of-words alone
//! floods device searches with cases and chargers. The ordered cascade keeps
//! both failure modes out.

use regex::Regex;

/// Query terms indicating the user wants a device, not an accessory.
const MAIN_DEVICE_TERMS: [&str; 10] = [
    "iphone", "phone", "mobile", "samsung", "pixel", "oneplus", "laptop", "macbook", "tablet",
    "ipad",
];

/// Title terms that mark a listing as an accessory.
const ACCESSORY_TERMS: [&str; 35] = [
    "cover",
    "case",
    "protector",
    "screen guard",
    "tempered glass",
    "pouch",
    "skin",
    "charger",
    "cable",
    "adapter",
    "earphone",
    "headphone",
    "power bank",
    "stand",
    "holder",
    "mount",
    "strap",
    "band",
    "connector",
    "splitter",
    "jack",
    "aux",
    "usb",
    "type c",
    "lightning",
    "wire",
    "cord",
    "bumper",
    "magsafe battery",
    "kickstand",
    "rugged case",
    "techwoven",
    "clear case",
    "back cover",
    "flip cover",
];

/// Product lines with numbered models. When a query names `<line> <number>`,
/// titles in the same line must carry the same number.
const PRODUCT_LINES: [&str; 5] = ["iphone", "galaxy s", "pixel", "oneplus", "redmi note"];

/// Tokens carrying no signal for overlap matching.
const STOP_WORDS: [&str; 12] = [
    "for", "the", "a", "an", "in", "on", "at", "to", "and", "or", "with", "only",
];

/// Decides whether a listing title satisfies the search query.
///
/// Pure function of its inputs; calling it twice yields identical results.
#[must_use]
pub fn is_relevant(title: &str, query: &str) -> bool {
    if title.len() < 3 {
        return false;
    }

    let title_lower = title.to_lowercase();
    let query_lower = query.to_lowercase();

    // Accessories never satisfy a device search, however well the tokens
    // overlap ("iPhone 15 case" matches "iphone 15" perfectly).
    if MAIN_DEVICE_TERMS.iter().any(|t| query_lower.contains(t))
        && ACCESSORY_TERMS.iter().any(|t| title_lower.contains(t))
    {
        return false;
    }

    // Model-number disambiguation: "iphone 15" must not surface "iPhone 14".
    for line in PRODUCT_LINES {
        let Some(query_model) = extract_model_number(&query_lower, line) else {
            continue;
        };
        match extract_model_number(&title_lower, line) {
            Some(title_model) if title_model == query_model => {}
            // Same line, different number — a different product.
            Some(_) => return false,
            // The query pins a model; a title with none is too ambiguous.
            None => return false,
        }
    }

    let query_tokens: Vec<&str> = query_lower
        .split_whitespace()
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .collect();

    if query_tokens.is_empty() {
        return false;
    }

    let matches = query_tokens
        .iter()
        .filter(|w| title_lower.contains(**w))
        .count();

    // At least half the significant tokens, ties rounding down:
    // matches >= tokens/2 without leaving integer arithmetic.
    matches * 2 >= query_tokens.len()
}

/// Extracts the model number following `line` in `text`, e.g.
/// `("apple iphone 15 pro", "iphone")` → `Some("15")`. Input must be
/// pre-lowercased.
fn extract_model_number(text: &str, line: &str) -> Option<String> {
    let pattern = format!(r"{}\s*(\d+)", regex::escape(line));
    let re = Regex::new(&pattern).expect("valid regex");
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned())
}
