//! Keyword-taxonomy product categorization.
//!
//! A static, ordered rule table mapping title keywords to one category.
//! First matching rule wins; order matters where keyword sets collide
//! ("laptop" must hit Laptops before "top" can hit Apparel). The table is
//! append-only data, not control flow.

/// Category assigned when no rule matches.
pub const DEFAULT_CATEGORY: &str = "General Products";

/// Ordered `(category, keywords)` rules. Keywords match as substrings of
/// the lowercased title.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "Mobile Phones",
        &["phone", "mobile", "iphone", "samsung", "oneplus", "pixel"],
    ),
    ("Laptops", &["laptop", "notebook", "macbook", "chromebook"]),
    ("Television", &["tv", "television", "smart tv", "led tv"]),
    (
        "Audio Accessories",
        &["headphone", "earphone", "earbud", "airpods"],
    ),
    (
        "Mobile Accessories",
        &["charger", "cable", "adapter", "power bank"],
    ),
    ("Wearables", &["watch", "smartwatch", "fitness band"]),
    ("Cameras", &["camera", "dslr", "gopro"]),
    (
        "Apparel",
        &[
            "shirt",
            "t-shirt",
            "tshirt",
            "polo",
            "top",
            "blouse",
            "hoodie",
            "sweatshirt",
        ],
    ),
    ("Bottoms", &["jeans", "trouser", "pant", "cargo", "chino"]),
    (
        "Ethnic & Dresses",
        &["dress", "gown", "frock", "kurti", "saree", "lehenga"],
    ),
    (
        "Footwear",
        &["shoe", "sneaker", "boot", "sandal", "slipper", "footwear"],
    ),
    ("Outerwear", &["jacket", "coat", "sweater"]),
    (
        "Fashion Accessories",
        &["belt", "wallet", "bag", "purse", "handbag"],
    ),
    ("Staples", &["rice", "wheat", "flour", "atta", "dal", "pulses"]),
    ("Cooking Oils", &["oil", "ghee", "butter", "cooking oil"]),
    (
        "Beverages & Condiments",
        &["sugar", "salt", "spice", "masala", "tea", "coffee"],
    ),
    (
        "Snacks & Biscuits",
        &["biscuit", "cookie", "chips", "namkeen", "snack"],
    ),
    (
        "Dairy Products",
        &["milk", "curd", "yogurt", "cheese", "paneer"],
    ),
    (
        "Fresh Produce",
        &["fruit", "vegetable", "apple", "banana", "tomato", "potato"],
    ),
    (
        "Kitchen Appliances",
        &["mixer", "grinder", "blender", "juicer", "cooker"],
    ),
    (
        "Bedroom",
        &["bed", "mattress", "pillow", "bedsheet", "blanket"],
    ),
    ("Furniture", &["sofa", "chair", "table", "furniture"]),
    ("Home Decor", &["curtain", "carpet", "rug", "cushion"]),
    (
        "Personal Care",
        &["shampoo", "conditioner", "hair oil", "soap", "facewash"],
    ),
    (
        "Fragrances",
        &["perfume", "deodorant", "fragrance", "cologne"],
    ),
    (
        "Beauty & Cosmetics",
        &["makeup", "lipstick", "kajal", "mascara", "foundation"],
    ),
    ("Books", &["book", "novel", "textbook", "guide"]),
    (
        "Sports & Fitness",
        &["gym", "dumbbell", "yoga", "fitness", "treadmill", "cycle"],
    ),
];

/// Maps a listing title to exactly one taxonomy category.
///
/// Pure function; the same title always yields the same category.
#[must_use]
pub fn categorize(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_mobile_phones() {
        assert_eq!(categorize("Samsung Galaxy S23 Mobile Phone"), "Mobile Phones");
        assert_eq!(categorize("Apple iPhone 15"), "Mobile Phones");
    }

    #[test]
    fn categorizes_ethnic_wear() {
        assert_eq!(categorize("Red Cotton Kurti"), "Ethnic & Dresses");
    }

    #[test]
    fn unmatched_title_gets_default() {
        assert_eq!(categorize("Unbranded Widget"), DEFAULT_CATEGORY);
    }

    #[test]
    fn laptop_wins_over_apparel_top() {
        // "laptop" contains "top"; rule order keeps it out of Apparel.
        assert_eq!(categorize("Gaming Laptop 16GB"), "Laptops");
    }

    #[test]
    fn first_matching_rule_wins() {
        // "phone" appears before "headphone" in the table, so a phone title
        // with both never lands in Audio Accessories.
        assert_eq!(
            categorize("Phone with free headphone combo"),
            "Mobile Phones"
        );
    }

    #[test]
    fn categorize_is_idempotent() {
        for title in ["Red Cotton Kurti", "Unbranded Widget", "LED TV 43 inch"] {
            assert_eq!(categorize(title), categorize(title));
        }
    }

    #[test]
    fn categorizes_groceries() {
        assert_eq!(categorize("Basmati Rice 5kg"), "Staples");
        assert_eq!(categorize("Amul Butter 500g"), "Cooking Oils");
        assert_eq!(categorize("Fresh Tomato 1kg"), "Fresh Produce");
    }
}
