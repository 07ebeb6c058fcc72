//! Best-effort text cleanup for scraped recipe fields.
//!
//! None of these helpers fail: malformed input just produces less useful
//! output, and the caller decides what to drop.

use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)?|\[[^\]]*\]?").unwrap());

static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:[.,/]\d+)?|[½⅓⅔¼¾⅛])\s*(?:[-–]\s*)?)+").unwrap()
});

static LEADING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        // Indonesian
        r"sdm|sdt|sdk|siung|buah|butir|lembar|batang|ruas|gelas|ons|gr|bungkus|bks|",
        r"sachet|ikat|potong|genggam|",
        // English
        r"cups?|tbsps?|tsps?|tablespoons?|teaspoons?|grams?|g|kg|mg|ml|l|liters?|litres?|",
        r"oz|ounces?|lbs?|pounds?|pinch(?:es)?|cloves?|pieces?|pcs|slices?|cans?",
        r")\.?(?:\s+of)?\s+",
    ))
    .unwrap()
});

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d½⅓⅔¼¾⅛]+").unwrap());

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const STRAY: &[char] = &[',', '-', '–', '/', '.', ':', ';', '*', '•'];

const SECTION_LABELS: &[&str] = &[
    "ingredients",
    "ingredient",
    "bahan",
    "bahan-bahan",
    "bahan bahan",
    "bumbu",
    "bumbu halus",
    "bumbu iris",
    "pelengkap",
    "for the sauce",
    "for the garnish",
];

/// Minimum number of characters a cleaned ingredient must exceed.
const MIN_INGREDIENT_LEN: usize = 2;

/// Strips quantities, units, asides and digits from an ingredient line.
///
/// Returns `None` when nothing usable is left.
pub fn clean_ingredient(raw: &str) -> Option<String> {
    let without_asides = PARENTHETICAL.replace_all(raw, " ");
    let text = collapse_whitespace(&without_asides);

    let text = LEADING_QUANTITY.replace(&text, "");
    let text = LEADING_UNIT.replace(&text, "");
    let text = DIGITS.replace_all(&text, " ");

    let cleaned = collapse_whitespace(&text);
    let cleaned = cleaned.trim_matches(|c: char| c.is_whitespace() || STRAY.contains(&c));

    if cleaned.chars().count() > MIN_INGREDIENT_LEN {
        Some(cleaned.to_string())
    } else {
        None
    }
}

/// True for headings such as "Bahan-bahan:" that sit inside ingredient lists.
pub fn is_section_label(text: &str) -> bool {
    let text = text.trim();
    if text.ends_with(':') {
        return true;
    }
    let lowered = text.to_lowercase();
    SECTION_LABELS.contains(&lowered.as_str())
}

/// First run of ASCII digits in the text.
pub fn first_number(text: &str) -> Option<String> {
    NUMBER.find(text).map(|m| m.as_str().to_string())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Makes `value` absolute against `origin`.
///
/// Absolute URLs pass through unchanged, protocol-relative ones get the
/// origin's scheme, everything else is prefixed with the origin. Blank values
/// and inline `data:` URIs (lazy-load placeholders) resolve to `None`.
pub fn resolve_url(value: &str, origin: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with("data:") {
        return None;
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(value.to_string());
    }

    let origin = origin.trim_end_matches('/');
    if let Some(rest) = value.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        return Some(format!("{scheme}://{rest}"));
    }
    if value.starts_with('/') {
        Some(format!("{origin}{value}"))
    } else {
        Some(format!("{origin}/{value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_quantity_and_unit() {
        assert_eq!(clean_ingredient("2 cups flour"), Some("flour".to_string()));
        assert_eq!(
            clean_ingredient("1 1/2 tbsp soy sauce"),
            Some("soy sauce".to_string())
        );
        assert_eq!(
            clean_ingredient("3 siung bawang putih"),
            Some("bawang putih".to_string())
        );
        assert_eq!(
            clean_ingredient("½ cup of sugar"),
            Some("sugar".to_string())
        );
    }

    #[test]
    fn test_strips_parenthetical_asides() {
        assert_eq!(clean_ingredient("(optional) salt"), Some("salt".to_string()));
        assert_eq!(
            clean_ingredient("500 gr ayam (potong 8)"),
            Some("ayam".to_string())
        );
    }

    #[test]
    fn test_unit_words_inside_names_survive() {
        assert_eq!(clean_ingredient("2 garlic"), Some("garlic".to_string()));
        assert_eq!(clean_ingredient("1 lemon"), Some("lemon".to_string()));
        assert_eq!(
            clean_ingredient("1 tsp cloves"),
            Some("cloves".to_string())
        );
    }

    #[test]
    fn test_short_results_are_unusable() {
        assert_eq!(clean_ingredient("2 cups"), Some("cups".to_string()));
        assert_eq!(clean_ingredient("3 ab"), None);
        assert_eq!(clean_ingredient("(note)"), None);
        assert_eq!(clean_ingredient("   "), None);
        assert_eq!(clean_ingredient("12"), None);
    }

    #[test]
    fn test_malformed_input_does_not_panic() {
        assert_eq!(clean_ingredient("(unclosed salt"), None);
        assert_eq!(clean_ingredient("1/ 2 - - ,"), None);
        assert_eq!(clean_ingredient("gula merah 2"), Some("gula merah".to_string()));
    }

    #[test]
    fn test_section_labels() {
        assert!(is_section_label("Bahan-bahan"));
        assert!(is_section_label("Bumbu halus:"));
        assert!(is_section_label("INGREDIENTS"));
        assert!(!is_section_label("bawang merah"));
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("Serves 6 people"), Some("6".to_string()));
        assert_eq!(first_number("4-5 porsi"), Some("4".to_string()));
        assert_eq!(first_number("a few"), None);
    }

    #[test]
    fn test_resolve_url() {
        let origin = "https://cookpad.com";
        assert_eq!(
            resolve_url("/id/resep/123", origin),
            Some("https://cookpad.com/id/resep/123".to_string())
        );
        assert_eq!(
            resolve_url("https://img.cookpad.com/a.jpg", origin),
            Some("https://img.cookpad.com/a.jpg".to_string())
        );
        assert_eq!(
            resolve_url("//img.cookpad.com/a.jpg", origin),
            Some("https://img.cookpad.com/a.jpg".to_string())
        );
        assert_eq!(
            resolve_url("resep/1", "https://cookpad.com/"),
            Some("https://cookpad.com/resep/1".to_string())
        );
        assert_eq!(resolve_url("data:image/gif;base64,R0lGOD", origin), None);
        assert_eq!(resolve_url("  ", origin), None);
    }
}
