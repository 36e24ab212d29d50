use std::sync::LazyLock;

use regex::Regex;

/// Cities recognised as destinations, checked in this order.
pub const KNOWN_CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "London",
    "Paris",
    "Tokyo",
    "Dubai",
    "Singapore",
    "Hong Kong",
];

// Most specific first; a bare flight-number-shaped token is the last resort.
static REFERENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)booking\s+(?:reference|ref|number|id)\s*:?\s*([A-Z0-9]+)",
        r"(?i)confirmation\s+(?:number|id)\s*:?\s*([A-Z0-9]+)",
        r"(?i)ticket\s+(?:number|id)\s*:?\s*([A-Z0-9]+)",
        r"(?i)pnr\s*:?\s*([A-Z0-9]+)",
        r"(?i)flight\s+(?:number|no)\s*:?\s*([A-Z0-9]+)",
        r"(?i)\b([A-Z]{2,3}\d{3,4})\b",
        r"(?i)\b([A-Z]{1,3}\d{3,6})\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("reference pattern is valid"))
    .collect()
});

static FLIGHT_NUMBER_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2,3}\d{3,4}$").expect("flight number shape is valid")
});

/// Pulls a booking reference or flight number out of free text.
pub fn extract_booking_reference(text: &str) -> Option<String> {
    REFERENCE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn extract_destination(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    KNOWN_CITIES
        .iter()
        .copied()
        .find(|city| lower.contains(&city.to_lowercase()))
}

/// True for upper-case carrier-plus-digits tokens such as `UA1033`.
pub fn is_flight_number(reference: &str) -> bool {
    FLIGHT_NUMBER_SHAPE.is_match(reference)
}
