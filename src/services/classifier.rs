//! Ordered keyword rules mapping free text to an [`Intent`].
//!
//! Rules are tested top to bottom against the lower-cased message and the
//! first hit wins, so a message mentioning both a pet and a price is a
//! pet-policy question. Nothing matching falls through to `General`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Intent;

static FLIGHT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2,3}\d{3,4}\b").expect("flight number pattern is valid")
});

pub enum Matcher {
    /// Any of the substrings occurs in the lower-cased text.
    Any(&'static [&'static str]),
    /// Any of `phrases` occurs and none of `unless` does.
    AnyUnless {
        phrases: &'static [&'static str],
        unless: &'static [&'static str],
    },
    /// Predicate over the original, case-preserved text.
    Raw(fn(&str) -> bool),
}

impl Matcher {
    fn matches(&self, lower: &str, raw: &str) -> bool {
        match self {
            Matcher::Any(words) => contains_any(lower, words),
            Matcher::AnyUnless { phrases, unless } => {
                contains_any(lower, phrases) && !contains_any(lower, unless)
            }
            Matcher::Raw(predicate) => predicate(raw),
        }
    }
}

pub struct Rule {
    pub intent: Intent,
    pub matchers: &'static [Matcher],
}

impl Rule {
    fn matches(&self, lower: &str, raw: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(lower, raw))
    }
}

pub static DEFAULT_RULES: &[Rule] = &[
    Rule {
        intent: Intent::PetPolicy,
        matchers: &[Matcher::Any(&[
            "pet", "cat", "dog", "animal", "pets", "bring my", "allow", "cabin",
        ])],
    },
    Rule {
        intent: Intent::BaggagePolicy,
        matchers: &[Matcher::Any(&[
            "baggage", "luggage", "bag", "damaged", "broken", "allowance",
        ])],
    },
    Rule {
        intent: Intent::SeatSelection,
        matchers: &[Matcher::Any(&[
            "seat", "window", "aisle", "choose", "select", "preference",
        ])],
    },
    Rule {
        intent: Intent::FareInquiry,
        matchers: &[Matcher::Any(&[
            "price", "cost", "fare", "expensive", "cheap", "discount", "offer", "how much",
            "ticket cost", "ticket price",
        ])],
    },
    Rule {
        intent: Intent::ChangeFlight,
        matchers: &[Matcher::Any(&[
            "change", "modify", "reschedule", "postpone", "different date",
        ])],
    },
    Rule {
        intent: Intent::CheckIn,
        matchers: &[Matcher::Any(&["check in", "checkin", "online check", "boarding pass"])],
    },
    Rule {
        intent: Intent::Meals,
        matchers: &[Matcher::Any(&[
            "meal", "food", "eat", "vegetarian", "dietary", "pre-order",
        ])],
    },
    Rule {
        intent: Intent::Wifi,
        matchers: &[Matcher::Any(&["wifi", "wi-fi", "internet", "online", "connect"])],
    },
    Rule {
        intent: Intent::CancelFlight,
        matchers: &[
            Matcher::Any(&["cancel", "cancellation", "refund"]),
            Matcher::Any(&[
                "don't need", "do not need", "no longer need", "not needed", "dont need",
            ]),
        ],
    },
    Rule {
        intent: Intent::BookFlight,
        matchers: &[
            Matcher::Any(&["book", "reserve", "buy", "purchase"]),
            Matcher::AnyUnless {
                phrases: &["get a flight", "need a flight"],
                unless: &["don't", "dont", "do not", "no longer", "not"],
            },
        ],
    },
    Rule {
        intent: Intent::CheckStatus,
        matchers: &[
            Matcher::Any(&[
                "when", "time", "schedule", "departure", "arrival", "status", "my flight",
                "flight status", "check",
            ]),
            Matcher::Any(&[
                "booking", "reference", "ticket", "confirmation", "pnr", "flight number",
            ]),
            Matcher::Raw(looks_like_flight_number),
        ],
    },
    Rule {
        intent: Intent::General,
        matchers: &[Matcher::Any(&["help", "assistance", "support"])],
    },
];

pub struct IntentClassifier {
    rules: &'static [Rule],
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES)
    }

    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower, text))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::General)
    }

    /// Intents reachable through the rule table, in rule order.
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        self.rules.iter().map(|rule| rule.intent)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn looks_like_flight_number(text: &str) -> bool {
    FLIGHT_NUMBER.is_match(text)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
