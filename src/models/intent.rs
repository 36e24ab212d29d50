use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CheckStatus,
    BookFlight,
    CancelFlight,
    PetPolicy,
    BaggagePolicy,
    SeatSelection,
    FareInquiry,
    ChangeFlight,
    CheckIn,
    Meals,
    Wifi,
    General,
}

impl Intent {
    pub const ALL: [Intent; 12] = [
        Intent::CheckStatus,
        Intent::BookFlight,
        Intent::CancelFlight,
        Intent::PetPolicy,
        Intent::BaggagePolicy,
        Intent::SeatSelection,
        Intent::FareInquiry,
        Intent::ChangeFlight,
        Intent::CheckIn,
        Intent::Meals,
        Intent::Wifi,
        Intent::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::CheckStatus => "check_status",
            Intent::BookFlight => "book_flight",
            Intent::CancelFlight => "cancel_flight",
            Intent::PetPolicy => "pet_policy",
            Intent::BaggagePolicy => "baggage_policy",
            Intent::SeatSelection => "seat_selection",
            Intent::FareInquiry => "fare_inquiry",
            Intent::ChangeFlight => "change_flight",
            Intent::CheckIn => "check_in",
            Intent::Meals => "meals",
            Intent::Wifi => "wifi",
            Intent::General => "general",
        }
    }

    /// Unknown labels collapse to `General`.
    pub fn parse(s: &str) -> Self {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .unwrap_or(Intent::General)
    }

    /// Category name used by the response dataset, if the dataset covers this intent.
    pub fn dataset_category(&self) -> Option<&'static str> {
        match self {
            Intent::CheckStatus => Some("Flight Status"),
            Intent::BookFlight => Some("Booking"),
            Intent::PetPolicy => Some("Pet Travel"),
            Intent::BaggagePolicy => Some("Baggage"),
            Intent::SeatSelection => Some("Seat Availability"),
            Intent::FareInquiry => Some("Fare Check"),
            Intent::ChangeFlight => Some("Change Flight"),
            Intent::CheckIn | Intent::Meals | Intent::Wifi => Some("General"),
            Intent::CancelFlight | Intent::General => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_labels() {
        for intent in Intent::ALL {
            assert_eq!(Intent::parse(intent.as_str()), intent);
        }
    }

    #[test]
    fn test_parse_unknown_is_general() {
        assert_eq!(Intent::parse("lost_and_found"), Intent::General);
        assert_eq!(Intent::parse(""), Intent::General);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Intent::CheckIn).unwrap();
        assert_eq!(json, "\"check_in\"");
        let back: Intent = serde_json::from_str("\"fare_inquiry\"").unwrap();
        assert_eq!(back, Intent::FareInquiry);
    }
}
