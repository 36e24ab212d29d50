//! Response generation: dataset entries enriched with live-looking details,
//! backed by template synthesis.

pub mod fill;
pub mod templates;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::config::{FallbackOrder, GeneratorConfig};
use crate::errors::AppError;
use crate::models::Intent;
use crate::services::dataset::ResponseDataset;
use crate::services::extract::{extract_booking_reference, extract_destination};

const CHANGE_FLIGHT_CATEGORY: &str = "Change Flight";

/// Seeded when a seed is configured, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub struct ResponseGenerator {
    dataset: ResponseDataset,
    fallback_order: FallbackOrder,
}

impl ResponseGenerator {
    pub fn new(dataset: ResponseDataset, fallback_order: FallbackOrder) -> Self {
        Self {
            dataset,
            fallback_order,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self, AppError> {
        let dataset = ResponseDataset::load(&config.dataset_path)?;
        Ok(Self::new(dataset, config.fallback_order))
    }

    pub fn dataset(&self) -> &ResponseDataset {
        &self.dataset
    }

    /// Always returns a non-empty reply.
    pub fn generate<R: Rng + ?Sized>(&self, intent: Intent, text: &str, rng: &mut R) -> String {
        let reply = match self.fallback_order {
            FallbackOrder::DatasetFirst => self
                .dataset_reply(intent, text, rng)
                .or_else(|| synthesize(intent, text, rng)),
            FallbackOrder::SyntheticFirst => synthesize(intent, text, rng)
                .or_else(|| self.dataset_reply(intent, text, rng)),
        };

        match reply {
            Some(reply) if !reply.trim().is_empty() => reply,
            _ => templates::general(rng, text),
        }
    }

    fn dataset_reply<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        text: &str,
        rng: &mut R,
    ) -> Option<String> {
        let entry = *self.dataset.candidates(intent).choose(rng)?;
        let lower = text.to_lowercase();

        if entry.intent == CHANGE_FLIGHT_CATEGORY && templates::is_decline(&lower) {
            return Some(templates::DECLINE_RESPONSE.to_string());
        }

        if let Some(reference) = extract_booking_reference(text) {
            if lower.contains("flight") && (lower.contains("status") || lower.contains("on time")) {
                let flight = templates::flight_number_for(rng, &reference);
                return Some(templates::status_update(rng, &flight));
            }
        }

        if let Some(destination) = extract_destination(text) {
            if lower.contains("book") {
                let airline = fill::pick(rng, fill::AIRLINES);
                let departure = fill::departure_time(rng);
                let price = fill::price_for(rng, destination);
                return Some(format!(
                    "I found a {airline} flight to {destination} departing at {departure} for ${price}. Shall I reserve a seat for you?"
                ));
            }
        }

        let response = &entry.response_text;
        let talks_about_status = {
            let lower_response = response.to_lowercase();
            lower_response.contains("check") && lower_response.contains("status")
        };
        if talks_about_status && response.contains("your flight") {
            let flight = fill::flight_number(rng);
            return Some(response.replace("your flight", &format!("flight {flight}")));
        }

        Some(response.clone())
    }
}

fn synthesize<R: Rng + ?Sized>(intent: Intent, text: &str, rng: &mut R) -> Option<String> {
    match intent {
        Intent::CheckStatus => Some(templates::flight_status(rng, text)),
        Intent::BookFlight => Some(templates::booking(rng, text)),
        Intent::CancelFlight => Some(templates::cancellation(rng, text)),
        Intent::General => Some(templates::general(rng, text)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseTemplateEntry;

    fn entry(category: &str, policy: &str, text: &str) -> ResponseTemplateEntry {
        ResponseTemplateEntry {
            intent: category.to_string(),
            tone: "Formal".to_string(),
            policy_reference: policy.to_string(),
            response_text: text.to_string(),
        }
    }

    fn generator(order: FallbackOrder) -> ResponseGenerator {
        let dataset = ResponseDataset::from_entries(vec![
            entry("Pet Travel", "Pet Policy", "Small pets may travel in the cabin."),
            entry(
                "Change Flight",
                "Change Policy",
                "Changes are allowed up to 2 hours before departure.",
            ),
            entry(
                "Flight Status",
                "Operations",
                "I can check the status of your flight right away.",
            ),
            entry("Booking", "Reservations", "Where would you like to go?"),
        ]);
        ResponseGenerator::new(dataset, order)
    }

    #[test]
    fn test_never_empty_for_any_intent() {
        let empty = ResponseGenerator::new(ResponseDataset::default(), FallbackOrder::DatasetFirst);
        let full = generator(FallbackOrder::SyntheticFirst);
        let mut rng = StdRng::seed_from_u64(3);
        for intent in Intent::ALL {
            for text in ["", "hello", "what about my luggage?"] {
                assert!(!empty.generate(intent, text, &mut rng).trim().is_empty());
                assert!(!full.generate(intent, text, &mut rng).trim().is_empty());
            }
        }
    }

    #[test]
    fn test_dataset_first_uses_entries() {
        let generator = generator(FallbackOrder::DatasetFirst);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            generator.generate(Intent::PetPolicy, "can I bring my cat?", &mut rng),
            "Small pets may travel in the cabin."
        );
    }

    #[test]
    fn test_synthetic_first_prefers_templates() {
        let generator = generator(FallbackOrder::SyntheticFirst);
        let mut rng = StdRng::seed_from_u64(9);
        let reply = generator.generate(Intent::BookFlight, "book a flight", &mut rng);
        assert!(reply.contains("tell me your destination"));

        // No synthetic builder for policy intents: dataset answers.
        let reply = generator.generate(Intent::PetPolicy, "pets?", &mut rng);
        assert_eq!(reply, "Small pets may travel in the cabin.");
    }

    #[test]
    fn test_change_flight_decline() {
        let generator = generator(FallbackOrder::DatasetFirst);
        let mut rng = StdRng::seed_from_u64(1);
        let reply = generator.generate(
            Intent::ChangeFlight,
            "I no longer need to change anything",
            &mut rng,
        );
        assert_eq!(reply, templates::DECLINE_RESPONSE);
    }

    #[test]
    fn test_dataset_status_enrichment() {
        let generator = generator(FallbackOrder::DatasetFirst);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let text = "is flight UA1033 on time?";
            let reply = generator.generate(Intent::CheckStatus, text, &mut rng);
            assert!(reply.contains("flight UA1033") || reply.contains("Flight UA1033"), "{reply}");
            assert!(!reply.contains("is currently"), "{reply}");
            if reply.contains("delayed by") {
                let minutes: u32 = reply
                    .split("delayed by ")
                    .nth(1)
                    .and_then(|rest| rest.split(' ').next())
                    .and_then(|n| n.parse().ok())
                    .unwrap();
                assert!((15..=120).contains(&minutes), "{reply}");
            }
        }

        let reply = generator.generate(Intent::CheckStatus, "check my flight status", &mut rng);
        assert!(!reply.contains("your flight"));
        assert!(reply.contains("status of flight "));
    }

    #[test]
    fn test_dataset_booking_offer() {
        let generator = generator(FallbackOrder::DatasetFirst);
        let mut rng = StdRng::seed_from_u64(5);
        let reply = generator.generate(Intent::BookFlight, "book me to Tokyo", &mut rng);
        assert!(reply.contains("to Tokyo departing at"));
    }

    #[test]
    fn test_same_seed_same_reply() {
        let generator = generator(FallbackOrder::DatasetFirst);
        let text = "I want to cancel my flight, booking ref DEF456";
        let first = generator.generate(Intent::CancelFlight, text, &mut seeded_rng(Some(77)));
        let second = generator.generate(Intent::CancelFlight, text, &mut seeded_rng(Some(77)));
        assert_eq!(first, second);
    }
}
