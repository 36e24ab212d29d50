//! Responses built purely from string templates and random fill values.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::fill::{self, FlightStatus};
use crate::services::extract::{
    extract_booking_reference, extract_destination, is_flight_number, KNOWN_CITIES,
};

pub const DECLINE_PHRASES: &[&str] = &[
    "dont need",
    "don't need",
    "do not need",
    "no longer need",
    "not needed",
    "dont want",
];

pub const DECLINE_RESPONSE: &str = "I understand you don't need a flight at this time. No problem at all! If you change your mind in the future, I'll be here to help you with bookings, flight status, or any other travel needs. Is there anything else I can assist you with today?";

const GREETINGS: &[&str] = &[
    "Hello! Welcome to our airline service.",
    "Hi there! How can I assist you today?",
    "Good day! I'm here to help with your travel needs.",
];

const SERVICES: &[&str] = &[
    "I can help you with flight bookings, cancellations, and status updates.",
    "I'm here to assist with your travel needs - bookings, changes, or inquiries.",
    "I can help you book flights, check status, or handle cancellations.",
];

const FAREWELLS: &[&str] = &[
    "Thank you for choosing our airline! Safe travels!",
    "You're welcome! Have a wonderful trip!",
    "Thank you! We look forward to serving you again.",
];

const CLARIFICATIONS: &[&str] = &[
    "I'm not sure I understand. Could you please clarify what you need help with?",
    "I'd be happy to help, but could you provide more details about your request?",
    "Could you please rephrase your question? I'm here to assist with flight-related inquiries.",
];

pub fn is_decline(lower: &str) -> bool {
    DECLINE_PHRASES.iter().any(|p| lower.contains(p))
}

/// The flight number to talk about: the caller's own when it has the right
/// shape, otherwise a drawn one.
pub fn flight_number_for<R: Rng + ?Sized>(rng: &mut R, reference: &str) -> String {
    if is_flight_number(reference) {
        reference.to_string()
    } else {
        fill::flight_number(rng)
    }
}

pub fn flight_status<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    let Some(reference) = extract_booking_reference(text) else {
        let kind = fill::pick(rng, fill::REFERENCE_KINDS);
        return format!(
            "I'd be happy to help you check your flight status. To look up your flight details, I'll need your {kind}. Could you please provide that information?"
        );
    };

    let flight = flight_number_for(rng, &reference);
    status_update(rng, &flight)
}

/// Status line for a known flight, worded per randomly drawn status.
pub fn status_update<R: Rng + ?Sized>(rng: &mut R, flight: &str) -> String {
    let departure = fill::departure_time(rng);
    let arrival = fill::arrival_time(rng, departure);
    let gate = fill::gate(rng);
    let terminal = fill::terminal(rng);

    match fill::status(rng) {
        FlightStatus::OnTime => format!(
            "Great news! Your flight {flight} is on time and scheduled to depart at {departure} from {gate} in {terminal}. Please arrive at the airport 2 hours before departure."
        ),
        FlightStatus::Delayed => {
            let delay: u32 = rng.random_range(15..=120);
            format!(
                "I'm sorry to inform you that flight {flight} has been delayed by {delay} minutes. The new departure time is {departure}. We apologize for any inconvenience."
            )
        }
        FlightStatus::Boarding => format!(
            "Flight {flight} is now boarding! Please proceed to {gate} in {terminal}. The flight will depart at {departure}."
        ),
        other => format!(
            "Your flight {flight} status: {}. Departure: {departure}, Arrival: {arrival} from {gate} in {terminal}.",
            other.label()
        ),
    }
}

pub fn booking<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    match extract_destination(text) {
        Some(destination) => {
            let airline = fill::pick(rng, fill::AIRLINES);
            let departure = fill::departure_time(rng);
            let price = fill::price_for(rng, destination);
            let duration = fill::duration_for(rng, destination);
            format!(
                "Excellent choice! I found several options for {destination}. {airline} has a flight departing at {departure} for ${price}. The flight duration is approximately {duration}. Would you like me to proceed with this booking?"
            )
        }
        None => {
            let popular: Vec<&str> = KNOWN_CITIES.choose_multiple(rng, 3).copied().collect();
            format!(
                "I'd be delighted to help you book a flight! Could you please tell me your destination? Popular destinations include {}. Also, what's your preferred travel date?",
                popular.join(", ")
            )
        }
    }
}

pub fn cancellation<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    if is_decline(&text.to_lowercase()) {
        return DECLINE_RESPONSE.to_string();
    }

    if extract_booking_reference(text).is_none() {
        let kind = fill::pick(rng, &fill::REFERENCE_KINDS[..3]);
        return format!(
            "I understand you'd like to cancel your flight. To process your cancellation, I'll need your {kind}. Could you please provide that information?"
        );
    }

    let refund: u32 = rng.random_range(200..=800);
    let processing_days: u32 = rng.random_range(3..=10);
    let fee: u32 = rng.random_range(0..=100);

    if fee == 0 {
        format!(
            "I've successfully processed your flight cancellation. You'll receive a full refund of ${refund} within {processing_days} business days. No cancellation fees apply. Is there anything else I can assist you with?"
        )
    } else {
        format!(
            "Your flight has been cancelled. The refund amount is ${refund} (after a ${fee} cancellation fee). You'll receive the refund within {processing_days} business days."
        )
    }
}

/// Greeting, help, farewell, or a clarification prompt when nothing fits.
/// Single keywords match whole words only, so "this" is not a greeting;
/// multi-word phrases such as "good morning" match as substrings.
pub fn general<R: Rng + ?Sized>(rng: &mut R, text: &str) -> String {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has_word = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));

    let pool = if has_word(&["hello", "hi", "hey"])
        || lower.contains("good morning")
        || lower.contains("good afternoon")
    {
        GREETINGS
    } else if has_word(&["help", "assistance", "support"]) {
        SERVICES
    } else if has_word(&["bye", "goodbye", "thanks"]) || lower.contains("thank you") {
        FAREWELLS
    } else {
        CLARIFICATIONS
    };

    fill::pick(rng, pool).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn test_status_without_reference_asks_for_one() {
        let reply = flight_status(&mut rng(), "what's my flight status?");
        assert!(reply.contains("check your flight status"));
        assert!(fill::REFERENCE_KINDS.iter().any(|k| reply.contains(k)));
    }

    #[test]
    fn test_status_keeps_callers_flight_number() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = flight_status(&mut rng, "flight UA1033 status");
            assert!(reply.contains("UA1033"), "{reply}");
        }
    }

    #[test]
    fn test_booking_with_destination() {
        let reply = booking(&mut rng(), "I want to book a flight to Paris");
        assert!(reply.contains("Paris"));
        assert!(reply.contains("8h 20m"));
        assert!(reply.contains('$'));
    }

    #[test]
    fn test_booking_without_destination_prompts() {
        let reply = booking(&mut rng(), "I want to book a flight");
        assert!(reply.contains("tell me your destination"));
        let listed = KNOWN_CITIES.iter().filter(|c| reply.contains(*c)).count();
        assert_eq!(listed, 3);
    }

    #[test]
    fn test_cancellation_with_reference_mentions_refund() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = cancellation(&mut rng, "I want to cancel my flight, booking ref DEF456");
            assert!(reply.contains("refund"), "{reply}");
            assert!(reply.contains("business days"), "{reply}");
            assert!(reply.contains('$'));
        }
    }

    #[test]
    fn test_cancellation_paths() {
        assert_eq!(
            cancellation(&mut rng(), "I dont need a flight anymore"),
            DECLINE_RESPONSE
        );
        let reply = cancellation(&mut rng(), "please cancel");
        assert!(reply.contains("To process your cancellation"));
    }

    #[test]
    fn test_general_pools() {
        assert!(GREETINGS.contains(&general(&mut rng(), "Hello").as_str()));
        assert!(GREETINGS.contains(&general(&mut rng(), "good morning!").as_str()));
        assert!(SERVICES.contains(&general(&mut rng(), "I need help").as_str()));
        assert!(FAREWELLS.contains(&general(&mut rng(), "thank you, bye").as_str()));
        assert!(CLARIFICATIONS.contains(&general(&mut rng(), "this is odd").as_str()));
    }

    #[test]
    fn test_general_ignores_keywords_inside_words() {
        for text in ["this", "shipping costs", "they said", "helpful?", "byeline"] {
            let reply = general(&mut rng(), text);
            assert!(CLARIFICATIONS.contains(&reply.as_str()), "{text}: {reply}");
        }
        let reply = general(&mut rng(), "well, good afternoon");
        assert!(GREETINGS.contains(&reply.as_str()));
    }

    #[test]
    fn test_status_update_wording() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = status_update(&mut rng, "DL2040");
            assert!(reply.contains("DL2040"), "{reply}");
            assert!(!reply.contains("is currently"), "{reply}");
            if let Some(rest) = reply.split("delayed by ").nth(1) {
                let minutes: u32 = rest.split(' ').next().unwrap().parse().unwrap();
                assert!((15..=120).contains(&minutes), "{reply}");
            }
        }
    }
}
