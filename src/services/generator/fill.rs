//! Random filler values: flight numbers, gates, clock times, prices.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

pub const CARRIER_CODES: &[&str] = &["AA", "DL", "UA", "BA"];

pub const AIRLINES: &[&str] = &[
    "American Airlines",
    "Delta",
    "United",
    "British Airways",
    "Air France",
    "Lufthansa",
    "Emirates",
    "Singapore Airlines",
];

pub const REFERENCE_KINDS: &[&str] = &[
    "booking reference",
    "confirmation number",
    "ticket number",
    "PNR",
];

const GATE_LETTERS: &[&str] = &["A", "B", "C", "D"];
const DEPARTURE_MINUTES: &[u32] = &[0, 15, 30, 45];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    OnTime,
    Delayed,
    Boarding,
    Departed,
    Arrived,
    Cancelled,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 6] = [
        FlightStatus::OnTime,
        FlightStatus::Delayed,
        FlightStatus::Boarding,
        FlightStatus::Departed,
        FlightStatus::Arrived,
        FlightStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Departed => "Departed",
            FlightStatus::Arrived => "Arrived",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

/// Wall-clock time rendered in 12-hour form, e.g. `6:45 PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        let period = if self.hour < 12 { "AM" } else { "PM" };
        write!(f, "{}:{:02} {}", display_hour, self.minute, period)
    }
}

pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub fn flight_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let carrier = pick(rng, CARRIER_CODES);
    format!("{}{}", carrier, rng.random_range(100..=9999))
}

pub fn gate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letter = pick(rng, GATE_LETTERS);
    format!("Gate {}{}", letter, rng.random_range(1..=50))
}

pub fn terminal<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("Terminal {}", rng.random_range(1..=5))
}

pub fn status<R: Rng + ?Sized>(rng: &mut R) -> FlightStatus {
    FlightStatus::ALL[rng.random_range(0..FlightStatus::ALL.len())]
}

/// Departures fall between 6 AM and 10 PM on the quarter hour.
pub fn departure_time<R: Rng + ?Sized>(rng: &mut R) -> ClockTime {
    let hour = rng.random_range(6..=22);
    let minute = DEPARTURE_MINUTES.choose(rng).copied().unwrap_or(0);
    ClockTime { hour, minute }
}

/// Arrivals land one to eight hours after departure, wrapping past midnight.
pub fn arrival_time<R: Rng + ?Sized>(rng: &mut R, departure: ClockTime) -> ClockTime {
    let hour = (departure.hour + rng.random_range(1..=8)) % 24;
    let minute = rng.random_range(0..=59);
    ClockTime { hour, minute }
}

pub fn price_for<R: Rng + ?Sized>(rng: &mut R, destination: &str) -> u32 {
    match destination {
        "New York" | "Los Angeles" => rng.random_range(200..=600),
        "London" | "Paris" => rng.random_range(400..=800),
        "Tokyo" | "Dubai" | "Singapore" => rng.random_range(600..=1200),
        _ => rng.random_range(300..=900),
    }
}

pub fn duration_for<R: Rng + ?Sized>(rng: &mut R, destination: &str) -> String {
    let known = match destination {
        "New York" => Some("5h 30m"),
        "Los Angeles" => Some("6h 15m"),
        "London" => Some("7h 45m"),
        "Paris" => Some("8h 20m"),
        "Tokyo" => Some("12h 30m"),
        "Dubai" => Some("14h 15m"),
        "Singapore" => Some("16h 45m"),
        _ => None,
    };

    match known {
        Some(duration) => duration.to_string(),
        None => format!("{}h {}m", rng.random_range(4..=16), rng.random_range(0..=59)),
    }
}
