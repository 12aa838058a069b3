//! Safety advice for trip assessments.

use strum_macros::{AsRefStr, Display, EnumString};

/// Produces safety tips for a trip.
pub trait TipGenerator: Send + Sync {
    /// Tips for a trip to `city` with the given overall rating and travel
    /// mode. The mode is free text and may be unrecognized.
    fn tips(&self, overall_rating: f64, city: &str, travel_mode: &str) -> Vec<String>;
}

/// Ways of getting around that have dedicated advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TravelMode {
    Walking,
    PublicTransport,
    #[strum(serialize = "taxi", serialize = "auto_rickshaw")]
    Taxi,
    SelfDrive,
}

impl TravelMode {
    /// Parses a travel mode, accepting spaces or hyphens as separators.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().replace([' ', '-'], "_").parse().ok()
    }
}

/// Overall rating below which travelers get high-caution advice.
pub const HIGH_CAUTION_BELOW: f64 = 2.5;

/// Overall rating below which travelers get moderate-caution advice.
pub const MODERATE_CAUTION_BELOW: f64 = 3.5;

/// Rule-based tips keyed on rating band and travel mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTipGenerator;

impl DefaultTipGenerator {
    fn rating_tips(overall_rating: f64) -> &'static [&'static str] {
        if overall_rating < HIGH_CAUTION_BELOW {
            &[
                "Exercise high caution: travel in groups where possible",
                "Avoid isolated areas, especially after dark",
                "Share your itinerary and live location with someone you trust",
            ]
        } else if overall_rating < MODERATE_CAUTION_BELOW {
            &[
                "Exercise moderate caution in crowded areas",
                "Prefer well-lit, busy streets at night",
            ]
        } else {
            &["These areas are generally safe; keep normal precautions"]
        }
    }

    const fn mode_tips(mode: TravelMode) -> &'static [&'static str] {
        match mode {
            TravelMode::Walking => &[
                "Stick to main roads and pedestrian crossings",
                "Keep your phone and wallet out of reach of passers-by",
            ],
            TravelMode::PublicTransport => &[
                "Keep bags in front of you on crowded buses and trains",
                "Use women-only coaches where available if travelling alone",
            ],
            TravelMode::Taxi => &[
                "Use app-based or prepaid taxis and auto-rickshaws",
                "Agree on the fare or insist on the meter before starting",
            ],
            TravelMode::SelfDrive => &[
                "Drive defensively and expect sudden lane changes",
                "Park in attended lots and keep valuables out of sight",
            ],
        }
    }
}

impl TipGenerator for DefaultTipGenerator {
    fn tips(&self, overall_rating: f64, city: &str, travel_mode: &str) -> Vec<String> {
        let mut tips: Vec<String> = Self::rating_tips(overall_rating)
            .iter()
            .map(ToString::to_string)
            .collect();

        match TravelMode::parse(travel_mode) {
            Some(mode) => tips.extend(Self::mode_tips(mode).iter().map(ToString::to_string)),
            None if !travel_mode.trim().is_empty() => {
                log::debug!("No travel-mode tips for '{travel_mode}'");
            }
            None => {}
        }

        tips.push(format!(
            "Save local emergency numbers before exploring {city} (112 for all emergencies in India)"
        ));
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_mode_accepts_loose_spelling() {
        assert_eq!(TravelMode::parse("Public Transport"), Some(TravelMode::PublicTransport));
        assert_eq!(TravelMode::parse("auto-rickshaw"), Some(TravelMode::Taxi));
        assert_eq!(TravelMode::parse("SELF_DRIVE"), Some(TravelMode::SelfDrive));
        assert_eq!(TravelMode::parse("hovercraft"), None);
    }

    #[test]
    fn low_rating_gets_high_caution() {
        let tips = DefaultTipGenerator.tips(2.0, "Delhi", "");
        assert!(tips[0].contains("high caution"));
        assert!(tips.last().unwrap().contains("Delhi"));
    }

    #[test]
    fn band_edges() {
        assert!(DefaultTipGenerator.tips(2.5, "Delhi", "")[0].contains("moderate"));
        assert!(DefaultTipGenerator.tips(3.5, "Delhi", "")[0].contains("generally safe"));
    }

    #[test]
    fn mode_tips_are_added() {
        let without = DefaultTipGenerator.tips(4.0, "Mumbai", "").len();
        let with = DefaultTipGenerator.tips(4.0, "Mumbai", "walking").len();
        assert_eq!(with, without + 2);
    }
}
