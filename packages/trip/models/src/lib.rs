#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trip, safety report, and safety assessment types.
//!
//! Unlike the read-only city datasets, these records are written by the
//! API: trips are created and replaced, safety reports and trip safety
//! assessments are appended. Each store is a JSON array of these records.

use chrono::{DateTime, Utc};
use city_explorer_city_models::KeyedList;
use serde::{Deserialize, Serialize};

/// Free-form JSON object used for the loosely structured parts of a trip
/// day (activities, lodging, legs).
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// A traveler-submitted safety rating, from 1 (unsafe) to 5 (very safe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SafetyRating(u8);

impl SafetyRating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Returns the numeric value of this rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Creates a rating from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidRatingError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(InvalidRatingError { value })
        }
    }
}

impl TryFrom<u8> for SafetyRating {
    type Error = InvalidRatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<SafetyRating> for u8 {
    fn from(rating: SafetyRating) -> Self {
        rating.0
    }
}

/// Error returned when attempting to create a [`SafetyRating`] from an
/// out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRatingError {
    /// The invalid rating value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidRatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid safety rating {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidRatingError {}

// ── Trips ───────────────────────────────────────────────

/// One day of a stored trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    /// 1-based day index.
    pub day_number: u32,
    /// Activities planned for the day.
    #[serde(default)]
    pub activities: Vec<JsonObject>,
    /// Where the traveler stays that night.
    #[serde(default)]
    pub accommodation: JsonObject,
    /// Transport legs for the day.
    #[serde(default)]
    pub transportation: Vec<JsonObject>,
    /// Estimated spend for the day.
    #[serde(default)]
    pub estimated_cost: f64,
}

/// A persisted trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique trip identifier.
    pub trip_id: String,
    /// Who owns the trip.
    pub user: String,
    /// City key or name the trip is for.
    pub city: String,
    /// Trip length in days.
    pub duration_days: u32,
    /// Free-text notes.
    #[serde(default)]
    pub trip_notes: String,
    /// Preferred way of getting around (e.g. `"public_transport"`).
    #[serde(default)]
    pub travel_mode: String,
    /// Day-by-day plan, in order.
    #[serde(default)]
    pub places_visited: Vec<TripDay>,
    /// Total estimated cost in INR.
    #[serde(default)]
    pub total_cost_estimate_inr: f64,
    /// When the record was created or last replaced.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a trip.
///
/// Any `created_at` in the body is ignored; the timestamp is always
/// stamped on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    /// Caller-supplied identifier; generated when absent.
    #[serde(default)]
    pub trip_id: Option<String>,
    /// Who owns the trip.
    pub user: String,
    /// City key or name the trip is for.
    pub city: String,
    /// Trip length in days.
    pub duration_days: u32,
    /// Free-text notes.
    #[serde(default)]
    pub trip_notes: String,
    /// Preferred way of getting around.
    #[serde(default)]
    pub travel_mode: String,
    /// Day-by-day plan, in order.
    #[serde(default)]
    pub places_visited: Vec<TripDay>,
    /// Total estimated cost in INR.
    #[serde(default)]
    pub total_cost_estimate_inr: f64,
}

impl NewTrip {
    /// Builds the stored record with the given identifier and timestamp.
    #[must_use]
    pub fn into_trip(self, trip_id: String, created_at: DateTime<Utc>) -> Trip {
        Trip {
            trip_id,
            user: self.user,
            city: self.city,
            duration_days: self.duration_days,
            trip_notes: self.trip_notes,
            travel_mode: self.travel_mode,
            places_visited: self.places_visited,
            total_cost_estimate_inr: self.total_cost_estimate_inr,
            created_at,
        }
    }
}

// ── Safety ──────────────────────────────────────────────

/// A persisted traveler safety report for one neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// Unique report identifier.
    pub report_id: String,
    /// City the report is about.
    pub city: String,
    /// Neighborhood the report is about.
    pub neighborhood: String,
    /// Reported rating (1-5).
    pub safety_rating: SafetyRating,
    /// Short incident classification (e.g. `"pickpocketing"`).
    #[serde(default)]
    pub incident_type: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Reporter handle.
    #[serde(default)]
    pub reported_by: String,
    /// When the incident or observation happened.
    pub occurred_at: DateTime<Utc>,
}

/// Request body for submitting a safety report.
///
/// The rating is kept as a raw number so that an out-of-range value can be
/// reported as a validation error rather than a body parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSafetyReport {
    /// City the report is about.
    pub city: String,
    /// Neighborhood the report is about.
    pub neighborhood: String,
    /// Reported rating, validated to 1-5.
    pub safety_rating: u8,
    /// Short incident classification.
    #[serde(default)]
    pub incident_type: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Reporter handle; `"anonymous"` when absent.
    #[serde(default)]
    pub reported_by: Option<String>,
    /// Defaults to the submission time.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Request body for a trip safety assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyTripRequest {
    /// Trip to attach the assessment to; generated when absent.
    #[serde(default)]
    pub trip_id: Option<String>,
    /// City being visited.
    pub city: String,
    /// Neighborhoods on the route, in visiting order.
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    /// Preferred way of getting around; drives the transport tips.
    #[serde(default)]
    pub travel_mode: String,
}

/// A persisted safety assessment snapshot for a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyTripAssessment {
    /// Trip identifier (not checked against the trip store).
    pub trip_id: String,
    /// City being visited.
    pub city: String,
    /// Neighborhoods as requested.
    pub neighborhoods: Vec<String>,
    /// Travel mode as requested.
    #[serde(default)]
    pub travel_mode: String,
    /// Mean rating over every stop in `neighborhoods`, one decimal place.
    pub overall_safety_rating: f64,
    /// Rating per distinct neighborhood name, in first-seen order.
    pub neighborhood_ratings: KeyedList<f64>,
    /// Advice for this trip.
    pub safety_tips: Vec<String>,
    /// When the assessment was made.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_from_value_bounds() {
        for v in 1..=5u8 {
            assert_eq!(SafetyRating::from_value(v).unwrap().value(), v);
        }
        assert!(SafetyRating::from_value(0).is_err());
        assert!(SafetyRating::from_value(6).is_err());
    }

    #[test]
    fn rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<SafetyRating>("4").is_ok());
        assert!(serde_json::from_str::<SafetyRating>("9").is_err());
        assert_eq!(
            serde_json::to_string(&SafetyRating::from_value(2).unwrap()).unwrap(),
            "2"
        );
    }

    #[test]
    fn new_trip_ignores_supplied_created_at() {
        let new_trip: NewTrip = serde_json::from_str(
            r#"{"user":"asha","city":"delhi","duration_days":3,
                "created_at":"2001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let now = Utc::now();
        let trip = new_trip.into_trip("t-1".to_string(), now);
        assert_eq!(trip.created_at, now);
        assert_eq!(trip.trip_id, "t-1");
        assert!(trip.places_visited.is_empty());
    }
}
