#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Traveler safety reports and trip safety assessments.
//!
//! Reports are appended to the safety-report store. A trip assessment
//! averages the reports for each neighborhood on the route, asks a
//! [`TipGenerator`] for advice, and appends the resulting snapshot to the
//! safety-trip store.

pub mod tips;

use chrono::Utc;
use city_explorer_city_models::{KeyedList, names_match, round_to};
use city_explorer_store::{Repository, StoreError, StoreKey};
use city_explorer_trip_models::{
    InvalidRatingError, NewSafetyReport, SafetyRating, SafetyReport, SafetyTripAssessment,
    SafetyTripRequest,
};
use thiserror::Error;

pub use tips::{DefaultTipGenerator, TipGenerator, TravelMode};

/// Rating used for a neighborhood with no reports, and for an assessment
/// with no neighborhoods.
pub const DEFAULT_RATING: f64 = 3.0;

/// Reporter recorded when a report is submitted without one.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

/// Errors that can occur while recording or aggregating safety data.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// The submitted rating is outside 1-5.
    #[error(transparent)]
    InvalidRating(#[from] InvalidRatingError),

    /// A required field is empty.
    #[error("Field '{field}' must not be empty")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn require(field: &'static str, value: &str) -> Result<(), SafetyError> {
    if value.trim().is_empty() {
        Err(SafetyError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Validates and appends a safety report.
///
/// # Errors
///
/// Returns [`SafetyError::InvalidRating`] for a rating outside 1-5,
/// [`SafetyError::MissingField`] for an empty city or neighborhood, or
/// [`SafetyError::Store`] if the store cannot be updated.
pub fn create_report(repo: &Repository, new: NewSafetyReport) -> Result<SafetyReport, SafetyError> {
    let safety_rating = SafetyRating::from_value(new.safety_rating)?;
    require("city", &new.city)?;
    require("neighborhood", &new.neighborhood)?;

    let report = SafetyReport {
        report_id: uuid::Uuid::new_v4().to_string(),
        city: new.city,
        neighborhood: new.neighborhood,
        safety_rating,
        incident_type: new.incident_type,
        description: new.description,
        reported_by: new
            .reported_by
            .filter(|who| !who.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
        occurred_at: new.occurred_at.unwrap_or_else(Utc::now),
    };

    repo.update(StoreKey::SafetyReports, |reports: &mut Vec<SafetyReport>| {
        reports.push(report.clone());
        Ok::<_, SafetyError>(())
    })?;

    log::info!(
        "Recorded safety report {} for {}/{} (rating {})",
        report.report_id,
        report.city,
        report.neighborhood,
        report.safety_rating.value()
    );
    Ok(report)
}

/// Mean rating of the reports for one neighborhood, rounded to one decimal
/// place. City and neighborhood match ignoring case; with no matching
/// reports the result is [`DEFAULT_RATING`].
#[must_use]
pub fn neighborhood_rating(reports: &[SafetyReport], city: &str, neighborhood: &str) -> f64 {
    let (sum, count) = reports
        .iter()
        .filter(|r| names_match(&r.city, city) && names_match(&r.neighborhood, neighborhood))
        .fold((0.0, 0u32), |(sum, count), r| {
            (sum + f64::from(r.safety_rating.value()), count + 1)
        });

    if count == 0 {
        DEFAULT_RATING
    } else {
        round_to(sum / f64::from(count), 1)
    }
}

/// Mean of already-rounded neighborhood ratings, rounded to one decimal
/// place, or [`DEFAULT_RATING`] for an empty route. A neighborhood listed
/// twice on the route counts twice.
#[must_use]
pub fn overall_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return DEFAULT_RATING;
    }
    let sum: f64 = ratings.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let count = ratings.len() as f64;
    round_to(sum / count, 1)
}

/// Rates every neighborhood on a trip, generates tips, and appends the
/// assessment to the safety-trip store.
///
/// # Errors
///
/// Returns [`SafetyError::MissingField`] for an empty city, or
/// [`SafetyError::Store`] if a store cannot be read or written.
pub fn assess_trip(
    repo: &Repository,
    tips: &dyn TipGenerator,
    request: SafetyTripRequest,
) -> Result<SafetyTripAssessment, SafetyError> {
    require("city", &request.city)?;

    let reports: Vec<SafetyReport> = repo.load_or_default(StoreKey::SafetyReports)?;
    let route_ratings: Vec<f64> = request
        .neighborhoods
        .iter()
        .map(|name| neighborhood_rating(&reports, &request.city, name))
        .collect();
    let overall_safety_rating = overall_rating(&route_ratings);
    let neighborhood_ratings: KeyedList<f64> = request
        .neighborhoods
        .iter()
        .cloned()
        .zip(route_ratings)
        .collect();

    let assessment = SafetyTripAssessment {
        trip_id: request
            .trip_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        safety_tips: tips.tips(overall_safety_rating, &request.city, &request.travel_mode),
        city: request.city,
        neighborhoods: request.neighborhoods,
        travel_mode: request.travel_mode,
        overall_safety_rating,
        neighborhood_ratings,
        created_at: Utc::now(),
    };

    repo.update(
        StoreKey::SafetyTrips,
        |assessments: &mut Vec<SafetyTripAssessment>| {
            assessments.push(assessment.clone());
            Ok::<_, SafetyError>(())
        },
    )?;

    log::info!(
        "Assessed trip {} in {}: overall {}",
        assessment.trip_id,
        assessment.city,
        assessment.overall_safety_rating
    );
    Ok(assessment)
}
