#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trip records and trip planning.

use chrono::Utc;
use city_explorer_guide::{GuideError, TripCostEstimate, TripCostQuery, TripSuggestions};
use city_explorer_store::{Repository, StoreError, StoreKey};
use city_explorer_trip_models::{NewTrip, Trip};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Errors that can occur while storing or planning trips.
#[derive(Debug, Error)]
pub enum TripError {
    /// No trip has the requested identifier.
    #[error("Trip not found: {trip_id}")]
    NotFound {
        /// Identifier that was requested.
        trip_id: String,
    },

    /// The trip's city has no guide.
    #[error(transparent)]
    Guide(#[from] GuideError),

    /// The trip store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Spending level used to pick accommodation and food tiers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TravelStyle {
    /// Hostels and street food.
    Budget,
    /// Mid-range hotels and restaurants.
    #[default]
    MidRange,
    /// Luxury hotels and restaurants.
    Luxury,
}

impl TravelStyle {
    /// Guide accommodation tier for this style.
    #[must_use]
    pub const fn accommodation_tier(self) -> &'static str {
        match self {
            Self::Budget => "hostel",
            Self::MidRange => "mid_range_hotel",
            Self::Luxury => "luxury_hotel",
        }
    }

    /// Guide food tier for this style.
    #[must_use]
    pub const fn food_tier(self) -> &'static str {
        match self {
            Self::Budget => "street_food",
            Self::MidRange => "mid_range_restaurant",
            Self::Luxury => "luxury_restaurant",
        }
    }
}

/// Itinerary and single-traveler estimate for a stored trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    /// Identifier of the planned trip.
    pub trip_id: String,
    /// City key the trip was planned for.
    pub city: String,
    /// Style that picked the accommodation and food tiers.
    pub travel_style: TravelStyle,
    /// Day-by-day itinerary for the trip's duration.
    pub suggestions: TripSuggestions,
    /// One-traveler cost estimate.
    pub estimate: TripCostEstimate,
    /// Budget the caller supplied, if any.
    pub budget: Option<f64>,
    /// `None` when no budget was given.
    pub within_budget: Option<bool>,
    /// Budget minus estimated total; negative when over budget.
    pub budget_remaining: Option<f64>,
}

/// Loads every stored trip.
///
/// # Errors
///
/// Returns [`TripError::Store`] if the trip store cannot be read.
pub fn list_trips(repo: &Repository) -> Result<Vec<Trip>, TripError> {
    Ok(repo.load_or_default(StoreKey::Trips)?)
}

/// Finds a trip by identifier.
///
/// # Errors
///
/// Returns [`TripError::NotFound`] if no trip matches, or
/// [`TripError::Store`] if the trip store cannot be read.
pub fn get_trip(repo: &Repository, trip_id: &str) -> Result<Trip, TripError> {
    list_trips(repo)?
        .into_iter()
        .find(|trip| trip.trip_id == trip_id)
        .ok_or_else(|| TripError::NotFound {
            trip_id: trip_id.to_string(),
        })
}

/// Appends a new trip, generating an identifier when none is supplied.
///
/// # Errors
///
/// Returns [`TripError::Store`] if the trip store cannot be updated.
pub fn create_trip(repo: &Repository, mut new: NewTrip) -> Result<Trip, TripError> {
    let trip_id = new
        .trip_id
        .take()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let trip = new.into_trip(trip_id, Utc::now());

    repo.update(StoreKey::Trips, |trips: &mut Vec<Trip>| {
        trips.push(trip.clone());
        Ok::<_, TripError>(())
    })?;

    log::info!("Created trip {} to {}", trip.trip_id, trip.city);
    Ok(trip)
}

/// Replaces a stored trip. The stored identifier is always `trip_id`,
/// whatever the body says, and `created_at` is re-stamped.
///
/// # Errors
///
/// Returns [`TripError::NotFound`] (leaving the store untouched) if no
/// trip matches, or [`TripError::Store`] if the store cannot be updated.
pub fn update_trip(repo: &Repository, trip_id: &str, new: NewTrip) -> Result<Trip, TripError> {
    let trip = new.into_trip(trip_id.to_string(), Utc::now());

    repo.update(StoreKey::Trips, |trips: &mut Vec<Trip>| {
        let slot = trips
            .iter_mut()
            .find(|existing| existing.trip_id == trip_id)
            .ok_or_else(|| TripError::NotFound {
                trip_id: trip_id.to_string(),
            })?;
        *slot = trip.clone();
        Ok::<_, TripError>(())
    })?;

    log::info!("Updated trip {trip_id}");
    Ok(trip)
}

/// Plans a stored trip: an itinerary for its duration and a cost estimate
/// for one traveler at the given style, checked against `budget`.
///
/// # Errors
///
/// Returns [`TripError::NotFound`] for an unknown trip,
/// [`TripError::Guide`] if the trip's city has no guide, or
/// [`TripError::Store`] if a store cannot be read.
pub fn plan_trip(
    repo: &Repository,
    trip_id: &str,
    budget: Option<f64>,
    travel_style: TravelStyle,
) -> Result<TripPlan, TripError> {
    let trip = get_trip(repo, trip_id)?;
    let guide = city_explorer_guide::city_guide(repo, &trip.city)?;

    let suggestions = city_explorer_guide::suggestions::suggestions_for(&guide, trip.duration_days);
    let estimate = city_explorer_guide::estimate::estimate_for(
        &guide,
        &TripCostQuery {
            days: trip.duration_days,
            travelers: 1,
            accommodation_type: travel_style.accommodation_tier().to_string(),
            food_preferences: travel_style.food_tier().to_string(),
        },
    );

    let total = estimate.costs.total;
    log::debug!("Planned trip {trip_id}: {total} {} at {travel_style}", estimate.currency);

    Ok(TripPlan {
        trip_id: trip.trip_id,
        city: guide.name,
        travel_style,
        suggestions,
        estimate,
        budget,
        within_budget: budget.map(|b| total <= b),
        budget_remaining: budget.map(|b| b - total),
    })
}
