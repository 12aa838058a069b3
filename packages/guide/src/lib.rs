#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City guide lookups, trip cost estimation, and itinerary suggestions.
//!
//! The guide book is a JSON object keyed by lowercase city key
//! (`"delhi"`, `"mumbai"`). Prices in it are free-text ranges such as
//! `"800-2000 INR per night"`; [`estimate::parse_range_midpoint`] turns
//! those into representative numbers.

pub mod estimate;
pub mod suggestions;

use city_explorer_city_models::{
    Attraction, CityGuideBook, CityGuideRecord, KeyedList, TransportFare,
};
use city_explorer_store::{Repository, StoreError, StoreKey};
use thiserror::Error;

pub use estimate::{CostBreakdown, TripCostEstimate, TripCostQuery, parse_range_midpoint};
pub use suggestions::{DayPlan, GENERAL_SAFETY_TIPS, TripSuggestions};

/// Errors that can occur during guide queries.
#[derive(Debug, Error)]
pub enum GuideError {
    /// The guide book has no entry for the city.
    #[error("City not found: {city}")]
    CityNotFound {
        /// City that was requested.
        city: String,
    },

    /// The guide book could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Normalizes a requested city into a guide book key.
#[must_use]
pub fn city_key(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Loads the whole guide book.
///
/// # Errors
///
/// Returns [`GuideError::Store`] if the guide book cannot be loaded.
pub fn load_book(repo: &Repository) -> Result<CityGuideBook, GuideError> {
    Ok(repo.load(StoreKey::Cities)?)
}

/// Returns the guide for one city, looked up by lowercase key.
///
/// # Errors
///
/// Returns [`GuideError::CityNotFound`] if the city has no guide, or
/// [`GuideError::Store`] if the guide book cannot be loaded.
pub fn city_guide(repo: &Repository, city: &str) -> Result<CityGuideRecord, GuideError> {
    let key = city_key(city);
    let book = load_book(repo)?;
    book.get(&key)
        .cloned()
        .ok_or_else(|| GuideError::CityNotFound {
            city: city.to_string(),
        })
}

/// Fare information by transport mode.
///
/// # Errors
///
/// See [`city_guide`].
pub fn transportation(
    repo: &Repository,
    city: &str,
) -> Result<KeyedList<TransportFare>, GuideError> {
    Ok(city_guide(repo, city)?.transportation)
}

/// Food price ranges by tier.
///
/// # Errors
///
/// See [`city_guide`].
pub fn food(repo: &Repository, city: &str) -> Result<KeyedList<String>, GuideError> {
    Ok(city_guide(repo, city)?.food)
}

/// Accommodation price ranges by tier.
///
/// # Errors
///
/// See [`city_guide`].
pub fn accommodation(repo: &Repository, city: &str) -> Result<KeyedList<String>, GuideError> {
    Ok(city_guide(repo, city)?.accommodation)
}

/// Attractions by key.
///
/// # Errors
///
/// See [`city_guide`].
pub fn attractions(repo: &Repository, city: &str) -> Result<KeyedList<Attraction>, GuideError> {
    Ok(city_guide(repo, city)?.attractions)
}

/// Estimates the cost of a trip to `city`.
///
/// # Errors
///
/// See [`city_guide`].
pub fn estimate_trip_cost(
    repo: &Repository,
    city: &str,
    query: &TripCostQuery,
) -> Result<TripCostEstimate, GuideError> {
    let guide = city_guide(repo, city)?;
    let estimate = estimate::estimate_for(&guide, query);
    log::debug!(
        "Estimated {} {} for {} day(s) in {}",
        estimate.costs.total,
        estimate.currency,
        query.days,
        guide.name
    );
    Ok(estimate)
}

/// Builds a day-by-day itinerary for `city`.
///
/// # Errors
///
/// See [`city_guide`].
pub fn trip_suggestions(
    repo: &Repository,
    city: &str,
    days: u32,
) -> Result<TripSuggestions, GuideError> {
    let guide = city_guide(repo, city)?;
    Ok(suggestions::suggestions_for(&guide, days))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_guide_lookup_is_case_insensitive() {
        let repo = fixtures::repo();
        assert_eq!(city_guide(&repo, "DELHI").unwrap().name, "Delhi");
        assert_eq!(city_guide(&repo, " delhi ").unwrap().name, "Delhi");
    }

    #[test]
    fn unknown_city_is_not_found() {
        let err = city_guide(&fixtures::repo(), "Goa").unwrap_err();
        assert!(matches!(err, GuideError::CityNotFound { ref city } if city == "Goa"));
    }

    #[test]
    fn sections_keep_file_order() {
        let repo = fixtures::repo();
        let modes: Vec<String> = transportation(&repo, "delhi")
            .unwrap()
            .keys()
            .map(str::to_string)
            .collect();
        assert_eq!(modes, vec!["auto_rickshaw", "taxi", "metro"]);
        assert_eq!(
            food(&repo, "delhi").unwrap().get("street_food").map(String::as_str),
            Some("30-100 INR")
        );
        assert!(accommodation(&repo, "delhi").unwrap().contains_key("hostel"));
        assert_eq!(attractions(&repo, "delhi").unwrap().len(), 3);
    }

    #[test]
    fn estimate_through_repository() {
        let estimate = estimate_trip_cost(
            &fixtures::repo(),
            "Delhi",
            &TripCostQuery {
                days: 3,
                travelers: 2,
                accommodation_type: "mid_range_hotel".to_string(),
                food_preferences: "budget_restaurant".to_string(),
            },
        )
        .unwrap();
        assert!((estimate.costs.total - 15_300.0).abs() < 1e-9);
        assert_eq!(estimate.city, "Delhi");
    }

    #[test]
    fn suggestions_through_repository() {
        let suggestions = trip_suggestions(&fixtures::repo(), "delhi", 2).unwrap();
        assert_eq!(suggestions.itinerary.len(), 2);
        assert_eq!(suggestions.safety_tips.len(), 5);
    }
}
