//! Trip cost estimation from free-text price ranges.

use city_explorer_city_models::{CityGuideRecord, round_to};

/// Flat spend on attractions per traveler per day, in local currency.
pub const ATTRACTION_RATE_PER_TRAVELER_DAY: f64 = 500.0;

/// Meals per traveler per day.
pub const MEALS_PER_DAY: f64 = 3.0;

/// Medium-length taxi rides per day (shared by the group).
pub const TAXI_TRIPS_PER_DAY: f64 = 2.0;

/// Transport mode whose medium-trip fare drives the transport estimate.
pub const TAXI_MODE: &str = "taxi";

/// Parses a free-text price range into its midpoint.
///
/// Looks at each whitespace-separated token containing exactly one `-`,
/// strips every non-digit character from both sides, and returns the
/// average of the two numbers from the first token where both sides are
/// non-empty. Anything else (`"Free"`, `"1500+ INR"`, `"10-20-30"`) yields
/// `0.0`.
///
/// ```
/// use city_explorer_guide::parse_range_midpoint;
///
/// assert_eq!(parse_range_midpoint("100-150 INR"), 125.0);
/// assert_eq!(parse_range_midpoint("Free"), 0.0);
/// ```
#[must_use]
pub fn parse_range_midpoint(text: &str) -> f64 {
    text.split_whitespace()
        .filter_map(|token| token.split_once('-'))
        .filter(|(_, high)| !high.contains('-'))
        .find_map(|(low, high)| {
            let low = digits(low)?;
            let high = digits(high)?;
            Some((low + high) / 2.0)
        })
        .unwrap_or(0.0)
}

fn digits(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Inputs for a trip cost estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCostQuery {
    /// Trip length in days.
    pub days: u32,
    /// Group size.
    pub travelers: u32,
    /// Accommodation tier key (e.g. `"budget_hotel"`).
    pub accommodation_type: String,
    /// Food tier key (e.g. `"street_food"`).
    pub food_preferences: String,
}

/// Estimated spend per category, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Lodging.
    pub accommodation: f64,
    /// Meals.
    pub food: f64,
    /// Taxi rides.
    pub transportation: f64,
    /// Entry fees and activities.
    pub attractions: f64,
    /// Sum of the four categories.
    pub total: f64,
}

/// A complete trip cost estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCostEstimate {
    /// City display name.
    pub city: String,
    /// Trip length in days.
    pub days: u32,
    /// Group size.
    pub travelers: u32,
    /// Accommodation tier key as requested.
    pub accommodation_type: String,
    /// Food tier key as requested.
    pub food_preferences: String,
    /// Per-category costs.
    pub costs: CostBreakdown,
    /// Currency of every amount.
    pub currency: String,
}

/// Computes a trip cost estimate against one city guide.
///
/// An accommodation or food tier the guide does not list contributes 0, as
/// does a missing taxi fare.
#[must_use]
pub fn estimate_for(guide: &CityGuideRecord, query: &TripCostQuery) -> TripCostEstimate {
    let days = f64::from(query.days);
    let travelers = f64::from(query.travelers);

    let accommodation = guide
        .accommodation
        .get(&query.accommodation_type)
        .map_or(0.0, |range| {
            // Assumes two travelers share a room.
            parse_range_midpoint(range) * days * (travelers / 2.0 + 0.5)
        });

    let food = guide
        .food
        .get(&query.food_preferences)
        .map_or(0.0, |range| {
            parse_range_midpoint(range) * days * travelers * MEALS_PER_DAY
        });

    let transportation = guide
        .transportation
        .get(TAXI_MODE)
        .and_then(|fare| fare.typical_medium_trip.as_deref())
        .map_or(0.0, |range| {
            parse_range_midpoint(range) * days * TAXI_TRIPS_PER_DAY
        });

    let attractions = ATTRACTION_RATE_PER_TRAVELER_DAY * days * travelers;

    if !guide.accommodation.contains_key(&query.accommodation_type) {
        log::warn!(
            "No '{}' accommodation tier for {}; counting it as 0",
            query.accommodation_type,
            guide.name
        );
    }
    if !guide.food.contains_key(&query.food_preferences) {
        log::warn!(
            "No '{}' food tier for {}; counting it as 0",
            query.food_preferences,
            guide.name
        );
    }

    let total = accommodation + food + transportation + attractions;

    TripCostEstimate {
        city: guide.name.clone(),
        days: query.days,
        travelers: query.travelers,
        accommodation_type: query.accommodation_type.clone(),
        food_preferences: query.food_preferences.clone(),
        costs: CostBreakdown {
            accommodation: round_to(accommodation, 2),
            food: round_to(food, 2),
            transportation: round_to(transportation, 2),
            attractions: round_to(attractions, 2),
            total: round_to(total, 2),
        },
        currency: guide.currency.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn query(days: u32, travelers: u32, accommodation: &str, food: &str) -> TripCostQuery {
        TripCostQuery {
            days,
            travelers,
            accommodation_type: accommodation.to_string(),
            food_preferences: food.to_string(),
        }
    }

    #[test]
    fn midpoint_of_simple_range() {
        assert!((parse_range_midpoint("100-150 INR") - 125.0).abs() < f64::EPSILON);
    }

    #[test]
    fn midpoint_ignores_trailing_words() {
        assert!(
            (parse_range_midpoint("800-2000 INR per night") - 1400.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn midpoint_without_range_is_zero() {
        assert!(parse_range_midpoint("Free").abs() < f64::EPSILON);
        assert!(parse_range_midpoint("1500+ INR per person").abs() < f64::EPSILON);
        assert!(parse_range_midpoint("").abs() < f64::EPSILON);
    }

    #[test]
    fn midpoint_skips_tokens_without_digits() {
        assert!((parse_range_midpoint("walk-in 20-40 INR") - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn midpoint_skips_tokens_with_several_dashes() {
        assert!(parse_range_midpoint("10-20-30").abs() < f64::EPSILON);
        assert!((parse_range_midpoint("10-20-30 50-70 INR") - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn midpoint_strips_non_digits_from_each_side() {
        assert!((parse_range_midpoint("Rs.100-Rs.300") - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn worked_example_totals_15300() {
        let estimate = estimate_for(
            &fixtures::delhi(),
            &query(3, 2, "mid_range_hotel", "budget_restaurant"),
        );
        let costs = estimate.costs;
        assert!((costs.accommodation - 6750.0).abs() < 1e-9);
        assert!((costs.food - 4050.0).abs() < 1e-9);
        assert!((costs.transportation - 1500.0).abs() < 1e-9);
        assert!((costs.attractions - 3000.0).abs() < 1e-9);
        assert!((costs.total - 15_300.0).abs() < 1e-9);
        assert_eq!(estimate.currency, "INR");
    }

    #[test]
    fn unknown_tiers_contribute_zero() {
        let estimate = estimate_for(&fixtures::delhi(), &query(2, 1, "palace", "banquet"));
        assert!(estimate.costs.accommodation.abs() < f64::EPSILON);
        assert!(estimate.costs.food.abs() < f64::EPSILON);
        assert!((estimate.costs.total - (1000.0 + 1000.0)).abs() < 1e-9);
    }

    #[test]
    fn open_ended_tier_contributes_zero() {
        let estimate = estimate_for(&fixtures::delhi(), &query(1, 1, "luxury_hotel", "street_food"));
        assert!(estimate.costs.accommodation.abs() < f64::EPSILON);
        assert!((estimate.costs.food - 195.0).abs() < 1e-9);
    }

    #[test]
    fn no_taxi_means_no_transport_cost() {
        let mut guide = fixtures::delhi();
        guide.transportation = city_explorer_city_models::KeyedList::new();
        let estimate = estimate_for(&guide, &query(3, 2, "hostel", "street_food"));
        assert!(estimate.costs.transportation.abs() < f64::EPSILON);
    }
}
