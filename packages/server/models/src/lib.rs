#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the city explorer server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the dataset record types so that, for example, the cost-of-living
//! table can keep its published column titles on disk while the API
//! speaks `snake_case`.

use city_explorer_city_models::{CityCostRecord, CityPopulationRecord, round_to};
use city_explorer_cost::{CityComparison, MetricComparison, ValueRankedCity};
use city_explorer_guide::{CostBreakdown, DayPlan, TripCostEstimate, TripSuggestions};
use city_explorer_trips::TripPlan;
use serde::{Deserialize, Serialize};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message text.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Result of a populate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulateResponse {
    /// Always `"success"` when returned with a 200.
    pub status: String,
    /// Human-readable summary.
    pub message: String,
    /// Records found in the dataset.
    pub records: usize,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// What went wrong.
    pub detail: String,
}

// ── Population ──────────────────────────────────────────

/// A city's population as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCityPopulation {
    /// City name.
    pub city: String,
    /// Metro population, as published.
    pub population: String,
    /// Population within city limits, as published.
    pub population_proper: String,
    /// State or province.
    pub admin_name: String,
}

impl From<CityPopulationRecord> for ApiCityPopulation {
    fn from(record: CityPopulationRecord) -> Self {
        Self {
            city: record.city,
            population: record.population,
            population_proper: record.population_proper,
            admin_name: record.admin_name,
        }
    }
}

/// `?limit=` query parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitQuery {
    /// Maximum number of results.
    pub limit: Option<i64>,
}

// ── Cost of living ──────────────────────────────────────

/// A city's cost-of-living indices as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCityCost {
    /// City name as listed in the dataset (`"Mumbai, India"`).
    pub city: String,
    /// Overall cost-of-living index (New York = 100).
    pub cost_of_living_index: f64,
    /// Rent index.
    pub rent_index: f64,
    /// Combined cost-of-living and rent index.
    pub cost_of_living_plus_rent_index: f64,
    /// Groceries index.
    pub groceries_index: f64,
    /// Restaurant price index.
    pub restaurant_price_index: f64,
    /// Local purchasing power index.
    pub local_purchasing_power_index: f64,
}

impl From<CityCostRecord> for ApiCityCost {
    fn from(record: CityCostRecord) -> Self {
        Self {
            city: record.city,
            cost_of_living_index: record.cost_of_living_index,
            rent_index: record.rent_index,
            cost_of_living_plus_rent_index: record.cost_of_living_plus_rent_index,
            groceries_index: record.groceries_index,
            restaurant_price_index: record.restaurant_price_index,
            local_purchasing_power_index: record.local_purchasing_power_index,
        }
    }
}

/// A best-value city with its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiValueCity {
    /// The city's index row, flattened into this object.
    #[serde(flatten)]
    pub city: ApiCityCost,
    /// Local purchasing power divided by cost of living, two decimal
    /// places.
    pub value_score: f64,
}

impl From<ValueRankedCity> for ApiValueCity {
    fn from(ranked: ValueRankedCity) -> Self {
        Self {
            city: ranked.record.into(),
            value_score: round_to(ranked.value_score, 2),
        }
    }
}

/// One metric in a city comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMetricComparison {
    /// Published metric title, e.g. `"Rent Index"`.
    pub metric: String,
    /// First city's value, two decimal places.
    pub city1_value: f64,
    /// Second city's value, two decimal places.
    pub city2_value: f64,
    /// `city1_value - city2_value`.
    pub difference: f64,
    /// Difference as a percentage of the second city's value; 0 when that
    /// value is 0.
    pub percentage_diff: f64,
}

impl From<MetricComparison> for ApiMetricComparison {
    fn from(comparison: MetricComparison) -> Self {
        Self {
            metric: comparison.metric.to_string(),
            city1_value: comparison.city1_value,
            city2_value: comparison.city2_value,
            difference: comparison.difference,
            percentage_diff: comparison.percentage_diff,
        }
    }
}

/// Response of `POST /cost/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCitiesComparison {
    /// First city's full row.
    pub city1: ApiCityCost,
    /// Second city's full row.
    pub city2: ApiCityCost,
    /// One entry per index, in a fixed order.
    pub comparisons: Vec<ApiMetricComparison>,
}

impl From<CityComparison> for ApiCitiesComparison {
    fn from(comparison: CityComparison) -> Self {
        Self {
            city1: comparison.city1.into(),
            city2: comparison.city2.into(),
            comparisons: comparison
                .comparisons
                .into_iter()
                .map(ApiMetricComparison::from)
                .collect(),
        }
    }
}

/// Body of `POST /cost/compare`. Both fields are required but optional
/// here so that a missing one can be reported as a 400 with a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    /// First city name.
    pub city1: Option<String>,
    /// Second city name.
    pub city2: Option<String>,
}

// ── City guide ──────────────────────────────────────────

/// Query parameters for the trip cost estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateQuery {
    /// Trip length in days.
    pub days: u32,
    /// Group size.
    pub travelers: u32,
    /// `hostel`, `budget_hotel`, `mid_range_hotel`, or `luxury_hotel`.
    pub accommodation_type: String,
    /// `street_food`, `budget_restaurant`, `mid_range_restaurant`, or
    /// `luxury_restaurant`.
    pub food_preferences: String,
}

/// Per-category estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCostBreakdown {
    /// Lodging for the whole group.
    pub accommodation: f64,
    /// Three meals per traveler per day.
    pub food: f64,
    /// Two medium taxi rides per day.
    pub transportation: f64,
    /// Flat per-traveler, per-day allowance.
    pub attractions: f64,
    /// Sum of the four categories.
    pub total: f64,
}

impl From<CostBreakdown> for ApiCostBreakdown {
    fn from(costs: CostBreakdown) -> Self {
        Self {
            accommodation: costs.accommodation,
            food: costs.food,
            transportation: costs.transportation,
            attractions: costs.attractions,
            total: costs.total,
        }
    }
}

/// Response of `GET /estimate-trip-cost/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTripCostEstimate {
    /// City display name.
    pub city: String,
    /// Trip length in days.
    pub days: u32,
    /// Group size.
    pub travelers: u32,
    /// Accommodation tier that was priced.
    pub accommodation_type: String,
    /// Food tier that was priced.
    pub food_preferences: String,
    /// Per-category amounts, two decimal places.
    pub estimated_costs: ApiCostBreakdown,
    /// Currency code of every amount.
    pub currency: String,
}

impl From<TripCostEstimate> for ApiTripCostEstimate {
    fn from(estimate: TripCostEstimate) -> Self {
        Self {
            city: estimate.city,
            days: estimate.days,
            travelers: estimate.travelers,
            accommodation_type: estimate.accommodation_type,
            food_preferences: estimate.food_preferences,
            estimated_costs: estimate.costs.into(),
            currency: estimate.currency,
        }
    }
}

/// `?days=` query parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SuggestionsQuery {
    /// Trip length in days.
    pub days: u32,
}

/// One itinerary day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDayPlan {
    /// 1-based day number.
    pub day: u32,
    /// Morning attraction.
    pub morning: String,
    /// Afternoon attraction.
    pub afternoon: String,
    /// Evening plan.
    pub evening: String,
    /// Neighborhoods worth basing the day around.
    pub suggested_areas: Vec<String>,
}

impl From<DayPlan> for ApiDayPlan {
    fn from(plan: DayPlan) -> Self {
        Self {
            day: plan.day,
            morning: plan.morning,
            afternoon: plan.afternoon,
            evening: plan.evening,
            suggested_areas: plan.suggested_areas,
        }
    }
}

/// Response of `GET /trip-suggestions/{city}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTripSuggestions {
    /// City display name.
    pub city: String,
    /// Requested trip length; the itinerary stops at seven days.
    pub days: u32,
    /// One entry per planned day.
    pub itinerary: Vec<ApiDayPlan>,
    /// General advice for any visitor.
    pub safety_tips: Vec<String>,
}

impl From<TripSuggestions> for ApiTripSuggestions {
    fn from(suggestions: TripSuggestions) -> Self {
        Self {
            city: suggestions.city,
            days: suggestions.days,
            itinerary: suggestions
                .itinerary
                .into_iter()
                .map(ApiDayPlan::from)
                .collect(),
            safety_tips: suggestions.safety_tips,
        }
    }
}

// ── Trips ───────────────────────────────────────────────

/// Query parameters for `POST /trips/{id}/plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanQuery {
    /// Spending cap in the city's currency.
    pub budget: Option<f64>,
    /// Travel style: `budget`, `mid_range`, or `luxury`.
    pub preferences: Option<String>,
}

/// Response of `POST /trips/{id}/plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTripPlan {
    /// Identifier of the planned trip.
    pub trip_id: String,
    /// City key of the trip.
    pub city: String,
    /// `budget`, `mid_range`, or `luxury`.
    pub travel_style: String,
    /// Day-by-day itinerary.
    pub itinerary: Vec<ApiDayPlan>,
    /// General advice for any visitor.
    pub safety_tips: Vec<String>,
    /// One-traveler cost estimate.
    pub estimate: ApiTripCostEstimate,
    /// Budget the caller supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Whether the estimate fits the budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_budget: Option<bool>,
    /// Budget minus estimated total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_remaining: Option<f64>,
}

impl From<TripPlan> for ApiTripPlan {
    fn from(plan: TripPlan) -> Self {
        let suggestions = ApiTripSuggestions::from(plan.suggestions);
        Self {
            trip_id: plan.trip_id,
            city: plan.city,
            travel_style: plan.travel_style.to_string(),
            itinerary: suggestions.itinerary,
            safety_tips: suggestions.safety_tips,
            estimate: plan.estimate.into(),
            budget: plan.budget,
            within_budget: plan.within_budget,
            budget_remaining: plan.budget_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_explorer_city_models::CostMetric;

    #[test]
    fn cost_uses_snake_case_keys() {
        let record: CityCostRecord = serde_json::from_str(
            r#"{"City":"Pune","Cost of Living Index":22.5,"Rent Index":5.1,
                "Cost of Living Plus Rent Index":14.4,"Groceries Index":24.0,
                "Restaurant Price Index":18.2,"Local Purchasing Power Index":70.3}"#,
        )
        .unwrap();
        let value = serde_json::to_value(ApiValueCity {
            city: record.into(),
            value_score: 3.12,
        })
        .unwrap();
        assert_eq!(value["city"], "Pune");
        assert_eq!(value["rent_index"], 5.1);
        assert_eq!(value["value_score"], 3.12);
    }

    #[test]
    fn metric_comparison_uses_display_title() {
        let api = ApiMetricComparison::from(MetricComparison {
            metric: CostMetric::CostOfLivingPlusRent,
            city1_value: 2.0,
            city2_value: 1.0,
            difference: 1.0,
            percentage_diff: 100.0,
        });
        assert_eq!(api.metric, "Cost of Living Plus Rent Index");
    }

    #[test]
    fn compare_request_tolerates_missing_fields() {
        let request: CompareRequest = serde_json::from_str(r#"{"city1":"Delhi"}"#).unwrap();
        assert_eq!(request.city1.as_deref(), Some("Delhi"));
        assert!(request.city2.is_none());
    }

    #[test]
    fn estimate_nests_costs() {
        let api = ApiTripCostEstimate::from(TripCostEstimate {
            city: "Delhi".to_string(),
            days: 1,
            travelers: 1,
            accommodation_type: "hostel".to_string(),
            food_preferences: "street_food".to_string(),
            costs: CostBreakdown {
                accommodation: 1.0,
                food: 2.0,
                transportation: 3.0,
                attractions: 4.0,
                total: 10.0,
            },
            currency: "INR".to_string(),
        });
        let value = serde_json::to_value(api).unwrap();
        assert_eq!(value["estimated_costs"]["total"], 10.0);
    }
}
