#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset record types for the city explorer.
//!
//! These types mirror the shapes of the static JSON datasets as they are
//! stored on disk: the population table, the cost-of-living index table,
//! and the hand-written city guide. They are distinct from the API
//! response types in `city_explorer_server_models`.

mod keyed;

pub use keyed::KeyedList;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Returns `true` if two city (or country) names match ignoring case.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Rounds to a fixed number of decimal places. Exact halves go to the
/// even neighbor, so `10.125` becomes `10.12` and `3.25` becomes `3.2`.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

// ── Population ──────────────────────────────────────────

/// One row of the population dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityPopulationRecord {
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// Metro population, kept as text exactly as published.
    #[serde(deserialize_with = "text_or_number")]
    pub population: String,
    /// Population within city limits, kept as text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub population_proper: String,
    /// First-level administrative division (state or province).
    #[serde(default)]
    pub admin_name: String,
}

impl CityPopulationRecord {
    /// Parses the metro population figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored text is not an integer.
    pub fn population_count(&self) -> Result<u64, std::num::ParseIntError> {
        self.population.trim().parse()
    }
}

/// Accepts either a JSON string or a JSON number and keeps it as text.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null(()) => String::new(),
    })
}

// ── Cost of living ──────────────────────────────────────

/// One row of the cost-of-living dataset.
///
/// The source file uses the published column titles as keys, so each
/// field is renamed to its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCostRecord {
    /// City name, the natural key (matched case-insensitively).
    #[serde(rename = "City")]
    pub city: String,
    /// Overall consumer price index, excluding rent.
    #[serde(rename = "Cost of Living Index")]
    pub cost_of_living_index: f64,
    /// Rent price index.
    #[serde(rename = "Rent Index")]
    pub rent_index: f64,
    /// Consumer prices including rent.
    #[serde(rename = "Cost of Living Plus Rent Index")]
    pub cost_of_living_plus_rent_index: f64,
    /// Grocery price index.
    #[serde(rename = "Groceries Index")]
    pub groceries_index: f64,
    /// Restaurant price index.
    #[serde(rename = "Restaurant Price Index")]
    pub restaurant_price_index: f64,
    /// Purchasing power relative to the reference city.
    #[serde(rename = "Local Purchasing Power Index")]
    pub local_purchasing_power_index: f64,
}

impl CityCostRecord {
    /// Returns the value of a single metric.
    #[must_use]
    pub const fn metric(&self, metric: CostMetric) -> f64 {
        match metric {
            CostMetric::CostOfLiving => self.cost_of_living_index,
            CostMetric::Rent => self.rent_index,
            CostMetric::CostOfLivingPlusRent => self.cost_of_living_plus_rent_index,
            CostMetric::Groceries => self.groceries_index,
            CostMetric::RestaurantPrice => self.restaurant_price_index,
            CostMetric::LocalPurchasingPower => self.local_purchasing_power_index,
        }
    }
}

/// The six indices carried by a [`CityCostRecord`].
///
/// `Display` yields the published column title.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum CostMetric {
    /// Consumer prices excluding rent
    #[strum(serialize = "Cost of Living Index")]
    CostOfLiving,
    /// Rent prices
    #[strum(serialize = "Rent Index")]
    Rent,
    /// Consumer prices including rent
    #[strum(serialize = "Cost of Living Plus Rent Index")]
    CostOfLivingPlusRent,
    /// Grocery prices
    #[strum(serialize = "Groceries Index")]
    Groceries,
    /// Restaurant prices
    #[strum(serialize = "Restaurant Price Index")]
    RestaurantPrice,
    /// Purchasing power of local salaries
    #[strum(serialize = "Local Purchasing Power Index")]
    LocalPurchasingPower,
}

impl CostMetric {
    /// Returns all metrics in comparison order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CostOfLiving,
            Self::Rent,
            Self::CostOfLivingPlusRent,
            Self::Groceries,
            Self::RestaurantPrice,
            Self::LocalPurchasingPower,
        ]
    }
}

// ── City guide ──────────────────────────────────────────

/// The full guide dataset, keyed by lowercase city key (e.g. `"delhi"`).
pub type CityGuideBook = KeyedList<CityGuideRecord>;

/// Travel-cost and neighborhood guide for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityGuideRecord {
    /// Display name.
    pub name: String,
    /// Country name.
    pub country: String,
    /// ISO currency code used by every price string in this record.
    pub currency: String,
    /// Fare information by transport mode (`"taxi"`, `"metro"`, ...).
    #[serde(default)]
    pub transportation: KeyedList<TransportFare>,
    /// Price range strings by food tier (`"street_food"`, ...).
    #[serde(default)]
    pub food: KeyedList<String>,
    /// Price range strings by accommodation tier (`"hostel"`, ...).
    #[serde(default)]
    pub accommodation: KeyedList<String>,
    /// Neighborhoods by key.
    #[serde(default)]
    pub neighborhoods: KeyedList<Neighborhood>,
    /// Attractions by key.
    #[serde(default)]
    pub attractions: KeyedList<Attraction>,
}

/// Fare information for one transport mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportFare {
    /// Flag-fall fare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fare: Option<f64>,
    /// Per-kilometre fare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_km: Option<f64>,
    /// Range string for a short trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_short_trip: Option<String>,
    /// Range string for a medium trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_medium_trip: Option<String>,
    /// Range string for flat-fare modes such as metro.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_trip: Option<String>,
    /// Any other fields present in the guide file.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A neighborhood entry in a city guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Display name.
    pub name: String,
    /// Editorial safety rating on a 1-5 scale.
    #[serde(default)]
    pub safety_rating: f64,
    /// Free-text safety advice.
    #[serde(default)]
    pub safety_notes: String,
    /// Editorial tourist-friendliness score on a 1-5 scale.
    #[serde(default)]
    pub tourist_friendly: f64,
    /// Names of notable places in the neighborhood.
    #[serde(default)]
    pub attractions: Vec<String>,
}

/// An attraction entry in a city guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Display name.
    pub name: String,
    /// Free-text entry fee (e.g. `"Free"`, `"35 INR (Indians)"`).
    #[serde(default)]
    pub entry_fee: String,
    /// Recommended time of day.
    #[serde(default)]
    pub best_time: String,
    /// Typical visit length.
    #[serde(default)]
    pub avg_time_spent: String,
    /// Any other fields present in the guide file (e.g. `ferry_cost`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
