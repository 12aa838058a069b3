#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cost-of-living metrics.
//!
//! Lookups, cheapest/most-expensive rankings, the best-value ranking
//! (local purchasing power divided by cost of living), and a pairwise
//! comparison of two cities across all six published indices.

use city_explorer_city_models::{CityCostRecord, CostMetric, names_match, round_to};
use city_explorer_store::{Repository, StoreError, StoreKey};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Errors that can occur during cost-of-living queries.
#[derive(Debug, Error)]
pub enum CostError {
    /// One or more requested cities are not in the dataset.
    #[error(
        "City not found: {}. Available cities: {}",
        .cities.join(", "),
        .available.join(", ")
    )]
    NotFound {
        /// Requested names that did not match.
        cities: Vec<String>,
        /// Every city name in the dataset, to help the caller retry.
        available: Vec<String>,
    },

    /// The dataset could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Sort order for [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RankDirection {
    /// Highest cost-of-living index first.
    MostExpensive,
    /// Lowest cost-of-living index first.
    Cheapest,
}

/// A city paired with its best-value score.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRankedCity {
    /// The underlying record.
    pub record: CityCostRecord,
    /// Local purchasing power divided by cost of living (0 when the cost
    /// index is 0).
    pub value_score: f64,
}

/// Side-by-side values for one metric, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricComparison {
    /// Which index is being compared.
    pub metric: CostMetric,
    /// Value for the first city.
    pub city1_value: f64,
    /// Value for the second city.
    pub city2_value: f64,
    /// `city1_value - city2_value`.
    pub difference: f64,
    /// Difference as a percentage of the second city's value (0 when that
    /// value is 0).
    pub percentage_diff: f64,
}

/// Result of comparing two cities.
#[derive(Debug, Clone, PartialEq)]
pub struct CityComparison {
    /// First city's record.
    pub city1: CityCostRecord,
    /// Second city's record.
    pub city2: CityCostRecord,
    /// One entry per metric, in [`CostMetric::all`] order.
    pub comparisons: Vec<MetricComparison>,
}

/// Loads the full cost-of-living dataset in file order.
///
/// # Errors
///
/// Returns [`CostError::Store`] if the dataset cannot be loaded.
pub fn load(repo: &Repository) -> Result<Vec<CityCostRecord>, CostError> {
    Ok(repo.load(StoreKey::CostOfLiving)?)
}

/// Checks that the cost-of-living dataset loads and returns its size.
///
/// # Errors
///
/// Returns [`CostError::Store`] if the dataset cannot be loaded.
pub fn populate(repo: &Repository) -> Result<usize, CostError> {
    let count = load(repo)?.len();
    log::info!("Cost of living dataset ready: {count} cities");
    Ok(count)
}

/// Every city name in the dataset, in file order.
///
/// # Errors
///
/// Returns [`CostError::Store`] if the dataset cannot be loaded.
pub fn list_available_cities(repo: &Repository) -> Result<Vec<String>, CostError> {
    Ok(city_names(&load(repo)?))
}

fn city_names(records: &[CityCostRecord]) -> Vec<String> {
    records.iter().map(|record| record.city.clone()).collect()
}

fn find<'a>(records: &'a [CityCostRecord], city: &str) -> Option<&'a CityCostRecord> {
    records.iter().find(|record| names_match(&record.city, city))
}

/// Finds a city by exact name, ignoring case.
///
/// # Errors
///
/// Returns [`CostError::NotFound`] (listing the known cities) if no city
/// matches, or [`CostError::Store`] if the dataset cannot be loaded.
pub fn lookup(repo: &Repository, city: &str) -> Result<CityCostRecord, CostError> {
    let records = load(repo)?;
    find(&records, city)
        .cloned()
        .ok_or_else(|| CostError::NotFound {
            cities: vec![city.to_string()],
            available: city_names(&records),
        })
}

/// Returns the first `limit` cities ordered by cost-of-living index.
///
/// Equal indices keep their file order.
///
/// # Errors
///
/// Returns [`CostError::Store`] if the dataset cannot be loaded.
pub fn rank(
    repo: &Repository,
    direction: RankDirection,
    limit: usize,
) -> Result<Vec<CityCostRecord>, CostError> {
    let mut records = load(repo)?;
    records.sort_by(|a, b| {
        let ascending = a.cost_of_living_index.total_cmp(&b.cost_of_living_index);
        match direction {
            RankDirection::Cheapest => ascending,
            RankDirection::MostExpensive => ascending.reverse(),
        }
    });
    records.truncate(limit);
    Ok(records)
}

/// Purchasing power per unit of cost. Defined as 0 when the cost index is
/// 0.
#[must_use]
pub fn value_score(record: &CityCostRecord) -> f64 {
    if record.cost_of_living_index == 0.0 {
        0.0
    } else {
        record.local_purchasing_power_index / record.cost_of_living_index
    }
}

/// Returns the `limit` cities with the highest [`value_score`].
///
/// Equal scores keep their file order.
///
/// # Errors
///
/// Returns [`CostError::Store`] if the dataset cannot be loaded.
pub fn best_value(repo: &Repository, limit: usize) -> Result<Vec<ValueRankedCity>, CostError> {
    let mut scored: Vec<ValueRankedCity> = load(repo)?
        .into_iter()
        .map(|record| ValueRankedCity {
            value_score: value_score(&record),
            record,
        })
        .collect();

    scored.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));
    scored.truncate(limit);
    Ok(scored)
}

/// Compares one metric between two records.
#[must_use]
pub fn compare_metric(
    city1: &CityCostRecord,
    city2: &CityCostRecord,
    metric: CostMetric,
) -> MetricComparison {
    let value1 = city1.metric(metric);
    let value2 = city2.metric(metric);
    let difference = value1 - value2;
    let percentage_diff = if value2 == 0.0 {
        0.0
    } else {
        difference / value2 * 100.0
    };

    MetricComparison {
        metric,
        city1_value: round_to(value1, 2),
        city2_value: round_to(value2, 2),
        difference: round_to(difference, 2),
        percentage_diff: round_to(percentage_diff, 2),
    }
}

/// Compares two cities across every metric.
///
/// # Errors
///
/// Returns [`CostError::NotFound`] naming every city that is missing (and
/// listing the known cities), or [`CostError::Store`] if the dataset cannot
/// be loaded.
pub fn compare(repo: &Repository, city1: &str, city2: &str) -> Result<CityComparison, CostError> {
    let records = load(repo)?;

    match (find(&records, city1), find(&records, city2)) {
        (Some(first), Some(second)) => Ok(CityComparison {
            comparisons: CostMetric::all()
                .iter()
                .map(|metric| compare_metric(first, second, *metric))
                .collect(),
            city1: first.clone(),
            city2: second.clone(),
        }),
        (first, second) => {
            let cities = [(first, city1), (second, city2)]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
            log::debug!("Comparison requested unknown cities: {cities:?}");
            Err(CostError::NotFound {
                cities,
                available: city_names(&records),
            })
        }
    }
}
