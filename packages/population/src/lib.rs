#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City population lookups.
//!
//! Every function reloads the population dataset through the
//! [`Repository`], so edits to the data file are visible on the next call.

use city_explorer_city_models::{CityPopulationRecord, names_match};
use city_explorer_store::{Repository, StoreError, StoreKey};
use thiserror::Error;

/// Errors that can occur during population queries.
#[derive(Debug, Error)]
pub enum PopulationError {
    /// No record matches the requested city.
    #[error("City not found: {city}")]
    NotFound {
        /// City that was requested.
        city: String,
    },

    /// A stored population figure is not an integer.
    #[error("Invalid population figure '{value}' for {city}")]
    InvalidPopulation {
        /// City whose record is malformed.
        city: String,
        /// Offending text.
        value: String,
    },

    /// The dataset could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loads the full population dataset in file order.
///
/// # Errors
///
/// Returns [`PopulationError::Store`] if the dataset cannot be loaded.
pub fn load(repo: &Repository) -> Result<Vec<CityPopulationRecord>, PopulationError> {
    Ok(repo.load(StoreKey::Population)?)
}

/// Checks that the population dataset loads and returns its size.
///
/// # Errors
///
/// Returns [`PopulationError::Store`] if the dataset cannot be loaded.
pub fn populate(repo: &Repository) -> Result<usize, PopulationError> {
    let count = load(repo)?.len();
    log::info!("Population dataset ready: {count} cities");
    Ok(count)
}

/// Finds a city by exact name, ignoring case.
///
/// # Errors
///
/// Returns [`PopulationError::NotFound`] if no city matches, or
/// [`PopulationError::Store`] if the dataset cannot be loaded.
pub fn lookup(repo: &Repository, city: &str) -> Result<CityPopulationRecord, PopulationError> {
    load(repo)?
        .into_iter()
        .find(|record| names_match(&record.city, city))
        .ok_or_else(|| PopulationError::NotFound {
            city: city.to_string(),
        })
}

/// Returns every city in `country` (ignoring case), in file order.
///
/// An unknown country yields an empty list rather than an error.
///
/// # Errors
///
/// Returns [`PopulationError::Store`] if the dataset cannot be loaded.
pub fn filter_by_country(
    repo: &Repository,
    country: &str,
) -> Result<Vec<CityPopulationRecord>, PopulationError> {
    Ok(load(repo)?
        .into_iter()
        .filter(|record| names_match(&record.country, country))
        .collect())
}

/// Returns the `limit` most populous cities, largest first.
///
/// Cities with equal populations keep their file order.
///
/// # Errors
///
/// Returns [`PopulationError::InvalidPopulation`] if any population figure
/// is not an integer, or [`PopulationError::Store`] if the dataset cannot
/// be loaded.
pub fn top_by_population(
    repo: &Repository,
    limit: usize,
) -> Result<Vec<CityPopulationRecord>, PopulationError> {
    let mut counted = load(repo)?
        .into_iter()
        .map(|record| match record.population_count() {
            Ok(count) => Ok((count, record)),
            Err(_) => Err(PopulationError::InvalidPopulation {
                value: record.population.clone(),
                city: record.city,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    counted.sort_by(|(a, _), (b, _)| b.cmp(a));

    Ok(counted
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_explorer_store::MemorySource;
    use std::sync::Arc;

    fn record(city: &str, country: &str, population: &str) -> CityPopulationRecord {
        CityPopulationRecord {
            city: city.to_string(),
            country: country.to_string(),
            population: population.to_string(),
            population_proper: population.to_string(),
            admin_name: "Test".to_string(),
        }
    }

    fn repo_with(records: &[CityPopulationRecord]) -> Repository {
        let source = MemorySource::new()
            .with_json(StoreKey::Population, &records)
            .unwrap();
        Repository::new(Arc::new(source))
    }

    fn fixture() -> Repository {
        repo_with(&[
            record("Delhi", "India", "32226000"),
            record("Mumbai", "India", "24973000"),
            record("Kolkata", "India", "18502000"),
            record("Dhaka", "Bangladesh", "18627000"),
            record("Pune", "India", "24973000"),
        ])
    }

    #[test]
    fn lookup_ignores_case() {
        let repo = fixture();
        let lower = lookup(&repo, "mumbai").unwrap();
        let upper = lookup(&repo, "MUMBAI").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.city, "Mumbai");
    }

    #[test]
    fn lookup_unknown_city_is_not_found() {
        let err = lookup(&fixture(), "Atlantis").unwrap_err();
        assert!(matches!(err, PopulationError::NotFound { ref city } if city == "Atlantis"));
    }

    #[test]
    fn filter_by_country_ignores_case_and_keeps_order() {
        let cities: Vec<String> = filter_by_country(&fixture(), "INDIA")
            .unwrap()
            .into_iter()
            .map(|r| r.city)
            .collect();
        assert_eq!(cities, vec!["Delhi", "Mumbai", "Kolkata", "Pune"]);
    }

    #[test]
    fn filter_by_unknown_country_is_empty() {
        assert!(filter_by_country(&fixture(), "Narnia").unwrap().is_empty());
    }

    #[test]
    fn top_by_population_sorts_numerically_with_stable_ties() {
        let top: Vec<String> = top_by_population(&fixture(), 4)
            .unwrap()
            .into_iter()
            .map(|r| r.city)
            .collect();
        assert_eq!(top, vec!["Delhi", "Mumbai", "Pune", "Dhaka"]);
    }

    #[test]
    fn top_by_population_limit_larger_than_dataset() {
        assert_eq!(top_by_population(&fixture(), 100).unwrap().len(), 5);
    }

    #[test]
    fn top_by_population_rejects_non_numeric_figures() {
        let repo = repo_with(&[record("Delhi", "India", "lots")]);
        let err = top_by_population(&repo, 1).unwrap_err();
        assert!(matches!(err, PopulationError::InvalidPopulation { .. }));
    }

    #[test]
    fn populate_reports_count() {
        assert_eq!(populate(&fixture()).unwrap(), 5);
    }

    #[test]
    fn missing_dataset_surfaces_store_error() {
        let repo = Repository::new(Arc::new(MemorySource::new()));
        assert!(matches!(
            lookup(&repo, "Delhi").unwrap_err(),
            PopulationError::Store(StoreError::Missing { .. })
        ));
    }
}
