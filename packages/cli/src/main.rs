#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line interface for the city explorer.
//!
//! ```text
//! city_explorer population city <name>
//! city_explorer population largest [--limit 10]
//! city_explorer cost compare <city1> <city2>
//! city_explorer estimate <city> --days 3 --travelers 2
//! city_explorer suggest <city> --days 4
//! city_explorer serve [--interactive]
//! ```
//!
//! Query commands print the same JSON the HTTP API returns.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use city_explorer_cost::RankDirection;
use city_explorer_guide::TripCostQuery;
use city_explorer_server::ServerConfig;
use city_explorer_server_models::{
    ApiCitiesComparison, ApiCityCost, ApiCityPopulation, ApiTripCostEstimate,
    ApiTripSuggestions, ApiValueCity,
};
use city_explorer_store::Repository;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "city_explorer",
    about = "City population, cost of living, and trip planning"
)]
struct Cli {
    /// Directory holding the JSON datasets and stores
    #[arg(long, global = true, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Population lookups
    Population {
        #[command(subcommand)]
        command: PopulationCommand,
    },
    /// Cost-of-living lookups and rankings
    Cost {
        #[command(subcommand)]
        command: CostCommand,
    },
    /// Estimate the cost of a trip
    Estimate {
        /// City key (e.g. `delhi`)
        city: String,
        /// Trip length in days
        #[arg(long)]
        days: u32,
        /// Number of travelers
        #[arg(long, default_value_t = 1)]
        travelers: u32,
        /// Accommodation tier
        #[arg(long, default_value = "mid_range_hotel")]
        accommodation_type: String,
        /// Food tier
        #[arg(long, default_value = "budget_restaurant")]
        food_preferences: String,
    },
    /// Suggest a day-by-day itinerary
    Suggest {
        /// City key (e.g. `delhi`)
        city: String,
        /// Trip length in days (itineraries stop at 7)
        #[arg(long)]
        days: u32,
    },
    /// Start the HTTP API server
    Serve {
        /// Prompt for bind address, port, and data directory
        #[arg(long)]
        interactive: bool,
    },
}

#[derive(Subcommand)]
enum PopulationCommand {
    /// Look up one city
    City { name: String },
    /// List every city in a country
    Country { name: String },
    /// Largest cities by population
    Largest {
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=100))]
        limit: u16,
    },
}

#[derive(Subcommand)]
enum CostCommand {
    /// Look up one city
    City { name: String },
    /// Highest cost-of-living index first
    MostExpensive {
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=50))]
        limit: u16,
    },
    /// Lowest cost-of-living index first
    Cheapest {
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=50))]
        limit: u16,
    },
    /// Highest purchasing power per unit of cost first
    BestValue {
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..=50))]
        limit: u16,
    },
    /// Compare two cities across every index
    Compare { city1: String, city2: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_population(
    repo: &Repository,
    command: PopulationCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        PopulationCommand::City { name } => {
            let record = city_explorer_population::lookup(repo, &name)?;
            print_json(&ApiCityPopulation::from(record))?;
        }
        PopulationCommand::Country { name } => {
            let cities: Vec<ApiCityPopulation> =
                city_explorer_population::filter_by_country(repo, &name)?
                    .into_iter()
                    .map(Into::into)
                    .collect();
            if cities.is_empty() {
                log::warn!("No cities found for {name}");
            }
            print_json(&cities)?;
        }
        PopulationCommand::Largest { limit } => {
            let cities: Vec<ApiCityPopulation> =
                city_explorer_population::top_by_population(repo, usize::from(limit))?
                    .into_iter()
                    .map(Into::into)
                    .collect();
            print_json(&cities)?;
        }
    }
    Ok(())
}

fn run_cost(repo: &Repository, command: CostCommand) -> Result<(), Box<dyn std::error::Error>> {
    let ranked = |direction, limit: u16| -> Result<Vec<ApiCityCost>, city_explorer_cost::CostError> {
        Ok(city_explorer_cost::rank(repo, direction, usize::from(limit))?
            .into_iter()
            .map(Into::into)
            .collect())
    };

    match command {
        CostCommand::City { name } => {
            print_json(&ApiCityCost::from(city_explorer_cost::lookup(repo, &name)?))?;
        }
        CostCommand::MostExpensive { limit } => {
            print_json(&ranked(RankDirection::MostExpensive, limit)?)?;
        }
        CostCommand::Cheapest { limit } => {
            print_json(&ranked(RankDirection::Cheapest, limit)?)?;
        }
        CostCommand::BestValue { limit } => {
            let cities: Vec<ApiValueCity> =
                city_explorer_cost::best_value(repo, usize::from(limit))?
                    .into_iter()
                    .map(Into::into)
                    .collect();
            print_json(&cities)?;
        }
        CostCommand::Compare { city1, city2 } => {
            let comparison = city_explorer_cost::compare(repo, &city1, &city2)?;
            print_json(&ApiCitiesComparison::from(comparison))?;
        }
    }
    Ok(())
}

fn serve(config: ServerConfig, interactive: bool) -> std::io::Result<()> {
    actix_web::rt::System::new().block_on(async move {
        if interactive {
            city_explorer_server::interactive::run(config).await
        } else {
            city_explorer_server::run_server(config).await
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(city_explorer_store::paths::default_data_dir);
    let repo = Repository::from_dir(&data_dir);
    log::debug!("Using {}", repo.describe());

    match cli.command {
        Commands::Population { command } => run_population(&repo, command)?,
        Commands::Cost { command } => run_cost(&repo, command)?,
        Commands::Estimate {
            city,
            days,
            travelers,
            accommodation_type,
            food_preferences,
        } => {
            let query = TripCostQuery {
                days,
                travelers,
                accommodation_type,
                food_preferences,
            };
            let estimate = city_explorer_guide::estimate_trip_cost(&repo, &city, &query)?;
            print_json(&ApiTripCostEstimate::from(estimate))?;
        }
        Commands::Suggest { city, days } => {
            let suggestions = city_explorer_guide::trip_suggestions(&repo, &city, days)?;
            print_json(&ApiTripSuggestions::from(suggestions))?;
        }
        Commands::Serve { interactive } => {
            let config = ServerConfig {
                data_dir,
                ..ServerConfig::from_env()
            };
            serve(config, interactive)?;
        }
    }

    Ok(())
}
