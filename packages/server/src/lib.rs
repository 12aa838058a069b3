#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the city explorer.
//!
//! Serves population and cost-of-living lookups, city guide queries, trip
//! cost estimates and itineraries, trip records, and safety reports. All
//! data lives in a directory of JSON files (see [`city_explorer_store`]);
//! datasets are reloaded on every request.

pub mod error;
mod handlers;
pub mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use city_explorer_safety::{DefaultTipGenerator, TipGenerator};
use city_explorer_store::Repository;

pub use error::ApiError;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Dataset and store access.
    pub repo: Repository,
    /// Advice source for trip safety assessments.
    pub tips: Arc<dyn TipGenerator>,
}

impl AppState {
    /// State backed by `repo` with the default tip rules.
    #[must_use]
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            tips: Arc::new(DefaultTipGenerator),
        }
    }
}

/// Where to listen and where the data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the JSON stores.
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, and `DATA_DIR`, falling back to
    /// `127.0.0.1`, `8080`, and the workspace `data/` directory.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            bind_addr,
            port,
            data_dir: city_explorer_store::paths::data_dir(),
        }
    }
}

/// Registers every route, plus JSON and query extractor configs that
/// report malformed input as `{"detail": ...}` with a 400.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(handlers::root))
    .route("/health", web::get().to(handlers::health))
    .service(
        web::scope("/population")
            .route("/populate", web::post().to(handlers::populate_population))
            .route("/city/{name}", web::get().to(handlers::city_population))
            .route("/country/{name}", web::get().to(handlers::country_population))
            .route("/largest-cities", web::get().to(handlers::largest_cities)),
    )
    .service(
        web::scope("/cost")
            .route("/populate", web::post().to(handlers::populate_cost))
            .route("/city/{name}", web::get().to(handlers::city_cost))
            .route("/most-expensive", web::get().to(handlers::most_expensive))
            .route("/cheapest", web::get().to(handlers::cheapest))
            .route("/best-value", web::get().to(handlers::best_value))
            .route("/compare", web::post().to(handlers::compare_costs)),
    )
    .service(
        web::scope("/costs")
            .route("/{city}", web::get().to(handlers::city_guide))
            .route("/{city}/transportation", web::get().to(handlers::transportation))
            .route("/{city}/food", web::get().to(handlers::food))
            .route("/{city}/accommodation", web::get().to(handlers::accommodation)),
    )
    .route("/attractions/{city}", web::get().to(handlers::attractions))
    .route(
        "/estimate-trip-cost/{city}",
        web::get().to(handlers::estimate_trip_cost),
    )
    .route(
        "/trip-suggestions/{city}",
        web::get().to(handlers::trip_suggestions),
    )
    .service(
        web::scope("/trips")
            .route("/", web::post().to(handlers::create_trip))
            .route("/{id}", web::put().to(handlers::update_trip))
            .route("/{id}/plan", web::post().to(handlers::plan_trip)),
    )
    .service(
        web::scope("/safety")
            .route("/reports/", web::post().to(handlers::create_safety_report))
            .route("/trips/", web::post().to(handlers::assess_trip_safety)),
    );
}

/// Starts the city explorer API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let repo = Repository::from_dir(&config.data_dir);
    log::info!("Serving data from {}", repo.describe());

    let state = web::Data::new(AppState::new(repo));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use city_explorer_store::{MemorySource, StoreKey};
    use serde_json::{Value, json};

    fn state() -> AppState {
        let population = json!([
            {"city": "Delhi", "country": "India", "population": "32226000",
             "population_proper": "16753235", "admin_name": "Delhi"},
            {"city": "Mumbai", "country": "India", "population": 24973000,
             "population_proper": "12478447", "admin_name": "Maharashtra"},
            {"city": "Dhaka", "country": "Bangladesh", "population": "22478000",
             "population_proper": "10356500", "admin_name": "Dhaka"}
        ]);
        let cost = json!([
            {"City": "Delhi", "Cost of Living Index": 22.5, "Rent Index": 5.4,
             "Cost of Living Plus Rent Index": 14.5, "Groceries Index": 24.1,
             "Restaurant Price Index": 17.3, "Local Purchasing Power Index": 75.0},
            {"City": "Mumbai", "Cost of Living Index": 25.0, "Rent Index": 12.9,
             "Cost of Living Plus Rent Index": 19.3, "Groceries Index": 26.0,
             "Restaurant Price Index": 20.1, "Local Purchasing Power Index": 80.0}
        ]);
        let cities = json!({
            "delhi": {
                "name": "Delhi",
                "country": "India",
                "currency": "INR",
                "transportation": {
                    "taxi": {"base_fare": 50, "typical_medium_trip": "200-300 INR"}
                },
                "food": {"budget_restaurant": "150-300 INR per person"},
                "accommodation": {"mid_range_hotel": "1000-2000 INR per night"},
                "neighborhoods": {
                    "connaught_place": {"name": "Connaught Place", "safety_rating": 4.2}
                },
                "attractions": {
                    "red_fort": {"name": "Red Fort", "entry_fee": "35 INR"}
                }
            }
        });

        let source = MemorySource::new()
            .with_json(StoreKey::Population, &population)
            .and_then(|s| s.with_json(StoreKey::CostOfLiving, &cost))
            .and_then(|s| s.with_json(StoreKey::Cities, &cities))
            .unwrap();
        AppState::new(Repository::new(Arc::new(source)))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!(state());
        let body: Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
                .await;
        assert_eq!(body["healthy"], true);
    }

    #[actix_web::test]
    async fn population_lookup_ignores_case() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/population/city/MUMBAI")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["city"], "Mumbai");
        assert_eq!(body["population"], "24973000");
    }

    #[actix_web::test]
    async fn unknown_city_is_404_with_detail() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/population/city/Atlantis")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("Atlantis"));
    }

    #[actix_web::test]
    async fn unknown_country_is_empty_list() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/population/country/Narnia")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn limit_out_of_range_is_400() {
        let app = app!(state());
        for uri in [
            "/population/largest-cities?limit=0",
            "/population/largest-cities?limit=101",
            "/cost/cheapest?limit=51",
            "/cost/best-value?limit=-1",
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn largest_cities_sorted_descending() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/population/largest-cities?limit=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["city"], "Delhi");
        assert_eq!(body[1]["city"], "Mumbai");
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn compare_requires_both_cities() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/cost/compare")
            .set_json(json!({"city1": "Delhi", "city2": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn compare_lists_available_on_miss() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/cost/compare")
            .set_json(json!({"city1": "Delhi", "city2": "Paris"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("Paris"), "{detail}");
        assert!(detail.contains("Delhi, Mumbai"), "{detail}");
    }

    #[actix_web::test]
    async fn compare_returns_six_metrics() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/cost/compare")
            .set_json(json!({"city1": "mumbai", "city2": "delhi"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let comparisons = body["comparisons"].as_array().unwrap();
        assert_eq!(comparisons.len(), 6);
        assert_eq!(comparisons[0]["metric"], "Cost of Living Index");
        assert_eq!(comparisons[0]["difference"], 2.5);
        assert_eq!(body["city1"]["city"], "Mumbai");
    }

    #[actix_web::test]
    async fn estimate_matches_worked_example() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/estimate-trip-cost/Delhi?days=3&travelers=2&accommodation_type=mid_range_hotel&food_preferences=budget_restaurant")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["estimated_costs"]["total"], 15300.0);
        assert_eq!(body["currency"], "INR");
    }

    #[actix_web::test]
    async fn guide_sections_and_missing_city() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/costs/delhi/transportation")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["taxi"]["typical_medium_trip"], "200-300 INR");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/attractions/goa").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn suggestions_cap_at_seven_days() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/trip-suggestions/delhi?days=12")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["itinerary"].as_array().unwrap().len(), 7);
        assert_eq!(body["itinerary"][0]["evening"], "Explore Connaught Place");
    }

    #[actix_web::test]
    async fn trip_create_update_plan() {
        let app = app!(state());
        let trip = json!({
            "user": "asha", "city": "delhi", "duration_days": 2,
            "trip_notes": "", "travel_mode": "taxi",
            "places_visited": [], "total_cost_estimate_inr": 0.0
        });

        let req = test::TestRequest::post().uri("/trips/").set_json(&trip).to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["trip_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/trips/{id}"))
            .set_json(json!({
                "trip_id": "ignored", "user": "asha", "city": "delhi", "duration_days": 3
            }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["trip_id"], id.as_str());
        assert_eq!(updated["duration_days"], 3);

        let req = test::TestRequest::post()
            .uri(&format!("/trips/{id}/plan?budget=100000&preferences=budget"))
            .to_request();
        let plan: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan["within_budget"], true);
        assert_eq!(plan["itinerary"].as_array().unwrap().len(), 3);
        assert_eq!(plan["travel_style"], "budget");
    }

    #[actix_web::test]
    async fn updating_unknown_trip_is_404() {
        let app = app!(state());
        let req = test::TestRequest::put()
            .uri("/trips/nope")
            .set_json(json!({"user": "asha", "city": "delhi", "duration_days": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn plan_rejects_unknown_style() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/trips/any/plan?preferences=lavish")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn safety_report_then_assessment() {
        let app = app!(state());
        for rating in [4, 2] {
            let req = test::TestRequest::post()
                .uri("/safety/reports/")
                .set_json(json!({
                    "city": "Delhi", "neighborhood": "Connaught Place",
                    "safety_rating": rating
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri("/safety/trips/")
            .set_json(json!({
                "city": "delhi",
                "neighborhoods": ["connaught place", "Paharganj"],
                "travel_mode": "walking"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["neighborhood_ratings"]["connaught place"], 3.0);
        assert_eq!(body["neighborhood_ratings"]["Paharganj"], 3.0);
        assert_eq!(body["overall_safety_rating"], 3.0);
    }

    #[actix_web::test]
    async fn out_of_range_rating_is_400() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/safety/reports/")
            .set_json(json!({"city": "Delhi", "neighborhood": "Saket", "safety_rating": 7}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains('7'));
    }

    #[actix_web::test]
    async fn malformed_body_is_400_with_detail() {
        let app = app!(state());
        let req = test::TestRequest::post()
            .uri("/trips/")
            .set_json(json!({"city": "delhi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"].is_string());
    }
}
