//! HTTP handler functions for the city explorer API.
//!
//! Every dataset access is file I/O, so handler bodies run on the blocking
//! thread pool via [`web::block`].

use actix_web::{HttpResponse, web};
use city_explorer_guide::TripCostQuery;
use city_explorer_server_models::{
    ApiCitiesComparison, ApiCityCost, ApiCityPopulation, ApiHealth, ApiTripCostEstimate,
    ApiTripPlan, ApiTripSuggestions, ApiValueCity, CompareRequest, EstimateQuery, LimitQuery,
    Message, PlanQuery, PopulateResponse, SuggestionsQuery,
};
use city_explorer_trip_models::{NewSafetyReport, NewTrip, SafetyTripRequest};
use city_explorer_trips::TravelStyle;

use crate::AppState;
use crate::error::ApiError;

/// Default `limit` for ranked listings.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest `limit` accepted by `/population/largest-cities`.
pub const MAX_POPULATION_LIMIT: i64 = 100;

/// Largest `limit` accepted by the cost rankings.
pub const MAX_COST_LIMIT: i64 = 50;

async fn blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    web::block(f).await?.map_err(Into::into)
}

fn checked_limit(query: LimitQuery, max: i64) -> Result<usize, ApiError> {
    let out_of_range = || ApiError::BadRequest(format!("limit must be between 1 and {max}"));
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=max).contains(&limit) {
        return Err(out_of_range());
    }
    usize::try_from(limit).map_err(|_| out_of_range())
}

/// `GET /`
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(Message {
        message: "Welcome to the City Explorer API".to_string(),
    })
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ── Population ──────────────────────────────────────────

/// `POST /population/populate`
pub async fn populate_population(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let records = blocking(move || city_explorer_population::populate(&repo)).await?;
    Ok(HttpResponse::Ok().json(PopulateResponse {
        status: "success".to_string(),
        message: "Population data populated successfully".to_string(),
        records,
    }))
}

/// `GET /population/city/{name}`
pub async fn city_population(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let record = blocking(move || city_explorer_population::lookup(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(ApiCityPopulation::from(record)))
}

/// `GET /population/country/{name}`
///
/// An unknown country returns an empty list.
pub async fn country_population(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let country = path.into_inner();
    let records =
        blocking(move || city_explorer_population::filter_by_country(&repo, &country)).await?;
    let cities: Vec<ApiCityPopulation> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(cities))
}

/// `GET /population/largest-cities?limit=`
pub async fn largest_cities(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = checked_limit(query.into_inner(), MAX_POPULATION_LIMIT)?;
    let repo = state.repo.clone();
    let records =
        blocking(move || city_explorer_population::top_by_population(&repo, limit)).await?;
    let cities: Vec<ApiCityPopulation> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(cities))
}

// ── Cost of living ──────────────────────────────────────

/// `POST /cost/populate`
pub async fn populate_cost(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let records = blocking(move || city_explorer_cost::populate(&repo)).await?;
    Ok(HttpResponse::Ok().json(PopulateResponse {
        status: "success".to_string(),
        message: "Cost of living data populated successfully".to_string(),
        records,
    }))
}

/// `GET /cost/city/{name}`
pub async fn city_cost(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let record = blocking(move || city_explorer_cost::lookup(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(ApiCityCost::from(record)))
}

async fn ranked(
    state: web::Data<AppState>,
    query: LimitQuery,
    direction: city_explorer_cost::RankDirection,
) -> Result<HttpResponse, ApiError> {
    let limit = checked_limit(query, MAX_COST_LIMIT)?;
    let repo = state.repo.clone();
    let records = blocking(move || city_explorer_cost::rank(&repo, direction, limit)).await?;
    let cities: Vec<ApiCityCost> = records.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(cities))
}

/// `GET /cost/most-expensive?limit=`
pub async fn most_expensive(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    ranked(
        state,
        query.into_inner(),
        city_explorer_cost::RankDirection::MostExpensive,
    )
    .await
}

/// `GET /cost/cheapest?limit=`
pub async fn cheapest(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    ranked(
        state,
        query.into_inner(),
        city_explorer_cost::RankDirection::Cheapest,
    )
    .await
}

/// `GET /cost/best-value?limit=`
pub async fn best_value(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = checked_limit(query.into_inner(), MAX_COST_LIMIT)?;
    let repo = state.repo.clone();
    let ranked = blocking(move || city_explorer_cost::best_value(&repo, limit)).await?;
    let cities: Vec<ApiValueCity> = ranked.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(cities))
}

/// `POST /cost/compare`
pub async fn compare_costs(
    state: web::Data<AppState>,
    body: web::Json<CompareRequest>,
) -> Result<HttpResponse, ApiError> {
    let CompareRequest { city1, city2 } = body.into_inner();
    let (Some(city1), Some(city2)) = (
        city1.filter(|c| !c.trim().is_empty()),
        city2.filter(|c| !c.trim().is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Both city1 and city2 are required".to_string(),
        ));
    };

    let repo = state.repo.clone();
    let comparison =
        blocking(move || city_explorer_cost::compare(&repo, &city1, &city2)).await?;
    Ok(HttpResponse::Ok().json(ApiCitiesComparison::from(comparison)))
}

// ── City guide ──────────────────────────────────────────

/// `GET /costs/{city}`
pub async fn city_guide(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let guide = blocking(move || city_explorer_guide::city_guide(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(guide))
}

/// `GET /costs/{city}/transportation`
pub async fn transportation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let fares = blocking(move || city_explorer_guide::transportation(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(fares))
}

/// `GET /costs/{city}/food`
pub async fn food(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let tiers = blocking(move || city_explorer_guide::food(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(tiers))
}

/// `GET /costs/{city}/accommodation`
pub async fn accommodation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let tiers = blocking(move || city_explorer_guide::accommodation(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(tiers))
}

/// `GET /attractions/{city}`
pub async fn attractions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let attractions = blocking(move || city_explorer_guide::attractions(&repo, &city)).await?;
    Ok(HttpResponse::Ok().json(attractions))
}

/// `GET /estimate-trip-cost/{city}?days=&travelers=&accommodation_type=&food_preferences=`
pub async fn estimate_trip_cost(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<EstimateQuery>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let EstimateQuery {
        days,
        travelers,
        accommodation_type,
        food_preferences,
    } = query.into_inner();
    let query = TripCostQuery {
        days,
        travelers,
        accommodation_type,
        food_preferences,
    };
    let estimate =
        blocking(move || city_explorer_guide::estimate_trip_cost(&repo, &city, &query)).await?;
    Ok(HttpResponse::Ok().json(ApiTripCostEstimate::from(estimate)))
}

/// `GET /trip-suggestions/{city}?days=`
pub async fn trip_suggestions(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SuggestionsQuery>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let city = path.into_inner();
    let days = query.days;
    let suggestions =
        blocking(move || city_explorer_guide::trip_suggestions(&repo, &city, days)).await?;
    Ok(HttpResponse::Ok().json(ApiTripSuggestions::from(suggestions)))
}

// ── Trips ───────────────────────────────────────────────

/// `POST /trips/`
pub async fn create_trip(
    state: web::Data<AppState>,
    body: web::Json<NewTrip>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let new = body.into_inner();
    let trip = blocking(move || city_explorer_trips::create_trip(&repo, new)).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/// `PUT /trips/{id}`
pub async fn update_trip(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewTrip>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let trip_id = path.into_inner();
    let new = body.into_inner();
    let trip = blocking(move || city_explorer_trips::update_trip(&repo, &trip_id, new)).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/// `POST /trips/{id}/plan?budget=&preferences=`
pub async fn plan_trip(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PlanQuery>,
) -> Result<HttpResponse, ApiError> {
    let PlanQuery {
        budget,
        preferences,
    } = query.into_inner();
    let style = match preferences.as_deref().map(str::trim) {
        None | Some("") => TravelStyle::default(),
        Some(text) => text.parse().map_err(|_| {
            ApiError::BadRequest(format!(
                "Unknown travel style '{text}': expected budget, mid_range, or luxury"
            ))
        })?,
    };

    let repo = state.repo.clone();
    let trip_id = path.into_inner();
    let plan =
        blocking(move || city_explorer_trips::plan_trip(&repo, &trip_id, budget, style)).await?;
    Ok(HttpResponse::Ok().json(ApiTripPlan::from(plan)))
}

// ── Safety ──────────────────────────────────────────────

/// `POST /safety/reports/`
pub async fn create_safety_report(
    state: web::Data<AppState>,
    body: web::Json<NewSafetyReport>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let new = body.into_inner();
    let report = blocking(move || city_explorer_safety::create_report(&repo, new)).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// `POST /safety/trips/`
pub async fn assess_trip_safety(
    state: web::Data<AppState>,
    body: web::Json<SafetyTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let repo = state.repo.clone();
    let tips = state.tips.clone();
    let request = body.into_inner();
    let assessment =
        blocking(move || city_explorer_safety::assess_trip(&repo, tips.as_ref(), request))
            .await?;
    Ok(HttpResponse::Ok().json(assessment))
}
