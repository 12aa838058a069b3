//! Mapping from domain errors to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use city_explorer_cost::CostError;
use city_explorer_guide::GuideError;
use city_explorer_population::PopulationError;
use city_explorer_safety::SafetyError;
use city_explorer_server_models::ApiErrorBody;
use city_explorer_store::StoreError;
use city_explorer_trips::TripError;
use thiserror::Error;

/// Message returned for every 500; the real cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// An error that can be returned from any handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 with a caller-facing message.
    #[error("{0}")]
    NotFound(String),

    /// 400 with a caller-facing message.
    #[error("{0}")]
    BadRequest(String),

    /// 500. The message is logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            Self::NotFound(message) | Self::BadRequest(message) => message.clone(),
            Self::Internal(message) => {
                log::error!("{message}");
                INTERNAL_ERROR_DETAIL.to_string()
            }
        };
        HttpResponse::build(self.status_code()).json(ApiErrorBody { detail })
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<PopulationError> for ApiError {
    fn from(e: PopulationError) -> Self {
        match e {
            PopulationError::NotFound { .. } => Self::NotFound(e.to_string()),
            PopulationError::InvalidPopulation { .. } | PopulationError::Store(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<CostError> for ApiError {
    fn from(e: CostError) -> Self {
        match e {
            CostError::NotFound { .. } => Self::NotFound(e.to_string()),
            CostError::Store(e) => e.into(),
        }
    }
}

impl From<GuideError> for ApiError {
    fn from(e: GuideError) -> Self {
        match e {
            GuideError::CityNotFound { .. } => Self::NotFound(e.to_string()),
            GuideError::Store(e) => e.into(),
        }
    }
}

impl From<SafetyError> for ApiError {
    fn from(e: SafetyError) -> Self {
        match e {
            SafetyError::InvalidRating(_) | SafetyError::MissingField { .. } => {
                Self::BadRequest(e.to_string())
            }
            SafetyError::Store(e) => e.into(),
        }
    }
}

impl From<TripError> for ApiError {
    fn from(e: TripError) -> Self {
        match e {
            TripError::NotFound { .. } => Self::NotFound(e.to_string()),
            TripError::Guide(e) => e.into(),
            TripError::Store(e) => e.into(),
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        Self::Internal(format!("Blocking task failed: {e}"))
    }
}
