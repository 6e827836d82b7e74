//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::catalog::StationCatalog;
use crate::geocoding::Geocoder;
use crate::planner::OptimizeError;
use crate::routing::Directions;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<G, D, C>(state: AppState<G, D, C>) -> Router
where
    G: Geocoder + Send + Sync + 'static,
    D: Directions + Send + Sync + 'static,
    C: StationCatalog + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/optimize", post(optimize_route::<G, D, C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Plan fuel stops between two locations.
async fn optimize_route<G, D, C>(
    State(state): State<AppState<G, D, C>>,
    body: Bytes,
) -> Result<Response, AppError>
where
    G: Geocoder + Send + Sync + 'static,
    D: Directions + Send + Sync + 'static,
    C: StationCatalog + Send + Sync + 'static,
{
    // Parse JSON manually so we can log the body on failure
    let req: OptimizeRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let locations = req
        .validate()
        .map_err(|errors| AppError::Validation { errors })?;

    let result = state
        .optimizer
        .optimize(&locations.start, &locations.end)
        .await?;

    Ok(Json(OptimizeResponse::from_result(&result)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Validation { errors: ValidationErrors },
    Internal { message: String },
}

impl From<OptimizeError> for AppError {
    fn from(e: OptimizeError) -> Self {
        match e {
            OptimizeError::Internal { context } => AppError::Internal { message: context },
            client => AppError::BadRequest {
                message: client.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Validation { errors } => {
                warn!(?errors, "request failed validation");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response()
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                let body = Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
