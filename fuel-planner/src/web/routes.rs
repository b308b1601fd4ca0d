//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::geocode::GeocodeProvider;
use crate::routing::RouteSource;
use crate::service::PlanError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<G, R>(state: AppState<G, R>, static_dir: &str) -> Router
where
    G: GeocodeProvider + 'static,
    R: RouteSource + 'static,
{
    Router::new()
        .route("/", get(index_page::<G, R>))
        .route("/health", get(health))
        .route("/route", get(plan_route::<G, R>))
        .route("/route/", get(plan_route::<G, R>))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the map.
async fn index_page<G, R>(State(state): State<AppState<G, R>>) -> impl IntoResponse
where
    G: GeocodeProvider + 'static,
    R: RouteSource + 'static,
{
    let config = state.service.config();
    Html(
        IndexTemplate {
            interval_miles: config.interval_miles,
            mpg: config.mpg,
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Plan fuel stops between two places.
async fn plan_route<G, R>(
    State(state): State<AppState<G, R>>,
    Query(req): Query<RouteRequest>,
) -> Result<PrettyJson<TripResponse>, AppError>
where
    G: GeocodeProvider + 'static,
    R: RouteSource + 'static,
{
    let (start, finish) = required_places(&req)?;
    info!(start, finish, "planning route");

    let trip = state.service.plan(start, finish).await?;
    info!(
        miles = trip.distance_miles,
        stops = trip.stops.len(),
        cost = trip.total_cost,
        "route planned"
    );

    Ok(PrettyJson(TripResponse::from_trip(&trip)))
}

/// Both places as given. Absent or empty parameters are rejected.
fn required_places(req: &RouteRequest) -> Result<(&str, &str), AppError> {
    match (req.start.as_deref(), req.finish.as_deref()) {
        (Some(start), Some(finish)) if !start.is_empty() && !finish.is_empty() => {
            Ok((start, finish))
        }
        _ => Err(PlanError::MissingPlace.into()),
    }
}

/// JSON body serialized with indentation.
#[derive(Debug)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(e) => AppError::Internal {
                message: format!("failed to serialize response: {e}"),
            }
            .into_response(),
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        if e.is_client_error() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(reason = %message, "rejected route request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(reason = %message, "route planning failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
