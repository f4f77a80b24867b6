//! Admin Travel Request Routes
//!
//! Administration surface: list and inspect every request, and set any
//! status. The status value arrives as a string and is validated against
//! the closed set before it reaches the engine.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{Principal, Role};
use crate::travel::{
    ListParams, Page, TravelError, TravelRequest, TravelRequestStatus, ValidationErrors,
};

use super::response::{auth_error, travel_error, ApiError};
use super::state::AppState;

/// Routes under `/admin/travel-request`
pub fn admin_travel_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/travel-request/all", get(index_handler))
        .route("/admin/travel-request/:id/details", get(show_handler))
        .route("/admin/travel-request/:id/update", patch(update_handler))
        .with_state(state)
}

/// Status update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

impl UpdateStatusBody {
    /// Validate against the closed status set
    fn parse(&self) -> Result<TravelRequestStatus, TravelError> {
        TravelRequestStatus::parse(&self.status).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add(
                "status",
                format!(
                    "The status must be one of: {}.",
                    TravelRequestStatus::VALUES.join(", ")
                ),
            );
            TravelError::Validation(errors)
        })
    }
}

fn authenticate_admin(state: &AppState, headers: &HeaderMap) -> Result<Principal, ApiError> {
    let principal = state.authenticate(headers).map_err(auth_error)?;
    principal
        .require_role(Role::Admin)
        .map_err(auth_error)?;
    Ok(principal)
}

async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Page<TravelRequest>>), ApiError> {
    let principal = authenticate_admin(&state, &headers)?;

    let page = state
        .travel
        .list(&principal, params)
        .map_err(travel_error)?;

    Ok((StatusCode::OK, Json(page)))
}

async fn show_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<TravelRequest>), ApiError> {
    let principal = authenticate_admin(&state, &headers)?;

    let request = state
        .travel
        .details(&principal, id)
        .map_err(travel_error)?;

    Ok((StatusCode::OK, Json(request)))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<(StatusCode, Json<TravelRequest>), ApiError> {
    let principal = authenticate_admin(&state, &headers)?;
    let status = body.parse().map_err(travel_error)?;

    let request = state
        .travel
        .update_status(&principal, id, status)
        .map_err(travel_error)?;

    Ok((StatusCode::OK, Json(request)))
}
