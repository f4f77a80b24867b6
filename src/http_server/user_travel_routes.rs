//! User Travel Request Routes
//!
//! Self-service surface: create a request, list and inspect own requests,
//! and cancel a pending one. Every handler authenticates the bearer token
//! and gates on `Role::User`.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post},
    Router,
};
use uuid::Uuid;

use crate::auth::{Principal, Role};
use crate::travel::{ListParams, NewTravelRequest, Page, TravelRequest};

use super::response::{auth_error, travel_error, ApiError};
use super::state::AppState;

/// Routes under `/user/travel-request`
pub fn user_travel_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/user/travel-request/create", post(create_handler))
        .route("/user/travel-request/all", get(index_handler))
        .route("/user/travel-request/:id/details", get(show_handler))
        .route("/user/travel-request/:id/cancel", patch(cancel_handler))
        .with_state(state)
}

fn authenticate_user(state: &AppState, headers: &HeaderMap) -> Result<Principal, ApiError> {
    let principal = state.authenticate(headers).map_err(auth_error)?;
    principal
        .require_role(Role::User)
        .map_err(auth_error)?;
    Ok(principal)
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewTravelRequest>,
) -> Result<(StatusCode, Json<TravelRequest>), ApiError> {
    let principal = authenticate_user(&state, &headers)?;

    let request = state
        .travel
        .create(&principal, payload)
        .map_err(travel_error)?;

    Ok((StatusCode::CREATED, Json(request)))
}

async fn index_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Page<TravelRequest>>), ApiError> {
    let principal = authenticate_user(&state, &headers)?;

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
    let principal = authenticate_user(&state, &headers)?;

    let request = state
        .travel
        .details(&principal, id)
        .map_err(travel_error)?;

    Ok((StatusCode::OK, Json(request)))
}

async fn cancel_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<TravelRequest>), ApiError> {
    let principal = authenticate_user(&state, &headers)?;

    let request = state
        .travel
        .cancel(&principal, id)
        .map_err(travel_error)?;

    Ok((StatusCode::OK, Json(request)))
}
