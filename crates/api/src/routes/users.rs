//! Player profile, availability and calendar handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::matches::CalendarQuery;
use domain::models::user::{AvailabilityRequest, AvailabilityResponse};
use domain::models::{AvailablePlayer, AvailablePlayersQuery, CalendarEntry, UpdateUserRequest, User};
use uuid::Uuid;
use validator::Validate;

use super::ensure_radius_within;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;

/// Only the user themselves may change or read their private views.
fn ensure_self(caller: Caller, user_id: Uuid) -> Result<(), ApiError> {
    if caller.user_id == user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You can only access your own profile".to_string(),
        ))
    }
}

/// GET /api/v1/users/available
///
/// Players open to invitations, measured from the caller's location.
pub async fn available_players(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<AvailablePlayersQuery>,
) -> Result<Json<Vec<AvailablePlayer>>, ApiError> {
    query.validate()?;
    ensure_radius_within(&state.config.discovery, query.max_distance_km)?;

    let players = state
        .discovery
        .available_players(caller.user_id, query)
        .await?;
    Ok(Json(players))
}

/// GET /api/v1/users/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    _caller: Caller,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.profile(user_id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/:user_id
pub async fn update_profile(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    ensure_self(caller, user_id)?;
    request.validate()?;

    let user = state.users.update_profile(user_id, request).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/:user_id/calendar
pub async fn calendar(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEntry>>, ApiError> {
    ensure_self(caller, user_id)?;

    let entries = state.discovery.calendar(user_id, query).await?;
    Ok(Json(entries))
}

/// PUT /api/v1/users/:user_id/availability
pub async fn set_availability(
    State(state): State<AppState>,
    caller: Caller,
    Path(user_id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    ensure_self(caller, user_id)?;

    let response = state
        .users
        .set_availability(user_id, request.available)
        .await?;
    Ok(Json(response))
}
