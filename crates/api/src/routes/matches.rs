//! Match endpoint handlers: lifecycle, search and roster.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::participation::{JoinRequest, JoinResponse, LeaveResponse, ManageResponse};
use domain::models::{
    CreateMatchRequest, Match, MatchDetail, MatchMessage, MatchSearchQuery, MatchSearchResult,
    Participation, ParticipationAction, UpdateMatchRequest,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::ensure_radius_within;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::middleware::metrics::record_roster_event;

/// POST /api/v1/matches
pub async fn create_match(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    request.validate()?;

    let created = state.matches.create(caller.user_id, request).await?;

    info!(
        match_id = %created.id,
        organizer_id = %caller.user_id,
        "Match created via API"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/matches/search
pub async fn search_matches(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<MatchSearchQuery>,
) -> Result<Json<Vec<MatchSearchResult>>, ApiError> {
    query.validate()?;
    ensure_radius_within(&state.config.discovery, query.max_distance_km)?;

    let results = state.discovery.search_matches(caller.user_id, query).await?;
    Ok(Json(results))
}

/// GET /api/v1/matches/:match_id
pub async fn get_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchDetail>, ApiError> {
    let detail = state.matches.detail(match_id, caller.user_id).await?;
    Ok(Json(detail))
}

/// PUT /api/v1/matches/:match_id
///
/// Returns the refreshed match detail.
pub async fn update_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<Json<MatchDetail>, ApiError> {
    request.validate()?;

    state
        .matches
        .update(match_id, caller.user_id, request)
        .await?;
    let detail = state.matches.detail(match_id, caller.user_id).await?;
    Ok(Json(detail))
}

/// DELETE /api/v1/matches/:match_id
pub async fn delete_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchMessage>, ApiError> {
    let response = state.matches.delete(match_id, caller.user_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/matches/:match_id/join
///
/// The body is optional; private matches need `{"password": "..."}`.
pub async fn join_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
    body: Option<Json<JoinRequest>>,
) -> Result<(StatusCode, Json<JoinResponse>), ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    let response = state
        .roster
        .join(match_id, caller.user_id, request.password.as_deref())
        .await?;
    record_roster_event("join");

    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/v1/matches/:match_id/participation
pub async fn leave_match(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
) -> Result<Json<LeaveResponse>, ApiError> {
    let response = state.roster.leave(match_id, caller.user_id).await?;
    record_roster_event("leave");
    Ok(Json(response))
}

/// GET /api/v1/matches/:match_id/participants
///
/// Active roster, confirmed players first.
pub async fn list_participants(
    State(state): State<AppState>,
    _caller: Caller,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Vec<Participation>>, ApiError> {
    let roster = state.roster.participants(match_id).await?;
    Ok(Json(roster))
}

/// POST /api/v1/matches/:match_id/participants/:participation_id/:action
///
/// `action` is one of `approve`, `reject` or `expel`.
pub async fn manage_participant(
    State(state): State<AppState>,
    caller: Caller,
    Path((match_id, participation_id, action)): Path<(Uuid, Uuid, String)>,
) -> Result<Json<ManageResponse>, ApiError> {
    let action: ParticipationAction = action.parse().map_err(ApiError::validation)?;

    let response = state
        .roster
        .manage(match_id, participation_id, caller.user_id, action)
        .await?;
    record_roster_event(match action {
        ParticipationAction::Approve => "approve",
        ParticipationAction::Reject => "reject",
        ParticipationAction::Expel => "expel",
    });

    Ok(Json(response))
}
