//! Invitation endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::invitation::{
    InviteRequest, InviteResponse, ListInvitationsQuery, RespondRequest,
};
use domain::models::{InvitationDetails, MatchMessage};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Caller;
use crate::middleware::metrics::record_roster_event;

/// POST /api/v1/matches/:match_id/invitations
pub async fn invite_player(
    State(state): State<AppState>,
    caller: Caller,
    Path(match_id): Path<Uuid>,
    Json(request): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), ApiError> {
    let response = state
        .invitations
        .invite(match_id, request.player_id, caller.user_id)
        .await?;
    record_roster_event("invite");

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/invitations?state=PENDING
///
/// Lists the caller's invitations; pending ones when no state is given.
pub async fn list_invitations(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<Json<Vec<InvitationDetails>>, ApiError> {
    let invitations = state
        .invitations
        .list_for_player(caller.user_id, query.state)
        .await?;
    Ok(Json(invitations))
}

/// POST /api/v1/invitations/:invitation_id/respond
pub async fn respond_invitation(
    State(state): State<AppState>,
    caller: Caller,
    Path(invitation_id): Path<Uuid>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<MatchMessage>, ApiError> {
    let response = state
        .invitations
        .respond(invitation_id, caller.user_id, request.accept)
        .await?;
    record_roster_event(if request.accept { "accept" } else { "decline" });

    Ok(Json(response))
}
