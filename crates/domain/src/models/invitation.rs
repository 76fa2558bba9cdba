//! Invitation domain model.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of an organizer's invitation to a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationState {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl InvitationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationState::Pending => "PENDING",
            InvitationState::Accepted => "ACCEPTED",
            InvitationState::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(InvitationState::Pending),
            "ACCEPTED" => Some(InvitationState::Accepted),
            "REJECTED" => Some(InvitationState::Rejected),
            _ => None,
        }
    }
}

/// An organizer's invitation for a player to join a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invitation {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub state: InvitationState,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Records the player's answer.
    pub fn answer(&mut self, accept: bool) {
        self.state = if accept {
            InvitationState::Accepted
        } else {
            InvitationState::Rejected
        };
        self.responded_at = Some(Utc::now());
    }
}

/// Fields persisted when an invitation is created.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub invited_at: DateTime<Utc>,
}

/// An invitation joined with the match it refers to.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationDetails {
    #[serde(flatten)]
    pub invitation: Invitation,
    pub match_title: String,
    pub match_starts_at: NaiveDateTime,
    pub match_location_text: String,
}

/// Request payload for inviting a player.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    pub player_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub invitation_id: Uuid,
    pub message: String,
}

/// Request payload for answering an invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

/// Query parameters for listing a player's invitations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInvitationsQuery {
    pub state: Option<InvitationState>,
}
