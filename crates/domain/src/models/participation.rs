//! Participation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// State of a player's place on a match roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationState {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl ParticipationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationState::Pending => "PENDING",
            ParticipationState::Confirmed => "CONFIRMED",
            ParticipationState::Rejected => "REJECTED",
            ParticipationState::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ParticipationState::Pending),
            "CONFIRMED" => Some(ParticipationState::Confirmed),
            "REJECTED" => Some(ParticipationState::Rejected),
            "CANCELLED" => Some(ParticipationState::Cancelled),
            _ => None,
        }
    }

    /// Pending and confirmed rows hold (or wait for) a roster place.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ParticipationState::Pending | ParticipationState::Confirmed
        )
    }
}

impl fmt::Display for ParticipationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player's request for, or holding of, a place in a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participation {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub state: ParticipationState,
    pub requested_at: DateTime<Utc>,
}

/// Fields persisted when a participation row is created.
#[derive(Debug, Clone)]
pub struct NewParticipation {
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub state: ParticipationState,
    pub requested_at: DateTime<Utc>,
}

impl NewParticipation {
    pub fn new(match_id: Uuid, player_id: Uuid, player_name: &str, state: ParticipationState) -> Self {
        Self {
            match_id,
            player_id,
            player_name: player_name.to_string(),
            state,
            requested_at: Utc::now(),
        }
    }
}

/// Orders an active roster: confirmed before pending, then oldest request first.
pub fn order_roster(participations: &mut [Participation]) {
    participations.sort_by(|a, b| {
        let rank = |p: &Participation| match p.state {
            ParticipationState::Confirmed => 0,
            _ => 1,
        };
        rank(a)
            .cmp(&rank(b))
            .then_with(|| a.requested_at.cmp(&b.requested_at))
    });
}

/// Organizer decision on a participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationAction {
    Approve,
    Reject,
    Expel,
}

impl FromStr for ParticipationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ParticipationAction::Approve),
            "reject" => Ok(ParticipationAction::Reject),
            "expel" => Ok(ParticipationAction::Expel),
            other => Err(format!(
                "Unknown action '{other}'. Expected approve, reject or expel"
            )),
        }
    }
}

impl fmt::Display for ParticipationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParticipationAction::Approve => "approve",
            ParticipationAction::Reject => "reject",
            ParticipationAction::Expel => "expel",
        };
        f.write_str(name)
    }
}

/// Roster occupancy of a match.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RosterCounts {
    pub confirmed: i64,
    pub pending: i64,
    pub capacity: i32,
}

impl RosterCounts {
    pub fn is_full(&self) -> bool {
        self.confirmed >= i64::from(self.capacity)
    }
}

/// Request payload for joining a match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinRequest {
    pub password: Option<String>,
}

/// Response payload after a join request.
#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub message: String,
    pub match_id: Uuid,
    pub state: ParticipationState,
    #[serde(flatten)]
    pub counts: RosterCounts,
}

/// Response payload after an organizer decision.
#[derive(Debug, Clone, Serialize)]
pub struct ManageResponse {
    pub message: String,
    pub match_id: Uuid,
    #[serde(flatten)]
    pub counts: RosterCounts,
}

/// Response payload after a player leaves a match.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveResponse {
    pub message: String,
    pub match_id: Uuid,
    pub previous_state: ParticipationState,
    #[serde(flatten)]
    pub counts: RosterCounts,
}
