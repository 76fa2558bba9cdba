//! Participation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Participation, ParticipationState};

/// Database enum for participation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participation_state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStateDb {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl From<ParticipationStateDb> for ParticipationState {
    fn from(db: ParticipationStateDb) -> Self {
        match db {
            ParticipationStateDb::Pending => ParticipationState::Pending,
            ParticipationStateDb::Confirmed => ParticipationState::Confirmed,
            ParticipationStateDb::Rejected => ParticipationState::Rejected,
            ParticipationStateDb::Cancelled => ParticipationState::Cancelled,
        }
    }
}

impl From<ParticipationState> for ParticipationStateDb {
    fn from(state: ParticipationState) -> Self {
        match state {
            ParticipationState::Pending => ParticipationStateDb::Pending,
            ParticipationState::Confirmed => ParticipationStateDb::Confirmed,
            ParticipationState::Rejected => ParticipationStateDb::Rejected,
            ParticipationState::Cancelled => ParticipationStateDb::Cancelled,
        }
    }
}

/// Database row mapping for the participations table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipationEntity {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub state: ParticipationStateDb,
    pub requested_at: DateTime<Utc>,
}

impl From<ParticipationEntity> for Participation {
    fn from(entity: ParticipationEntity) -> Self {
        Self {
            id: entity.id,
            match_id: entity.match_id,
            player_id: entity.player_id,
            player_name: entity.player_name,
            state: entity.state.into(),
            requested_at: entity.requested_at,
        }
    }
}
