//! Invitation entity (database row mapping).

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Invitation, InvitationDetails, InvitationState};

/// Database enum for invitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStateDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<InvitationStateDb> for InvitationState {
    fn from(db: InvitationStateDb) -> Self {
        match db {
            InvitationStateDb::Pending => InvitationState::Pending,
            InvitationStateDb::Accepted => InvitationState::Accepted,
            InvitationStateDb::Rejected => InvitationState::Rejected,
        }
    }
}

impl From<InvitationState> for InvitationStateDb {
    fn from(state: InvitationState) -> Self {
        match state {
            InvitationState::Pending => InvitationStateDb::Pending,
            InvitationState::Accepted => InvitationStateDb::Accepted,
            InvitationState::Rejected => InvitationStateDb::Rejected,
        }
    }
}

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub state: InvitationStateDb,
    pub invited_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<InvitationEntity> for Invitation {
    fn from(entity: InvitationEntity) -> Self {
        Self {
            id: entity.id,
            match_id: entity.match_id,
            player_id: entity.player_id,
            state: entity.state.into(),
            invited_at: entity.invited_at,
            responded_at: entity.responded_at,
        }
    }
}

/// An invitation row joined with the title, start and place of its match.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationDetailsEntity {
    #[sqlx(flatten)]
    pub invitation: InvitationEntity,
    pub match_title: String,
    pub match_starts_at: NaiveDateTime,
    pub match_location_text: String,
}

impl From<InvitationDetailsEntity> for InvitationDetails {
    fn from(entity: InvitationDetailsEntity) -> Self {
        Self {
            invitation: entity.invitation.into(),
            match_title: entity.match_title,
            match_starts_at: entity.match_starts_at,
            match_location_text: entity.match_location_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_invitation_details_to_domain() {
        let entity = InvitationDetailsEntity {
            invitation: InvitationEntity {
                id: Uuid::new_v4(),
                match_id: Uuid::new_v4(),
                player_id: Uuid::new_v4(),
                state: InvitationStateDb::Accepted,
                invited_at: Utc::now(),
                responded_at: Some(Utc::now()),
            },
            match_title: "Sunday eleven".to_string(),
            match_starts_at: NaiveDate::from_ymd_opt(2030, 8, 4)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            match_location_text: "Costanera".to_string(),
        };
        let details: InvitationDetails = entity.clone().into();

        assert_eq!(details.invitation.id, entity.invitation.id);
        assert_eq!(details.invitation.state, InvitationState::Accepted);
        assert_eq!(details.match_title, "Sunday eleven");
        assert_eq!(details.match_starts_at, entity.match_starts_at);
    }
}
