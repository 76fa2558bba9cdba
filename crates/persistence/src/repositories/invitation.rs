//! Invitation repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{Invitation, InvitationDetails, InvitationState, NewInvitation};
use domain::stores::{InvitationStore, StoreResult};

use super::store_error;
use crate::entities::{InvitationDetailsEntity, InvitationEntity, InvitationStateDb};
use crate::metrics::QueryTimer;

/// Repository for match invitations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new InvitationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for InvitationRepository {
    async fn create(&self, new_invitation: NewInvitation) -> StoreResult<Invitation> {
        let timer = QueryTimer::new("create_invitation");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (id, match_id, player_id, state, invited_at)
            VALUES ($1, $2, $3, 'PENDING', $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_invitation.match_id)
        .bind(new_invitation.player_id)
        .bind(new_invitation.invited_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Invitation::from).map_err(store_error)
    }

    async fn get(&self, invitation_id: Uuid) -> StoreResult<Option<Invitation>> {
        let timer = QueryTimer::new("find_invitation_by_id");
        let result = sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT * FROM invitations WHERE id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|row| row.map(Invitation::from))
            .map_err(store_error)
    }

    async fn list_by_player(
        &self,
        player_id: Uuid,
        state: Option<InvitationState>,
    ) -> StoreResult<Vec<InvitationDetails>> {
        let timer = QueryTimer::new("list_invitations_by_player");
        let result = sqlx::query_as::<_, InvitationDetailsEntity>(
            r#"
            SELECT i.*,
                   m.title AS match_title,
                   m.starts_at AS match_starts_at,
                   m.location_text AS match_location_text
            FROM invitations i
            JOIN matches m ON m.id = i.match_id
            WHERE i.player_id = $1
              AND ($2::invitation_state IS NULL OR i.state = $2)
            ORDER BY i.invited_at DESC
            "#,
        )
        .bind(player_id)
        .bind(state.map(InvitationStateDb::from))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map(|rows| rows.into_iter().map(InvitationDetails::from).collect())
            .map_err(store_error)
    }

    async fn exists_pending(&self, match_id: Uuid, player_id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("exists_pending_invitation");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM invitations
                WHERE match_id = $1 AND player_id = $2 AND state = 'PENDING'
            )
            "#,
        )
        .bind(match_id)
        .bind(player_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|exists| exists.0).map_err(store_error)
    }

    async fn update(&self, invitation: &Invitation) -> StoreResult<()> {
        let timer = QueryTimer::new("update_invitation");
        let result = sqlx::query(
            r#"
            UPDATE invitations SET state = $2, responded_at = $3 WHERE id = $1
            "#,
        )
        .bind(invitation.id)
        .bind(InvitationStateDb::from(invitation.state))
        .bind(invitation.responded_at)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ()).map_err(store_error)
    }
}
