//! Participation repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{NewParticipation, Participation, ParticipationState};
use domain::stores::{ParticipationStore, StoreResult};

use super::store_error;
use crate::entities::{ParticipationEntity, ParticipationStateDb};
use crate::metrics::QueryTimer;

/// Repository for roster rows.
#[derive(Clone)]
pub struct ParticipationRepository {
    pool: PgPool,
}

impl ParticipationRepository {
    /// Creates a new ParticipationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipationStore for ParticipationRepository {
    async fn create(&self, new_participation: NewParticipation) -> StoreResult<Participation> {
        let timer = QueryTimer::new("create_participation");
        let result = sqlx::query_as::<_, ParticipationEntity>(
            r#"
            INSERT INTO participations (id, match_id, player_id, player_name, state, requested_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_participation.match_id)
        .bind(new_participation.player_id)
        .bind(&new_participation.player_name)
        .bind(ParticipationStateDb::from(new_participation.state))
        .bind(new_participation.requested_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Participation::from).map_err(store_error)
    }

    async fn get(&self, participation_id: Uuid) -> StoreResult<Option<Participation>> {
        let timer = QueryTimer::new("find_participation_by_id");
        let result = sqlx::query_as::<_, ParticipationEntity>(
            r#"
            SELECT * FROM participations WHERE id = $1
            "#,
        )
        .bind(participation_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|row| row.map(Participation::from))
            .map_err(store_error)
    }

    async fn find_by_match_and_player(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>> {
        let timer = QueryTimer::new("find_latest_participation");
        let result = sqlx::query_as::<_, ParticipationEntity>(
            r#"
            SELECT * FROM participations
            WHERE match_id = $1 AND player_id = $2
            ORDER BY requested_at DESC
            LIMIT 1
            "#,
        )
        .bind(match_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|row| row.map(Participation::from))
            .map_err(store_error)
    }

    async fn find_active(
        &self,
        match_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Participation>> {
        let timer = QueryTimer::new("find_active_participation");
        let result = sqlx::query_as::<_, ParticipationEntity>(
            r#"
            SELECT * FROM participations
            WHERE match_id = $1 AND player_id = $2 AND state IN ('PENDING', 'CONFIRMED')
            "#,
        )
        .bind(match_id)
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
            .map(|row| row.map(Participation::from))
            .map_err(store_error)
    }

    async fn list_by_match(&self, match_id: Uuid) -> StoreResult<Vec<Participation>> {
        let timer = QueryTimer::new("list_participations_by_match");
        let result = sqlx::query_as::<_, ParticipationEntity>(
            r#"
            SELECT * FROM participations
            WHERE match_id = $1
            ORDER BY requested_at
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map(|rows| rows.into_iter().map(Participation::from).collect())
            .map_err(store_error)
    }

    async fn count_by_state(&self, match_id: Uuid, state: ParticipationState) -> StoreResult<i64> {
        let timer = QueryTimer::new("count_participations_by_state");
        let result: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM participations WHERE match_id = $1 AND state = $2
            "#,
        )
        .bind(match_id)
        .bind(ParticipationStateDb::from(state))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|count| count.0).map_err(store_error)
    }

    async fn update(&self, participation: &Participation) -> StoreResult<()> {
        let timer = QueryTimer::new("update_participation");
        let result = sqlx::query(
            r#"
            UPDATE participations SET state = $2, player_name = $3 WHERE id = $1
            "#,
        )
        .bind(participation.id)
        .bind(ParticipationStateDb::from(participation.state))
        .bind(&participation.player_name)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ()).map_err(store_error)
    }

    async fn exists_active(&self, match_id: Uuid, player_id: Uuid) -> StoreResult<bool> {
        let timer = QueryTimer::new("exists_active_participation");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM participations
                WHERE match_id = $1 AND player_id = $2 AND state IN ('PENDING', 'CONFIRMED')
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
}
