//! Match repository for database operations.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{
    Match, MatchSearchCriteria, MatchSummary, NewMatch, NewParticipation, ParticipationState,
};
use domain::stores::{DeletedRows, MatchStore, StoreResult};

use super::store_error;
use crate::entities::{
    MatchEntity, MatchStatusDb, MatchSummaryEntity, ParticipationStateDb, SoccerFormatDb,
    VisibilityDb,
};
use crate::metrics::QueryTimer;

/// Columns shared by the summary queries: the match row, its confirmed count
/// and the organizer's name.
const SUMMARY_SELECT: &str = r#"
    SELECT m.*,
           (SELECT COUNT(*) FROM participations c
             WHERE c.match_id = m.id AND c.state = 'CONFIRMED') AS confirmed_count,
           u.name AS organizer_name
    FROM matches m
    LEFT JOIN users u ON u.id = m.organizer_id
"#;

/// Repository for match-related database operations.
#[derive(Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

/// Escapes `LIKE` metacharacters so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl MatchRepository {
    /// Creates a new MatchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_with_organizer(
        &self,
        new_match: NewMatch,
        organizer_name: &str,
    ) -> Result<Match, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, MatchEntity>(
            r#"
            INSERT INTO matches (id, title, price_per_person, description, starts_at,
                                 latitude, longitude, location_text, capacity, organizer_id,
                                 visibility, format, min_age, status, password)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_match.title)
        .bind(new_match.price_per_person)
        .bind(&new_match.description)
        .bind(new_match.starts_at)
        .bind(new_match.latitude)
        .bind(new_match.longitude)
        .bind(&new_match.location_text)
        .bind(new_match.capacity)
        .bind(new_match.organizer_id)
        .bind(VisibilityDb::from(new_match.visibility))
        .bind(SoccerFormatDb::from(new_match.format))
        .bind(new_match.min_age)
        .bind(MatchStatusDb::Pending)
        .bind(&new_match.password)
        .fetch_one(&mut *tx)
        .await?;

        let organizer = NewParticipation::new(
            created.id,
            created.organizer_id,
            organizer_name,
            ParticipationState::Confirmed,
        );
        sqlx::query(
            r#"
            INSERT INTO participations (id, match_id, player_id, player_name, state, requested_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(organizer.match_id)
        .bind(organizer.player_id)
        .bind(&organizer.player_name)
        .bind(ParticipationStateDb::from(organizer.state))
        .bind(organizer.requested_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Match::from(created))
    }

    async fn remove_cascade(&self, match_id: Uuid) -> Result<DeletedRows, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let participations = sqlx::query("DELETE FROM participations WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let invitations = sqlx::query("DELETE FROM invitations WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(DeletedRows {
            participations,
            invitations,
        })
    }
}

#[async_trait]
impl MatchStore for MatchRepository {
    async fn create_with_organizer(
        &self,
        new_match: NewMatch,
        organizer_name: &str,
    ) -> StoreResult<Match> {
        let timer = QueryTimer::new("create_match_with_organizer");
        let result = self.insert_with_organizer(new_match, organizer_name).await;
        timer.record();
        result.map_err(store_error)
    }

    async fn get(&self, match_id: Uuid) -> StoreResult<Option<Match>> {
        let timer = QueryTimer::new("find_match_by_id");
        let result = sqlx::query_as::<_, MatchEntity>(
            r#"
            SELECT * FROM matches WHERE id = $1
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Match::from)).map_err(store_error)
    }

    async fn update(&self, updated: &Match) -> StoreResult<()> {
        let timer = QueryTimer::new("update_match");
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET title = $2, price_per_person = $3, description = $4, starts_at = $5,
                latitude = $6, longitude = $7, location_text = $8, capacity = $9,
                visibility = $10, format = $11, min_age = $12, status = $13, password = $14
            WHERE id = $1
            "#,
        )
        .bind(updated.id)
        .bind(&updated.title)
        .bind(updated.price_per_person)
        .bind(&updated.description)
        .bind(updated.starts_at)
        .bind(updated.latitude)
        .bind(updated.longitude)
        .bind(&updated.location_text)
        .bind(updated.capacity)
        .bind(VisibilityDb::from(updated.visibility))
        .bind(SoccerFormatDb::from(updated.format))
        .bind(updated.min_age)
        .bind(MatchStatusDb::from(updated.status))
        .bind(&updated.password)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ()).map_err(store_error)
    }

    async fn delete_cascade(&self, match_id: Uuid) -> StoreResult<DeletedRows> {
        let timer = QueryTimer::new("delete_match_cascade");
        let result = self.remove_cascade(match_id).await;
        timer.record();
        result.map_err(store_error)
    }

    async fn search(&self, criteria: &MatchSearchCriteria) -> StoreResult<Vec<MatchSummary>> {
        let timer = QueryTimer::new("search_matches");
        let sql = format!(
            r#"
            {SUMMARY_SELECT}
            WHERE m.starts_at >= $2
              AND NOT EXISTS (
                  SELECT 1 FROM participations p
                  WHERE p.match_id = m.id AND p.player_id = $1
                    AND p.state IN ('PENDING', 'CONFIRMED'))
              AND ($3::TEXT IS NULL OR m.title ILIKE '%' || $3 || '%' ESCAPE '\')
              AND ($4::TIMESTAMP IS NULL OR m.starts_at >= $4)
              AND ($5::TIMESTAMP IS NULL OR m.starts_at <= $5)
              AND ($6::soccer_format IS NULL OR m.format = $6)
              AND ($7::INTEGER IS NULL OR m.min_age <= $7)
            ORDER BY m.starts_at
            "#
        );
        let result = sqlx::query_as::<_, MatchSummaryEntity>(&sql)
            .bind(criteria.player_id)
            .bind(criteria.not_before)
            .bind(criteria.title.as_deref().map(escape_like))
            .bind(criteria.from)
            .bind(criteria.to)
            .bind(criteria.format.map(SoccerFormatDb::from))
            .bind(criteria.min_age_ceiling)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
            .map(|rows| rows.into_iter().map(MatchSummary::from).collect())
            .map_err(store_error)
    }

    async fn calendar(
        &self,
        player_id: Uuid,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> StoreResult<Vec<MatchSummary>> {
        let timer = QueryTimer::new("player_calendar");
        let sql = format!(
            r#"
            {SUMMARY_SELECT}
            JOIN participations p ON p.match_id = m.id
            WHERE p.player_id = $1 AND p.state = 'CONFIRMED'
              AND m.starts_at BETWEEN $2 AND $3
            ORDER BY m.starts_at
            "#
        );
        let result = sqlx::query_as::<_, MatchSummaryEntity>(&sql)
            .bind(player_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
            .map(|rows| rows.into_iter().map(MatchSummary::from).collect())
            .map_err(store_error)
    }
}
