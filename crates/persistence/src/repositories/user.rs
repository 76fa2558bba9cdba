//! User repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{Gender, Position, User};
use domain::stores::{StoreResult, UserStore};

use super::store_error;
use crate::entities::{GenderDb, PositionDb, UserEntity};
use crate::metrics::QueryTimer;

/// Repository for player profiles.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(User::from)).map_err(store_error)
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        let timer = QueryTimer::new("update_user");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, birth_date = $3, latitude = $4, longitude = $5,
                location_text = $6, description = $7, gender = $8, position = $9
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.birth_date)
        .bind(user.latitude)
        .bind(user.longitude)
        .bind(&user.location_text)
        .bind(&user.description)
        .bind(GenderDb::from(user.gender))
        .bind(PositionDb::from(user.position))
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ()).map_err(store_error)
    }

    async fn set_available(&self, user_id: Uuid, available: bool) -> StoreResult<()> {
        let timer = QueryTimer::new("set_user_available");
        let result = sqlx::query("UPDATE users SET available = $2 WHERE id = $1")
            .bind(user_id)
            .bind(available)
            .execute(&self.pool)
            .await;
        timer.record();
        result.map(|_| ()).map_err(store_error)
    }

    async fn list_available(
        &self,
        excluding: Uuid,
        gender: Option<Gender>,
        position: Option<Position>,
    ) -> StoreResult<Vec<User>> {
        let timer = QueryTimer::new("list_available_users");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users
            WHERE available AND id <> $1
              AND ($2::player_gender IS NULL OR gender = $2)
              AND ($3::player_position IS NULL OR position = $3)
            "#,
        )
        .bind(excluding)
        .bind(gender.map(GenderDb::from))
        .bind(position.map(PositionDb::from))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(store_error)
    }
}
