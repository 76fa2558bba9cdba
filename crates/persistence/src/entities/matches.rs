//! Match entity (database row mapping).

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Match, MatchStatus, MatchSummary, SoccerFormat, Visibility};

/// Database enum for match visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "match_visibility", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityDb {
    Public,
    Private,
}

impl From<VisibilityDb> for Visibility {
    fn from(db: VisibilityDb) -> Self {
        match db {
            VisibilityDb::Public => Visibility::Public,
            VisibilityDb::Private => Visibility::Private,
        }
    }
}

impl From<Visibility> for VisibilityDb {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => VisibilityDb::Public,
            Visibility::Private => VisibilityDb::Private,
        }
    }
}

/// Database enum for soccer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "soccer_format", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoccerFormatDb {
    FiveASide,
    SevenASide,
    ElevenASide,
}

impl From<SoccerFormatDb> for SoccerFormat {
    fn from(db: SoccerFormatDb) -> Self {
        match db {
            SoccerFormatDb::FiveASide => SoccerFormat::FiveASide,
            SoccerFormatDb::SevenASide => SoccerFormat::SevenASide,
            SoccerFormatDb::ElevenASide => SoccerFormat::ElevenASide,
        }
    }
}

impl From<SoccerFormat> for SoccerFormatDb {
    fn from(format: SoccerFormat) -> Self {
        match format {
            SoccerFormat::FiveASide => SoccerFormatDb::FiveASide,
            SoccerFormat::SevenASide => SoccerFormatDb::SevenASide,
            SoccerFormat::ElevenASide => SoccerFormatDb::ElevenASide,
        }
    }
}

/// Database enum for match lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatusDb {
    Pending,
    Confirmed,
    Cancelled,
    Finished,
}

impl From<MatchStatusDb> for MatchStatus {
    fn from(db: MatchStatusDb) -> Self {
        match db {
            MatchStatusDb::Pending => MatchStatus::Pending,
            MatchStatusDb::Confirmed => MatchStatus::Confirmed,
            MatchStatusDb::Cancelled => MatchStatus::Cancelled,
            MatchStatusDb::Finished => MatchStatus::Finished,
        }
    }
}

impl From<MatchStatus> for MatchStatusDb {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Pending => MatchStatusDb::Pending,
            MatchStatus::Confirmed => MatchStatusDb::Confirmed,
            MatchStatus::Cancelled => MatchStatusDb::Cancelled,
            MatchStatus::Finished => MatchStatusDb::Finished,
        }
    }
}

/// Database row mapping for the matches table.
#[derive(Debug, Clone, FromRow)]
pub struct MatchEntity {
    pub id: Uuid,
    pub title: String,
    pub price_per_person: i64,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
    pub capacity: i32,
    pub organizer_id: Uuid,
    pub visibility: VisibilityDb,
    pub format: SoccerFormatDb,
    pub min_age: i32,
    pub status: MatchStatusDb,
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MatchEntity> for Match {
    fn from(entity: MatchEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            price_per_person: entity.price_per_person,
            description: entity.description,
            starts_at: entity.starts_at,
            latitude: entity.latitude,
            longitude: entity.longitude,
            location_text: entity.location_text,
            capacity: entity.capacity,
            organizer_id: entity.organizer_id,
            visibility: entity.visibility.into(),
            format: entity.format.into(),
            min_age: entity.min_age,
            status: entity.status.into(),
            password: entity.password,
            created_at: entity.created_at,
        }
    }
}

/// A match row joined with its confirmed count and organizer name.
#[derive(Debug, Clone, FromRow)]
pub struct MatchSummaryEntity {
    #[sqlx(flatten)]
    pub info: MatchEntity,
    pub confirmed_count: i64,
    pub organizer_name: Option<String>,
}

impl From<MatchSummaryEntity> for MatchSummary {
    fn from(entity: MatchSummaryEntity) -> Self {
        Self {
            info: entity.info.into(),
            confirmed_count: entity.confirmed_count,
            organizer_name: entity.organizer_name,
        }
    }
}
