//! User entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Gender, Position, User};

/// Database enum for player gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "player_gender", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderDb {
    Male,
    Female,
    Other,
}

impl From<GenderDb> for Gender {
    fn from(db: GenderDb) -> Self {
        match db {
            GenderDb::Male => Gender::Male,
            GenderDb::Female => Gender::Female,
            GenderDb::Other => Gender::Other,
        }
    }
}

impl From<Gender> for GenderDb {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderDb::Male,
            Gender::Female => GenderDb::Female,
            Gender::Other => GenderDb::Other,
        }
    }
}

/// Database enum for preferred position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "player_position", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionDb {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl From<PositionDb> for Position {
    fn from(db: PositionDb) -> Self {
        match db {
            PositionDb::Goalkeeper => Position::Goalkeeper,
            PositionDb::Defender => Position::Defender,
            PositionDb::Midfielder => Position::Midfielder,
            PositionDb::Forward => Position::Forward,
        }
    }
}

impl From<Position> for PositionDb {
    fn from(position: Position) -> Self {
        match position {
            Position::Goalkeeper => PositionDb::Goalkeeper,
            Position::Defender => PositionDb::Defender,
            Position::Midfielder => PositionDb::Midfielder,
            Position::Forward => PositionDb::Forward,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
    pub description: Option<String>,
    pub gender: GenderDb,
    pub position: PositionDb,
    pub available: bool,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            birth_date: entity.birth_date,
            latitude: entity.latitude,
            longitude: entity.longitude,
            location_text: entity.location_text,
            description: entity.description,
            gender: entity.gender.into(),
            position: entity.position.into(),
            available: entity.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            name: "Tomas".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 31),
            latitude: -34.57,
            longitude: -58.46,
            location_text: "Colegiales".to_string(),
            description: None,
            gender: GenderDb::Male,
            position: PositionDb::Goalkeeper,
            available: true,
        };
        let user: User = entity.clone().into();

        assert_eq!(user.id, entity.id);
        assert_eq!(user.gender, Gender::Male);
        assert_eq!(user.position, Position::Goalkeeper);
        assert!(user.available);
    }
}
