//! User (player) domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::distance::Coordinates;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            "OTHER" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Preferred playing position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GOALKEEPER",
            Position::Defender => "DEFENDER",
            Position::Midfielder => "MIDFIELDER",
            Position::Forward => "FORWARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GOALKEEPER" => Some(Position::Goalkeeper),
            "DEFENDER" => Some(Position::Defender),
            "MIDFIELDER" => Some(Position::Midfielder),
            "FORWARD" => Some(Position::Forward),
            _ => None,
        }
    }
}

/// A registered player. Organizers are players too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
    pub description: Option<String>,
    pub gender: Gender,
    pub position: Position,
    pub available: bool,
}

impl User {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Age in completed years on `today`, when the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date
            .map(|birth_date| shared::time::age_on(birth_date, today))
    }
}

/// Request payload for updating a profile (partial update).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: Option<f64>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location_text: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub gender: Option<Gender>,

    pub position: Option<Position>,
}

impl UpdateUserRequest {
    /// Applies every supplied field to `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = Some(birth_date);
        }
        if let Some(latitude) = self.latitude {
            user.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            user.longitude = longitude;
        }
        if let Some(location_text) = self.location_text {
            user.location_text = location_text;
        }
        if let Some(description) = self.description {
            user.description = Some(description);
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
        if let Some(position) = self.position {
            user.position = position;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub message: String,
    pub user_id: Uuid,
    pub available: bool,
}

/// Query parameters for the available-players search.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AvailablePlayersQuery {
    pub gender: Option<Gender>,
    pub position: Option<Position>,
    /// Case and accent insensitive substring of the player's location.
    pub location_text: Option<String>,

    #[validate(custom(function = "shared::validation::validate_radius_km"))]
    pub max_distance_km: Option<f64>,
}

/// A player who can be invited, with their distance from the organizer.
#[derive(Debug, Clone, Serialize)]
pub struct AvailablePlayer {
    pub id: Uuid,
    pub name: String,
    pub position: Position,
    pub gender: Gender,
    pub age: Option<i32>,
    pub location_text: String,
    pub distance_km: f64,
}
