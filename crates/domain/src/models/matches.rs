//! Match domain model.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::distance::Coordinates;
use uuid::Uuid;
use validator::Validate;

use super::participation::Participation;

/// Who may request to join a match without an invitation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
        }
    }

    /// Parses from database string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PUBLIC" => Some(Visibility::Public),
            "PRIVATE" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Team size played in a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoccerFormat {
    FiveASide,
    SevenASide,
    ElevenASide,
}

impl SoccerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoccerFormat::FiveASide => "FIVE_A_SIDE",
            SoccerFormat::SevenASide => "SEVEN_A_SIDE",
            SoccerFormat::ElevenASide => "ELEVEN_A_SIDE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "FIVE_A_SIDE" => Some(SoccerFormat::FiveASide),
            "SEVEN_A_SIDE" => Some(SoccerFormat::SevenASide),
            "ELEVEN_A_SIDE" => Some(SoccerFormat::ElevenASide),
            _ => None,
        }
    }
}

/// Lifecycle state of a match. New matches start `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Pending,
    Confirmed,
    Cancelled,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "PENDING",
            MatchStatus::Confirmed => "CONFIRMED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Finished => "FINISHED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(MatchStatus::Pending),
            "CONFIRMED" => Some(MatchStatus::Confirmed),
            "CANCELLED" => Some(MatchStatus::Cancelled),
            "FINISHED" => Some(MatchStatus::Finished),
            _ => None,
        }
    }
}

/// A scheduled pickup match.
///
/// `starts_at` is civil time in the service's fixed UTC-3 frame. The password
/// is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
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
    pub visibility: Visibility,
    pub format: SoccerFormat,
    pub min_age: i32,
    pub status: MatchStatus,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn is_organizer(&self, user_id: Uuid) -> bool {
        self.organizer_id == user_id
    }

    /// Byte-exact comparison against the stored password.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_deref() == Some(candidate)
    }

    /// Makes the match private with `password`, or public when it is empty.
    pub fn set_password(&mut self, password: &str) {
        if password.is_empty() {
            self.visibility = Visibility::Public;
            self.password = None;
        } else {
            self.visibility = Visibility::Private;
            self.password = Some(password.to_string());
        }
    }
}

/// Start time as supplied by a client: with an explicit offset, or already
/// in civil time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StartTime {
    Zoned(DateTime<FixedOffset>),
    Civil(NaiveDateTime),
}

impl StartTime {
    /// Converts zoned inputs into the civil frame; civil inputs pass through.
    pub fn to_civil(&self) -> NaiveDateTime {
        match self {
            StartTime::Zoned(at) => shared::time::to_civil(at),
            StartTime::Civil(at) => *at,
        }
    }
}

/// Fields persisted when a match is created.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub title: String,
    pub price_per_person: i64,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
    pub capacity: i32,
    pub organizer_id: Uuid,
    pub visibility: Visibility,
    pub format: SoccerFormat,
    pub min_age: i32,
    pub password: Option<String>,
}

/// Request payload for creating a match.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_per_person: i64,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub starts_at: StartTime,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location_text: String,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: i32,

    pub visibility: Visibility,

    pub format: SoccerFormat,

    #[validate(range(min = 16, max = 99, message = "Minimum age must be between 16 and 99"))]
    pub min_age: i32,

    pub password: Option<String>,
}

/// Request payload for updating a match (partial update).
///
/// `password: ""` turns the match public; any other value makes it private.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMatchRequest {
    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price_per_person: Option<i64>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: Option<f64>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location_text: Option<String>,

    #[validate(custom(function = "shared::validation::validate_capacity"))]
    pub capacity: Option<i32>,

    #[validate(range(min = 16, max = 99, message = "Minimum age must be between 16 and 99"))]
    pub min_age: Option<i32>,

    pub password: Option<String>,
}

/// Query parameters for match search.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MatchSearchQuery {
    pub title: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub format: Option<SoccerFormat>,
    /// Only matches whose minimum age is at most this value.
    pub min_age_ceiling: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_radius_km"))]
    pub max_distance_km: Option<f64>,
}

/// Filters pushed down to the match store.
#[derive(Debug, Clone)]
pub struct MatchSearchCriteria {
    /// Matches where this player holds an active participation are excluded.
    pub player_id: Uuid,
    pub not_before: NaiveDateTime,
    pub title: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub format: Option<SoccerFormat>,
    pub min_age_ceiling: Option<i32>,
}

/// A match annotated with its confirmed count and organizer name.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub info: Match,
    pub confirmed_count: i64,
    pub organizer_name: Option<String>,
}

/// One row of a match search result.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSearchResult {
    #[serde(flatten)]
    pub info: Match,
    pub confirmed_count: i64,
    pub organizer_name: Option<String>,
    pub has_room: bool,
    pub distance_km: f64,
}

/// Full view of a match with its ordered roster.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub info: Match,
    pub confirmed_count: i64,
    pub pending_count: i64,
    pub has_room: bool,
    pub organizer_name: String,
    pub participants: Vec<Participation>,
}

/// Query parameters for a player's calendar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

/// A confirmed upcoming match on a player's calendar.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub match_id: Uuid,
    pub title: String,
    pub starts_at: NaiveDateTime,
    pub location_text: String,
    pub visibility: Visibility,
    pub is_organizer: bool,
    pub confirmed_count: i64,
    pub capacity: i32,
}

/// Plain acknowledgement for match-level operations.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMessage {
    pub message: String,
    pub match_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_match() -> Match {
        Match {
            id: Uuid::new_v4(),
            title: "Sunday five".into(),
            price_per_person: 1500,
            description: None,
            starts_at: NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            latitude: -34.6,
            longitude: -58.4,
            location_text: "Palermo".into(),
            capacity: 10,
            organizer_id: Uuid::new_v4(),
            visibility: Visibility::Private,
            format: SoccerFormat::FiveASide,
            min_age: 18,
            status: MatchStatus::Pending,
            password: Some("abc123".into()),
            created_at: Utc::now(),
        }
    }

    fn create_request(json: serde_json::Value) -> CreateMatchRequest {
        serde_json::from_value(json).unwrap()
    }

    fn valid_create_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Sunday five",
            "price_per_person": 1500,
            "starts_at": "2025-03-10T19:00:00",
            "latitude": -34.6,
            "longitude": -58.4,
            "location_text": "Palermo",
            "capacity": 10,
            "visibility": "PUBLIC",
            "format": "FIVE_A_SIDE",
            "min_age": 18
        })
    }

    #[test]
    fn test_enum_string_roundtrip() {
        for format in [
            SoccerFormat::FiveASide,
            SoccerFormat::SevenASide,
            SoccerFormat::ElevenASide,
        ] {
            assert_eq!(SoccerFormat::from_str(format.as_str()), Some(format));
        }
        assert_eq!(Visibility::from_str("PRIVATE"), Some(Visibility::Private));
        assert_eq!(MatchStatus::from_str("FINISHED"), Some(MatchStatus::Finished));
        assert_eq!(MatchStatus::from_str("finished"), None);
    }

    #[test]
    fn test_password_is_never_serialized() {
        let json = serde_json::to_value(sample_match()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["visibility"], "PRIVATE");
        assert_eq!(json["format"], "FIVE_A_SIDE");
    }

    #[test]
    fn test_password_matches_is_exact() {
        let game = sample_match();
        assert!(game.password_matches("abc123"));
        assert!(!game.password_matches("ABC123"));
        assert!(!game.password_matches("abc123 "));
    }

    #[test]
    fn test_set_password_toggles_visibility() {
        let mut game = sample_match();
        game.set_password("");
        assert_eq!(game.visibility, Visibility::Public);
        assert!(game.password.is_none());

        game.set_password("new-secret");
        assert_eq!(game.visibility, Visibility::Private);
        assert_eq!(game.password.as_deref(), Some("new-secret"));
    }

    #[test]
    fn test_start_time_zoned_is_converted() {
        let request = create_request({
            let mut json = valid_create_json();
            json["starts_at"] = "2025-03-10T22:00:00Z".into();
            json
        });
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        assert!(matches!(request.starts_at, StartTime::Zoned(_)));
        assert_eq!(request.starts_at.to_civil(), expected);
    }

    #[test]
    fn test_start_time_civil_is_kept() {
        let request = create_request(valid_create_json());
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        assert!(matches!(request.starts_at, StartTime::Civil(_)));
        assert_eq!(request.starts_at.to_civil(), expected);
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request(valid_create_json()).validate().is_ok());

        let mut json = valid_create_json();
        json["capacity"] = 23.into();
        assert!(create_request(json).validate().is_err());

        let mut json = valid_create_json();
        json["title"] = "ab".into();
        assert!(create_request(json).validate().is_err());

        let mut json = valid_create_json();
        json["min_age"] = 15.into();
        assert!(create_request(json).validate().is_err());

        let mut json = valid_create_json();
        json["latitude"] = 91.0.into();
        assert!(create_request(json).validate().is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let request = UpdateMatchRequest {
            description: Some("x".repeat(501)),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdateMatchRequest {
            capacity: Some(12),
            password: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
