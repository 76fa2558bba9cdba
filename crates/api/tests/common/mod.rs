//! Common test utilities for integration tests.
//!
//! The router runs against the in-memory store, so these tests need no
//! database. Users are seeded directly into the store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, FixedOffset, Utc};
use domain::models::{Gender, Position, User};
use domain::services::Stores;
use domain::stores::InMemoryStore;
use fake::faker::name::en::Name;
use fake::Fake;
use matchmaker_api::{
    app::create_app,
    config::{
        Config, DatabaseConfig, DiscoveryConfig, LoggingConfig, SecurityConfig, ServerConfig,
    },
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Palermo, Buenos Aires. Default location for seeded players and matches.
pub const HOME: (f64, f64) = (-34.5875, -58.4200);

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        discovery: DiscoveryConfig::default(),
    }
}

/// A router plus direct access to its backing store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let router = create_app(test_config(), Stores::in_memory(store.clone()), None);
        Self { router, store }
    }

    /// Seeds an available player at `(lat, lon)` and returns their id.
    pub async fn player_at(&self, lat: f64, lon: f64) -> Uuid {
        self.player_with(lat, lon, "Palermo, Buenos Aires", Position::Midfielder)
            .await
    }

    pub async fn player(&self) -> Uuid {
        self.player_at(HOME.0, HOME.1).await
    }

    pub async fn player_with(
        &self,
        lat: f64,
        lon: f64,
        location_text: &str,
        position: Position,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .insert_user(User {
                id,
                name: Name().fake(),
                birth_date: chrono::NaiveDate::from_ymd_opt(1995, 6, 15),
                latitude: lat,
                longitude: lon,
                location_text: location_text.to_string(),
                description: None,
                gender: Gender::Male,
                position,
                available: true,
            })
            .await;
        id
    }

    /// Sends a request and returns the status with the parsed JSON body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_response_body(response).await)
    }

    /// Creates a public match starting `hours` from now, asserting success.
    pub async fn create_match(&self, organizer: Uuid, hours: i64, capacity: i32) -> Uuid {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/api/v1/matches",
                organizer,
                match_body(hours, capacity, "PUBLIC", None),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().parse().unwrap()
    }

    /// Joins `match_id` and returns the new participation id.
    pub async fn join(&self, match_id: Uuid, player: Uuid) -> Uuid {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                &format!("/api/v1/matches/{match_id}/join"),
                player,
                json!({}),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        self.participation_of(match_id, player).await
    }

    /// Looks up a player's participation id through the match detail.
    pub async fn participation_of(&self, match_id: Uuid, player: Uuid) -> Uuid {
        let (_, detail) = self
            .send(get_request(&format!("/api/v1/matches/{match_id}"), player))
            .await;
        detail["participants"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["player_id"] == player.to_string())
            .and_then(|p| p["id"].as_str())
            .unwrap()
            .parse()
            .unwrap()
    }
}

/// Request body for POST /api/v1/matches. The start time is sent with an
/// explicit offset.
pub fn match_body(hours: i64, capacity: i32, visibility: &str, password: Option<&str>) -> Value {
    let offset = FixedOffset::west_opt(3 * 3600).unwrap();
    let starts_at = (Utc::now() + Duration::hours(hours)).with_timezone(&offset);
    json!({
        "title": "Sunday five-a-side",
        "price_per_person": 1500,
        "description": "Bring a dark and a light shirt",
        "starts_at": starts_at.to_rfc3339(),
        "latitude": HOME.0,
        "longitude": HOME.1,
        "location_text": "Parque Tres de Febrero",
        "capacity": capacity,
        "visibility": visibility,
        "format": "FIVE_A_SIDE",
        "min_age": 18,
        "password": password,
    })
}

pub fn json_request(method: Method, uri: &str, caller: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-User-Id", caller.to_string())
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str, caller: Uuid) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("X-User-Id", caller.to_string())
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(uri: &str, caller: Uuid) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("X-User-Id", caller.to_string())
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}
