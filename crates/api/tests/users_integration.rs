//! Integration tests for player profile, availability, calendar and
//! available-player endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{get_request, json_request, TestApp, HOME};
use domain::models::Position;
use serde_json::json;

#[tokio::test]
async fn test_profile_update() {
    let app = TestApp::new();
    let user = app.player().await;
    let uri = format!("/api/v1/users/{user}");

    let (status, profile) = app.send(get_request(&uri, user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], user.to_string());

    let (status, updated) = app
        .send(json_request(
            Method::PUT,
            &uri,
            user,
            json!({ "description": "Left-footed", "position": "GOALKEEPER" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["position"], "GOALKEEPER");
    assert_eq!(updated["description"], "Left-footed");
    assert_eq!(updated["name"], profile["name"]);

    let (status, error) = app
        .send(json_request(Method::PUT, &uri, user, json!({ "latitude": 120.0 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_profile_access_rules() {
    let app = TestApp::new();
    let user = app.player().await;
    let other = app.player().await;

    let (status, _) = app
        .send(get_request(&format!("/api/v1/users/{user}"), other))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = app
        .send(json_request(
            Method::PUT,
            &format!("/api/v1/users/{user}"),
            other,
            json!({ "description": "hijacked" }),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "forbidden");

    let missing = uuid::Uuid::new_v4();
    let (status, error) = app
        .send(get_request(&format!("/api/v1/users/{missing}"), user))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_availability_toggle() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let player = app.player().await;
    let uri = format!("/api/v1/users/{player}/availability");

    let (_, players) = app
        .send(get_request("/api/v1/users/available", organizer))
        .await;
    assert_eq!(players.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(json_request(Method::PUT, &uri, player, json!({ "available": false })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);

    let (_, players) = app
        .send(get_request("/api/v1/users/available", organizer))
        .await;
    assert!(players.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_available_players_filters() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let keeper = app
        .player_with(HOME.0, HOME.1, "Núñez, Buenos Aires", Position::Goalkeeper)
        .await;
    app.player_with(-34.6037, -58.3816, "San Nicolás", Position::Forward)
        .await;
    app.player_with(-31.4201, -64.1888, "Nueva Córdoba", Position::Goalkeeper)
        .await;

    let (status, players) = app
        .send(get_request("/api/v1/users/available", organizer))
        .await;
    assert_eq!(status, StatusCode::OK);
    let players = players.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["id"], keeper.to_string());
    assert!(players[0]["distance_km"].as_f64().unwrap() <= players[1]["distance_km"].as_f64().unwrap());

    let (_, keepers) = app
        .send(get_request(
            "/api/v1/users/available?position=GOALKEEPER",
            organizer,
        ))
        .await;
    assert_eq!(keepers.as_array().unwrap().len(), 1);

    let (_, by_location) = app
        .send(get_request(
            "/api/v1/users/available?location_text=nunez&max_distance_km=50",
            organizer,
        ))
        .await;
    let by_location = by_location.as_array().unwrap();
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0]["id"], keeper.to_string());
}

#[tokio::test]
async fn test_calendar_lists_confirmed_matches() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let player = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let pid = app.join(match_id, player).await;

    let (_, calendar) = app
        .send(get_request(&format!("/api/v1/users/{player}/calendar"), player))
        .await;
    assert!(calendar.as_array().unwrap().is_empty());

    app.send(json_request(
        Method::POST,
        &format!("/api/v1/matches/{match_id}/participants/{pid}/approve"),
        organizer,
        json!({}),
    ))
    .await;

    let (status, calendar) = app
        .send(get_request(&format!("/api/v1/users/{player}/calendar"), player))
        .await;
    assert_eq!(status, StatusCode::OK);
    let calendar = calendar.as_array().unwrap();
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0]["match_id"], match_id.to_string());
    assert_eq!(calendar[0]["is_organizer"], false);
    assert_eq!(calendar[0]["confirmed_count"], 2);

    let (_, own) = app
        .send(get_request(&format!("/api/v1/users/{organizer}/calendar"), organizer))
        .await;
    assert_eq!(own[0]["is_organizer"], true);

    let (status, _) = app
        .send(get_request(&format!("/api/v1/users/{player}/calendar"), organizer))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
