//! Integration tests for match lifecycle and roster endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{delete_request, get_request, json_request, match_body, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_match_confirms_organizer() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;

    let (status, detail) = app
        .send(get_request(&format!("/api/v1/matches/{match_id}"), organizer))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["confirmed_count"], 1);
    assert_eq!(detail["pending_count"], 0);
    assert_eq!(detail["has_room"], true);
    assert_eq!(detail["visibility"], "PUBLIC");
    assert_eq!(detail["participants"][0]["player_id"], organizer.to_string());
    assert_eq!(detail["participants"][0]["state"], "CONFIRMED");
    assert!(detail.get("password").is_none());
}

#[tokio::test]
async fn test_create_match_validation() {
    let app = TestApp::new();
    let organizer = app.player().await;

    let mut body = match_body(48, 30, "PUBLIC", None);
    body["title"] = json!("ab");
    let (status, error) = app
        .send(json_request(Method::POST, "/api/v1/matches", organizer, body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
    assert_eq!(error["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_private_match_requires_password() {
    let app = TestApp::new();
    let organizer = app.player().await;

    let (status, error) = app
        .send(json_request(
            Method::POST,
            "/api/v1/matches",
            organizer,
            match_body(48, 10, "PRIVATE", None),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], "missing_credential");
}

#[tokio::test]
async fn test_missing_and_malformed_caller() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .uri("/api/v1/invitations")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, error) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], "unauthorized");

    let request = axum::http::Request::builder()
        .uri("/api/v1/invitations")
        .header("X-User-Id", "someone")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, error) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_join_approve_until_full() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 2).await;

    let first = app.player().await;
    let second = app.player().await;
    let first_pid = app.join(match_id, first).await;
    let second_pid = app.join(match_id, second).await;

    let approve = |pid: Uuid| {
        json_request(
            Method::POST,
            &format!("/api/v1/matches/{match_id}/participants/{pid}/approve"),
            organizer,
            json!({}),
        )
    };

    let (status, body) = app.send(approve(first_pid)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["confirmed"], 2);
    assert_eq!(body["capacity"], 2);

    let (status, error) = app.send(approve(second_pid)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "match_full");

    let third = app.player().await;
    let (status, error) = app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/matches/{match_id}/join"),
            third,
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "match_full");
}

#[tokio::test]
async fn test_join_twice_is_invalid_state() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let player = app.player().await;
    app.join(match_id, player).await;

    let (status, error) = app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/matches/{match_id}/join"),
            player,
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");
}

#[tokio::test]
async fn test_private_match_password() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let (status, created) = app
        .send(json_request(
            Method::POST,
            "/api/v1/matches",
            organizer,
            match_body(48, 10, "PRIVATE", Some("abc123")),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let match_id = created["id"].as_str().unwrap();
    let join_uri = format!("/api/v1/matches/{match_id}/join");
    let player = app.player().await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri(&join_uri)
        .header("X-User-Id", player.to_string())
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, error) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], "missing_credential");

    let (status, error) = app
        .send(json_request(
            Method::POST,
            &join_uri,
            player,
            json!({ "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "invalid_credential");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            &join_uri,
            player,
            json!({ "password": "abc123" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["state"], "PENDING");
    assert_eq!(body["pending"], 1);
}

#[tokio::test]
async fn test_reject_twice_and_unknown_action() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let player = app.player().await;
    let pid = app.join(match_id, player).await;
    let uri = format!("/api/v1/matches/{match_id}/participants/{pid}/reject");

    let (status, _) = app
        .send(json_request(Method::POST, &uri, organizer, json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = app
        .send(json_request(Method::POST, &uri, organizer, json!({})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");

    let (status, error) = app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/matches/{match_id}/participants/{pid}/promote"),
            organizer,
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_manage_requires_organizer() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let player = app.player().await;
    let pid = app.join(match_id, player).await;

    let (status, error) = app
        .send(json_request(
            Method::POST,
            &format!("/api/v1/matches/{match_id}/participants/{pid}/approve"),
            player,
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "forbidden");
}

#[tokio::test]
async fn test_leave_and_rejoin() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let player = app.player().await;
    app.join(match_id, player).await;

    let leave_uri = format!("/api/v1/matches/{match_id}/participation");
    let (status, body) = app.send(delete_request(&leave_uri, player)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_state"], "PENDING");
    assert_eq!(body["pending"], 0);

    let (status, error) = app.send(delete_request(&leave_uri, player)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");

    let (status, error) = app.send(delete_request(&leave_uri, organizer)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");

    app.join(match_id, player).await;
}

#[tokio::test]
async fn test_update_capacity_below_confirmed() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 5).await;
    let player = app.player().await;
    let pid = app.join(match_id, player).await;
    app.send(json_request(
        Method::POST,
        &format!("/api/v1/matches/{match_id}/participants/{pid}/approve"),
        organizer,
        json!({}),
    ))
    .await;

    let uri = format!("/api/v1/matches/{match_id}");
    let (status, detail) = app
        .send(json_request(
            Method::PUT,
            &uri,
            organizer,
            json!({ "capacity": 2 }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{detail}");
    assert_eq!(detail["capacity"], 2);
    assert_eq!(detail["has_room"], false);

    let (status, error) = app
        .send(json_request(Method::PUT, &uri, organizer, json!({ "capacity": 3 })))
        .await;
    assert_eq!(status, StatusCode::OK, "{error}");

    // Two confirmed players: organizer plus the approved player.
    let (status, error) = app
        .send(json_request(Method::PUT, &uri, organizer, json!({ "capacity": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{error}");

    let third = app.player().await;
    let third_pid = app.join(match_id, third).await;
    app.send(json_request(
        Method::POST,
        &format!("/api/v1/matches/{match_id}/participants/{third_pid}/approve"),
        organizer,
        json!({}),
    ))
    .await;

    let (status, error) = app
        .send(json_request(Method::PUT, &uri, organizer, json!({ "capacity": 2 })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], "invalid_capacity");

    let (status, detail) = app
        .send(json_request(Method::PUT, &uri, organizer, json!({ "password": "secret" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["visibility"], "PRIVATE");

    let (_, detail) = app
        .send(json_request(Method::PUT, &uri, organizer, json!({ "password": "" })))
        .await;
    assert_eq!(detail["visibility"], "PUBLIC");
}

#[tokio::test]
async fn test_delete_deadline() {
    let app = TestApp::new();
    let organizer = app.player().await;

    let soon = app.create_match(organizer, 2, 10).await;
    let (status, error) = app
        .send(delete_request(&format!("/api/v1/matches/{soon}"), organizer))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "invalid_state");

    let later = app.create_match(organizer, 25, 10).await;
    let player = app.player().await;
    app.join(later, player).await;

    let other = app.player().await;
    let (status, _) = app
        .send(delete_request(&format!("/api/v1/matches/{later}"), other))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(delete_request(&format!("/api/v1/matches/{later}"), organizer))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match_id"], later.to_string());

    let (status, error) = app
        .send(get_request(&format!("/api/v1/matches/{later}"), organizer))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "not_found");
}

#[tokio::test]
async fn test_search_nearby_matches() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let near = app.create_match(organizer, 48, 10).await;

    let far_organizer = app.player_at(-31.4201, -64.1888).await;
    let mut far_body = match_body(48, 10, "PUBLIC", None);
    far_body["latitude"] = json!(-31.4201);
    far_body["longitude"] = json!(-64.1888);
    let (status, _) = app
        .send(json_request(Method::POST, "/api/v1/matches", far_organizer, far_body))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let seeker = app.player().await;
    let (status, results) = app
        .send(get_request("/api/v1/matches/search", seeker))
        .await;
    assert_eq!(status, StatusCode::OK);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], near.to_string());
    assert_eq!(results[0]["has_room"], true);
    assert_eq!(results[0]["distance_km"], 0.0);

    // The organizer is already on the roster of their own match.
    let (_, own) = app
        .send(get_request("/api/v1/matches/search", organizer))
        .await;
    assert!(own.as_array().unwrap().is_empty());

    let (status, error) = app
        .send(get_request(
            "/api/v1/matches/search?max_distance_km=5000",
            seeker,
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation_error");
}

#[tokio::test]
async fn test_participants_ordering() {
    let app = TestApp::new();
    let organizer = app.player().await;
    let match_id = app.create_match(organizer, 48, 10).await;
    let pending = app.player().await;
    app.join(match_id, pending).await;

    let (status, roster) = app
        .send(get_request(
            &format!("/api/v1/matches/{match_id}/participants"),
            pending,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0]["player_id"], organizer.to_string());
    assert_eq!(roster[0]["state"], "CONFIRMED");
    assert_eq!(roster[1]["state"], "PENDING");

    let (status, _) = app
        .send(get_request(
            &format!("/api/v1/matches/{}/participants", Uuid::new_v4()),
            pending,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
