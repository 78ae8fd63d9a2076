//! Integration tests for the Arcade API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Outcomes come from a scripted source so every
//! round is deterministic.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use arcade_core::{Arcade, RoundOutcome, RulesConfig, ScriptedOutcomeSource};
use arcade_server::auth::API_KEY_HEADER;
use arcade_server::router::build_router;
use arcade_server::state::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_KEY: &str = "test-key";

fn make_test_state(script: Vec<RoundOutcome>) -> Arc<AppState> {
    let arcade = Arcade::new(
        RulesConfig::default(),
        Box::new(ScriptedOutcomeSource::new(script)),
    );
    Arc::new(
        AppState::new(arcade)
            .with_api_key(Some(TEST_KEY.to_owned()))
            .with_game_config(Some(json!({
                "ScreenConfig": { "width": 800, "height": 600 }
            }))),
    )
}

fn make_router(script: Vec<RoundOutcome>) -> Router {
    build_router(make_test_state(script))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send an authenticated request and decode the JSON answer.
async fn send(router: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header(API_KEY_HEADER, TEST_KEY);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn start(router: &Router) -> String {
    let (status, json) = send(router, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    json["sessionId"].as_str().unwrap().to_owned()
}

// ---------------------------------------------------------------------------
// Configuration and gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_config_returns_document_verbatim() {
    let router = make_router(vec![]);
    let (status, json) = send(&router, "GET", "/config", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ScreenConfig"]["width"], 800);
    assert_eq!(json["ScreenConfig"]["height"], 600);
}

#[tokio::test]
async fn test_config_is_null_when_not_loaded() {
    let arcade = Arcade::new(
        RulesConfig::default(),
        Box::new(ScriptedOutcomeSource::always(RoundOutcome::Loss)),
    );
    let router = build_router(Arc::new(AppState::new(arcade)));

    let response = router
        .oneshot(Request::get("/config").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await, Value::Null);
}

#[tokio::test]
async fn test_missing_api_key_is_forbidden() {
    let router = make_router(vec![]);
    let response = router
        .oneshot(Request::post("/api/sessions").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Forbidden");
    assert_eq!(json["status"], 403);
}

#[tokio::test]
async fn test_wrong_api_key_is_forbidden() {
    let router = make_router(vec![]);
    let response = router
        .oneshot(
            Request::get("/config")
                .header(API_KEY_HEADER, "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_api_docs_is_html() {
    let router = make_router(vec![]);
    let response = router
        .oneshot(
            Request::get("/api-docs")
                .header(API_KEY_HEADER, TEST_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("text/html"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/api/sessions/{id}/bet"));
}

// ---------------------------------------------------------------------------
// Static assets
// ---------------------------------------------------------------------------

const SPRITE_BYTES: &[u8] = b"\x89PNG sprite bytes";

/// Router serving a fresh temp directory that holds `player.png`.
fn make_static_router(tag: &str) -> (Router, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("arcade-static-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("player.png"), SPRITE_BYTES).unwrap();

    let arcade = Arcade::new(
        RulesConfig::default(),
        Box::new(ScriptedOutcomeSource::default()),
    );
    let state = AppState::new(arcade)
        .with_api_key(Some(TEST_KEY.to_owned()))
        .with_static_dir(dir.clone());
    (build_router(Arc::new(state)), dir)
}

#[tokio::test]
async fn test_static_asset_is_served() {
    let (router, dir) = make_static_router("served");
    let response = router
        .oneshot(
            Request::get("/static/player.png")
                .header(API_KEY_HEADER, TEST_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), SPRITE_BYTES);
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_static_asset_requires_api_key() {
    let (router, dir) = make_static_router("gated");
    let response = router
        .oneshot(
            Request::get("/static/player.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let _ = std::fs::remove_dir_all(&dir);
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_start_returns_default_state() {
    let router = make_router(vec![]);
    let (status, json) = send(&router, "POST", "/api/sessions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Game started");
    assert!(json["sessionId"].is_string());
    let state = &json["gameState"];
    assert_eq!(state["balance"], 1000);
    assert_eq!(state["currentBet"], 0);
    assert_eq!(state["lastWin"], 0);
    assert_eq!(state["score"], 0);
    assert_eq!(state["level"], 1);
    assert_eq!(state["history"], json!([]));
    assert_eq!(state["playerPosition"], json!({ "x": 0, "y": 0 }));
}

#[tokio::test]
async fn test_winning_round_pays_out_and_moves() {
    let router = make_router(vec![RoundOutcome::Win]);
    let id = start(&router).await;

    let (status, json) = send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/bet"),
        Some(json!({ "amount": 200 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gameState"]["balance"], 800);
    assert_eq!(json["gameState"]["currentBet"], 200);

    let (status, json) = send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/input"),
        Some(json!({ "direction": "right" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let state = &json["gameState"];
    assert_eq!(state["balance"], 1200);
    assert_eq!(state["lastWin"], 400);
    assert_eq!(state["currentBet"], 0);
    assert_eq!(state["playerPosition"]["x"], 1);
    assert_eq!(state["history"][0]["bet"], 200);
    assert_eq!(state["history"][0]["win"], 400);
    assert_eq!(state["history"][0]["newBalance"], 1200);
    assert!(state["history"][0]["timestamp"].is_string());
}

#[tokio::test]
async fn test_oversized_bet_is_rejected() {
    let router = make_router(vec![]);
    let id = start(&router).await;

    let (status, json) = send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/bet"),
        Some(json!({ "amount": 1500 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Insufficient balance");

    let (_, json) = send(&router, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(json["gameState"]["balance"], 1000);
    assert_eq!(json["gameState"]["currentBet"], 0);
}

#[tokio::test]
async fn test_negative_bet_is_rejected_by_extractor() {
    let router = make_router(vec![]);
    let id = start(&router).await;

    let (status, _) = send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/bet"),
        Some(json!({ "amount": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_input_body_resolves_without_moving() {
    let router = make_router(vec![RoundOutcome::Loss]);
    let id = start(&router).await;

    let (status, json) = send(&router, "POST", &format!("/api/sessions/{id}/input"), None).await;
    assert_eq!(status, StatusCode::OK);
    let state = &json["gameState"];
    assert_eq!(state["balance"], 1000);
    assert_eq!(state["playerPosition"], json!({ "x": 0, "y": 0 }));
    assert_eq!(state["history"][0]["bet"], 0);
}

#[tokio::test]
async fn test_unknown_direction_does_not_move() {
    let router = make_router(vec![RoundOutcome::Loss]);
    let id = start(&router).await;

    let (status, json) = send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/input"),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gameState"]["playerPosition"]["x"], 0);
}

#[tokio::test]
async fn test_malformed_input_body_is_bad_request() {
    let router = make_router(vec![]);
    let id = start(&router).await;

    let request = Request::post(format!("/api/sessions/{id}/input"))
        .header(API_KEY_HEADER, TEST_KEY)
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let router = make_router(vec![RoundOutcome::Loss]);
    let id = start(&router).await;

    send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/bet"),
        Some(json!({ "amount": 300 })),
    )
    .await;
    let (status, json) = send(&router, "POST", &format!("/api/sessions/{id}/reset"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Game reset");
    assert_eq!(json["gameState"]["balance"], 1000);
    assert_eq!(json["gameState"]["currentBet"], 0);
}

#[tokio::test]
async fn test_session_count_is_capped() {
    let rules = RulesConfig {
        max_sessions: 5,
        ..RulesConfig::default()
    };
    let arcade = Arcade::new(rules, Box::new(ScriptedOutcomeSource::default()));
    let state = Arc::new(AppState::new(arcade).with_api_key(Some(TEST_KEY.to_owned())));
    let router = build_router(Arc::clone(&state));

    let first = start(&router).await;
    for _ in 0..50 {
        start(&router).await;
    }

    assert_eq!(state.arcade.read().await.session_count(), 5);
    let (status, _) = send(&router, "GET", &format!("/api/sessions/{first}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_load_before_save_is_conflict() {
    let router = make_router(vec![]);
    let id = start(&router).await;

    let (status, json) = send(&router, "POST", &format!("/api/sessions/{id}/load"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);
}

#[tokio::test]
async fn test_save_then_load_restores_snapshot() {
    let router = make_router(vec![RoundOutcome::Loss]);
    let id = start(&router).await;

    send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/bet"),
        Some(json!({ "amount": 100 })),
    )
    .await;
    let (status, json) = send(&router, "POST", &format!("/api/sessions/{id}/save"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Game saved");

    // Lose the pending bet after the snapshot.
    send(
        &router,
        "POST",
        &format!("/api/sessions/{id}/input"),
        Some(json!({ "direction": "left" })),
    )
    .await;

    let (status, json) = send(&router, "POST", &format!("/api/sessions/{id}/load"), None).await;
    assert_eq!(status, StatusCode::OK);
    let state = &json["gameState"];
    assert_eq!(state["balance"], 900);
    assert_eq!(state["currentBet"], 100);
    assert_eq!(state["history"], json!([]));
    assert_eq!(state["playerPosition"]["x"], 0);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let router = make_router(vec![]);
    let first = start(&router).await;
    let second = start(&router).await;
    assert_ne!(first, second);

    send(
        &router,
        "POST",
        &format!("/api/sessions/{first}/bet"),
        Some(json!({ "amount": 250 })),
    )
    .await;

    let (_, json) = send(&router, "GET", &format!("/api/sessions/{second}"), None).await;
    assert_eq!(json["gameState"]["balance"], 1000);
}

// ---------------------------------------------------------------------------
// Bad session IDs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let router = make_router(vec![]);
    let (status, json) = send(
        &router,
        "GET",
        "/api/sessions/01890a5d-ac96-774b-bcce-b302099a8057",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_invalid_session_id_is_bad_request() {
    let router = make_router(vec![]);
    let (status, _) = send(&router, "POST", "/api/sessions/not-a-uuid/save", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
