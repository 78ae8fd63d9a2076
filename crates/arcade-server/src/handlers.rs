//! REST API endpoint handlers for the Arcade server.
//!
//! Session handlers lock the shared [`Arcade`](arcade_core::Arcade), run one
//! action, and answer with the full session snapshot.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/config` | Game presentation config (or `null`) |
//! | `GET` | `/api-docs` | HTML endpoint reference |
//! | `POST` | `/api/sessions` | Start a new session |
//! | `GET` | `/api/sessions/{id}` | Current session state |
//! | `POST` | `/api/sessions/{id}/reset` | Reset to defaults |
//! | `POST` | `/api/sessions/{id}/bet` | Place a bet (`{"amount": n}`) |
//! | `POST` | `/api/sessions/{id}/input` | Move and resolve a round (`{"direction": "left"}`) |
//! | `POST` | `/api/sessions/{id}/save` | Snapshot the session |
//! | `POST` | `/api/sessions/{id}/load` | Restore the snapshot |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use arcade_types::{Direction, Session, SessionId};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/sessions/{id}/bet`.
#[derive(Debug, Deserialize)]
pub struct PlaceBetRequest {
    /// Whole credits to wager.
    pub amount: u64,
}

/// Request body for `POST /api/sessions/{id}/input`.
///
/// `direction` is kept as raw JSON: anything other than the strings
/// `"left"` and `"right"` is a valid request that simply does not move.
#[derive(Debug, Default, Deserialize)]
pub struct InputRequest {
    /// Requested move.
    #[serde(default)]
    pub direction: Option<Value>,
}

impl InputRequest {
    /// The recognized direction, if any.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
            .as_ref()
            .and_then(Value::as_str)
            .and_then(Direction::parse)
    }
}

/// Response carrying a session snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameStateResponse<'a> {
    /// Human-readable summary of the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    /// The session acted on.
    session_id: SessionId,
    /// Full session state after the action.
    game_state: &'a Session,
}

/// Acknowledgement without session state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AckResponse {
    message: &'static str,
    session_id: SessionId,
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidSessionId(format!("'{raw}' is not a valid session id: {e}")))
}

/// Serialize the response while the engine lock is still held.
fn respond(
    message: Option<&'static str>,
    session_id: SessionId,
    game_state: &Session,
) -> Result<Json<Value>, ApiError> {
    serde_json::to_value(GameStateResponse {
        message,
        session_id,
        game_state,
    })
    .map(Json)
    .map_err(|e| ApiError::Internal(format!("serializing session: {e}")))
}

// ---------------------------------------------------------------------------
// GET /config
// ---------------------------------------------------------------------------

/// Return the game presentation document exactly as loaded, or `null` if it
/// could not be loaded at startup.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Option<Value>> {
    Json(state.game_config.clone())
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// Start a new session with default values.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut arcade = state.arcade.write().await;
    let (id, session) = arcade.start();
    respond(Some("Game started"), id, session)
}

/// Return the current state of a session.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    let arcade = state.arcade.read().await;
    let session = arcade.state(id)?;
    respond(None, id, session)
}

/// Reset a session to default values.
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    let mut arcade = state.arcade.write().await;
    let session = arcade.reset(id)?;
    respond(Some("Game reset"), id, session)
}

/// Snapshot the live session.
pub async fn save_session(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    state.arcade.write().await.save(id)?;
    Ok(Json(AckResponse {
        message: "Game saved",
        session_id: id,
    }))
}

/// Restore the live session from its snapshot.
///
/// Answers `409 Conflict` if the session was never saved.
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    let mut arcade = state.arcade.write().await;
    let session = arcade.load(id)?;
    respond(Some("Game loaded"), id, session)
}

// ---------------------------------------------------------------------------
// Game actions
// ---------------------------------------------------------------------------

/// Place a bet, escrowing the amount from the balance.
///
/// Answers `400` with `Insufficient balance` when the amount exceeds the
/// balance; negative, fractional, or missing amounts are rejected by the
/// JSON extractor.
pub async fn place_bet(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    payload: Result<Json<PlaceBetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    let Json(body) = payload?;
    let mut arcade = state.arcade.write().await;
    let session = arcade.place_bet(id, body.amount)?;
    respond(Some("Bet placed"), id, session)
}

/// Apply a move and resolve one round.
///
/// The body is optional; an empty body, a missing `direction`, or an
/// unrecognized one all resolve the round without moving.
pub async fn process_input(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session_id(&id_str)?;
    let input: InputRequest = if body.iter().all(u8::is_ascii_whitespace) {
        InputRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidInput(e.to_string()))?
    };

    let mut arcade = state.arcade.write().await;
    let (session, _) = arcade.process_input(id, input.direction())?;
    respond(Some("Input processed"), id, session)
}

// ---------------------------------------------------------------------------
// GET /api-docs -- endpoint reference page
// ---------------------------------------------------------------------------

/// Serve an HTML page documenting the API, with live session count and rules.
pub async fn api_docs(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let arcade = state.arcade.read().await;
    let sessions = arcade.session_count();
    let rules = arcade.rules();
    let starting_balance = rules.starting_balance;
    let multiplier = rules.payout_multiplier;
    let win_probability = rules.win_probability;
    let gated = if state.api_key.is_some() {
        "required"
    } else {
        "disabled"
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Arcade API</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 860px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ border-bottom: 1px solid #30363d; padding: 0.4rem; text-align: left; }}
        .method {{ color: #7ee787; font-weight: bold; }}
        code {{ color: #ffa657; }}
    </style>
</head>
<body>
    <h1>Arcade API</h1>
    <p class="subtitle">Coin-flip wager backend. Send <code>x-api-key</code> on every request (currently {gated}).</p>

    <div>
        <div class="metric"><div class="label">Sessions</div><div class="value">{sessions}</div></div>
        <div class="metric"><div class="label">Starting balance</div><div class="value">{starting_balance}</div></div>
        <div class="metric"><div class="label">Payout</div><div class="value">{multiplier}x</div></div>
        <div class="metric"><div class="label">Win chance</div><div class="value">{win_probability}</div></div>
    </div>

    <h2>Endpoints</h2>
    <table>
        <tr><th>Method</th><th>Path</th><th>Body</th><th>Effect</th></tr>
        <tr><td class="method">GET</td><td>/config</td><td></td><td>Game presentation config, or <code>null</code></td></tr>
        <tr><td class="method">POST</td><td>/api/sessions</td><td></td><td>Start a session; returns <code>sessionId</code></td></tr>
        <tr><td class="method">GET</td><td>/api/sessions/{{id}}</td><td></td><td>Current <code>gameState</code></td></tr>
        <tr><td class="method">POST</td><td>/api/sessions/{{id}}/reset</td><td></td><td>Reset to defaults</td></tr>
        <tr><td class="method">POST</td><td>/api/sessions/{{id}}/bet</td><td><code>{{"amount": 200}}</code></td><td>Escrow a bet; 400 if above balance</td></tr>
        <tr><td class="method">POST</td><td>/api/sessions/{{id}}/input</td><td><code>{{"direction": "left"}}</code></td><td>Move and resolve a round</td></tr>
        <tr><td class="method">POST</td><td>/api/sessions/{{id}}/save</td><td></td><td>Snapshot the session</td></tr>
        <tr><td class="method">POST</td><td>/api/sessions/{{id}}/load</td><td></td><td>Restore the snapshot; 409 if never saved</td></tr>
        <tr><td class="method">GET</td><td>/static/*</td><td></td><td>Game assets</td></tr>
    </table>
</body>
</html>"#
    ))
}
