//! Conversation endpoints.
//!
//! Endpoints:
//! - GET  /chat-history?u1&u2&from-ts&to-ts - Messages between two users
//! - GET  /contact-list?username            - Counterparties of a user
//! - POST /send-message                     - Store a message

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;

use chatline_core::response::compose;
use chatline_types::chat::TimeBound;
use chatline_types::envelope::ResponseEnvelope;

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for the chat history endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    #[serde(default)]
    pub u1: String,
    #[serde(default)]
    pub u2: String,
    #[serde(rename = "from-ts", default)]
    pub from_ts: Option<String>,
    #[serde(rename = "to-ts", default)]
    pub to_ts: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContactQuery {
    #[serde(default)]
    pub username: String,
}

/// Request body for send-message. Field names follow the chat client.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub message: String,
    /// Seconds since the epoch; the server clock when absent.
    pub timestamp: Option<i64>,
}

/// An absent or empty bound is "not supplied"; anything else must parse.
fn parse_bound(raw: Option<&str>) -> Result<Option<TimeBound>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.parse::<TimeBound>()?)),
    }
}

/// GET /chat-history
pub async fn chat_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Query(query) = query?;
    let from = parse_bound(query.from_ts.as_deref())?;
    let to = parse_bound(query.to_ts.as_deref())?;

    let result = state
        .conversations
        .fetch_history(&query.u1, &query.u2, from, to)
        .await;
    Ok(Json(compose(result)))
}

/// GET /contact-list
pub async fn contact_list(
    State(state): State<AppState>,
    query: Result<Query<ContactQuery>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Query(query) = query?;

    let result = state.conversations.fetch_contacts(&query.username).await;
    Ok(Json(compose(result)))
}

/// POST /send-message
///
/// On success `data` holds the stored message (with its id and timestamp).
pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(req) = body?;

    let result = state
        .conversations
        .record_message(&req.from, &req.to, &req.message, req.timestamp)
        .await
        .map(|message| vec![message]);
    Ok(Json(compose(result)))
}
