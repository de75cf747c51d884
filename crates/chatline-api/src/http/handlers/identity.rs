//! Identity endpoints.
//!
//! Endpoints:
//! - POST /register       - Create an account
//! - POST /login          - Check a username/password pair
//! - POST /verify-contact - Check that a username is registered

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use chatline_core::response::compose;
use chatline_types::envelope::ResponseEnvelope;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for register and login.
///
/// Missing fields decode as empty strings and are rejected by the services.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Client identifier (e.g. "web", "cli"). Logged only.
    #[serde(default)]
    pub client: Option<String>,
}

/// Request body for verify-contact.
#[derive(Debug, Deserialize)]
pub struct VerifyContactRequest {
    #[serde(default)]
    pub username: String,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(req) = body?;
    tracing::debug!(username = %req.username, client = ?req.client, "Register request");

    let result = state.identity.register(&req.username, &req.password).await;
    Ok(Json(compose(result)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(req) = body?;
    tracing::debug!(username = %req.username, client = ?req.client, "Login request");

    let result = state
        .identity
        .authenticate(&req.username, &req.password)
        .await;
    Ok(Json(compose(result)))
}

/// POST /verify-contact
pub async fn verify_contact(
    State(state): State<AppState>,
    body: Result<Json<VerifyContactRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let Json(req) = body?;

    let result = state.identity.verify_exists(&req.username).await;
    Ok(Json(compose(result)))
}
