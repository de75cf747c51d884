//! Identity commands: register, login, verify.

use std::process::ExitCode;

use anyhow::Result;

use chatline_core::response::compose;

use crate::cli::output::{OutputMode, render};
use crate::state::AppState;

pub async fn register(
    state: &AppState,
    username: &str,
    password: &str,
    mode: OutputMode,
) -> Result<ExitCode> {
    let envelope = compose(state.identity.register(username, password).await);
    render(&envelope, &format!("Registered '{username}'"), mode)
}

pub async fn login(
    state: &AppState,
    username: &str,
    password: &str,
    mode: OutputMode,
) -> Result<ExitCode> {
    let result = state.identity.authenticate(username, password).await;
    let message = format!("Credentials valid for '{username}'");
    render(&compose(result), &message, mode)
}

pub async fn verify(state: &AppState, username: &str, mode: OutputMode) -> Result<ExitCode> {
    let envelope = compose(state.identity.verify_exists(username).await);
    render(&envelope, &format!("'{username}' is registered"), mode)
}
