//! Conversation commands: history, contacts, send.

use std::process::ExitCode;

use anyhow::Result;

use chatline_core::response::compose;
use chatline_types::chat::TimeBound;

use crate::cli::output::{OutputMode, render};
use crate::state::AppState;

pub async fn history(
    state: &AppState,
    u1: &str,
    u2: &str,
    from: Option<TimeBound>,
    to: Option<TimeBound>,
    mode: OutputMode,
) -> Result<ExitCode> {
    let result = state.conversations.fetch_history(u1, u2, from, to).await;
    render(&compose(result), "", mode)
}

pub async fn contacts(state: &AppState, username: &str, mode: OutputMode) -> Result<ExitCode> {
    let result = state.conversations.fetch_contacts(username).await;
    render(&compose(result), "", mode)
}

pub async fn send(
    state: &AppState,
    from: &str,
    to: &str,
    message: &str,
    timestamp: Option<i64>,
    mode: OutputMode,
) -> Result<ExitCode> {
    let result = state
        .conversations
        .record_message(from, to, message, timestamp)
        .await
        .map(|message| vec![message]);
    render(&compose(result), "", mode)
}
