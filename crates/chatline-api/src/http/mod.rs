//! HTTP/REST API layer for Chatline.
//!
//! Axum-based JSON API. Every operation answers with the response envelope;
//! only malformed requests are rejected at the transport with HTTP 400.

pub mod error;
pub mod handlers;
pub mod router;
