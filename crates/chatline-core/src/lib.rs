//! Business logic and repository trait definitions for Chatline.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the identity and conversation services built on top of
//! them, and the composer that turns service outcomes into response envelopes.
//! It depends only on `chatline-types` -- never on `chatline-infra` or any
//! database/IO crate.

pub mod repository;
pub mod response;
pub mod service;
