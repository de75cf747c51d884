//! Shared domain types for Chatline.
//!
//! This crate contains the core domain types used across the Chatline backend:
//! chat messages, conversation keys, time windows, contacts, the response
//! envelope, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod chat;
pub mod config;
pub mod envelope;
pub mod error;
