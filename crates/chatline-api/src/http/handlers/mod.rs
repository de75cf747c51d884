//! REST API endpoint handlers.

pub mod conversation;
pub mod identity;
