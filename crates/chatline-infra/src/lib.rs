//! Infrastructure layer for Chatline.
//!
//! Contains implementations of the repository traits defined in `chatline-core`:
//! SQLite storage, an in-memory store, Argon2id credential hashing, and
//! configuration loading.

pub mod config;
pub mod crypto;
pub mod memory;
pub mod sqlite;

#[cfg(test)]
mod contract;
