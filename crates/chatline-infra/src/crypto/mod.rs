//! Cryptographic operations for Chatline.
//!
//! - `password`: Argon2id credential hashing for the user stores

pub mod password;
