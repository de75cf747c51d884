//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (chatline-infra) implements. The core crate never depends on any
//! specific storage technology.
//!
//! Each trait uses native async fn in traits and therefore is not object
//! safe; the `box_*` modules provide type-erased wrappers so services can
//! receive their store at runtime.

pub mod box_conversation;
pub mod box_user;
pub mod conversation;
pub mod user;
