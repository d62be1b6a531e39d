//! Domain model for users, notes and comments.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every record is identified by a sequential integer id.
//! - Comment deletion is represented by soft-delete tombstones.
//! - Note deletion moves the record into the service archive.

pub mod note;
pub mod user;
