//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory user and note registries.
//! - Enforce authorship rules for comment moderation.

pub mod error;
pub mod note_service;
pub mod user_service;
