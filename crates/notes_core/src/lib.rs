//! Core domain logic for the in-memory notes service.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Comment, CommentId, InvalidPrivacy, Note, NoteId, Privacy};
pub use model::user::{User, UserId};
pub use service::error::{ServiceError, ServiceResult};
pub use service::note_service::{NoteService, ServiceSnapshot, SortOrder};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
