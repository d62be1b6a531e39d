//! Service error taxonomy shared by user and note services.
//!
//! # Invariants
//! - Every variant names the offending identifier.
//! - Errors abort only the current operation; service state is unchanged.

use crate::model::note::{CommentId, NoteId};
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by `UserService` and `NoteService` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Target note is absent from the active collection.
    NoteNotFound(NoteId),
    /// Target comment is absent from the searched scope.
    CommentNotFound(CommentId),
    /// Requester is neither the required author nor the note owner.
    AccessDenied {
        requester_id: UserId,
        comment_id: CommentId,
    },
    /// User id is not registered.
    UserNotFound(UserId),
}

impl ServiceError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoteNotFound(_) => "note_not_found",
            Self::CommentNotFound(_) => "comment_not_found",
            Self::AccessDenied { .. } => "access_denied",
            Self::UserNotFound(_) => "user_not_found",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::AccessDenied {
                requester_id,
                comment_id,
            } => write!(
                f,
                "access denied: user {requester_id} on comment {comment_id}"
            ),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
        }
    }
}

impl Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::ServiceError;

    #[test]
    fn messages_reference_offending_ids() {
        assert_eq!(
            ServiceError::NoteNotFound(3).to_string(),
            "note not found: 3"
        );
        assert_eq!(
            ServiceError::CommentNotFound(5).to_string(),
            "comment not found: 5"
        );
        assert_eq!(
            ServiceError::AccessDenied {
                requester_id: 2,
                comment_id: 1
            }
            .to_string(),
            "access denied: user 2 on comment 1"
        );
        assert_eq!(
            ServiceError::UserNotFound(9).to_string(),
            "user not found: 9"
        );
    }

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(ServiceError::NoteNotFound(1).code(), "note_not_found");
        assert_eq!(
            ServiceError::AccessDenied {
                requester_id: 1,
                comment_id: 1
            }
            .code(),
            "access_denied"
        );
    }
}
