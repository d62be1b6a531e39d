//! Note and comment domain model.
//!
//! # Responsibility
//! - Define the note record and the comments it owns.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` values are assigned by `NoteService` counters and never reused.
//! - Comment ids are global across all notes, not scoped per note.
//! - `is_deleted` is the source of truth for tombstone state.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sequential note identifier, starts at 1.
pub type NoteId = u64;

/// Sequential comment identifier shared by every note in one service.
pub type CommentId = u64;

/// Visibility level attached to notes and comments.
///
/// Stored only; no read path enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    /// Visible to everyone (wire value `0`).
    #[default]
    Public,
    /// Friends only (wire value `1`).
    Friends,
    /// Friends and friends of friends (wire value `2`).
    FriendsOfFriends,
    /// Owner only (wire value `3`).
    OwnerOnly,
}

impl Privacy {
    /// Returns the numeric wire value.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Friends => 1,
            Self::FriendsOfFriends => 2,
            Self::OwnerOnly => 3,
        }
    }
}

/// Rejected numeric privacy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPrivacy(pub u8);

impl Display for InvalidPrivacy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid privacy value `{}`; expected 0|1|2|3", self.0)
    }
}

impl Error for InvalidPrivacy {}

impl TryFrom<u8> for Privacy {
    type Error = InvalidPrivacy;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::Friends),
            2 => Ok(Self::FriendsOfFriends),
            3 => Ok(Self::OwnerOnly),
            other => Err(InvalidPrivacy(other)),
        }
    }
}

/// Comment attached to exactly one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    /// User that wrote the comment.
    pub author_id: UserId,
    pub message: String,
    pub privacy: Privacy,
    /// Soft delete tombstone; deleted comments stay in the parent list.
    pub is_deleted: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    /// Creates an active public comment.
    pub fn new(
        id: CommentId,
        author_id: UserId,
        message: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            author_id,
            message: message.into(),
            privacy: Privacy::Public,
            is_deleted: false,
            created_at,
        }
    }

    /// Marks this comment as softly deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this comment should be considered visible.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Note record owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub text: String,
    /// Comments in insertion order, including soft-deleted ones.
    pub comments: Vec<Comment>,
    pub privacy: Privacy,
    /// Set only on the archived copy of a deleted note.
    pub is_deleted: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates an active public note without comments.
    pub fn new(
        id: NoteId,
        owner_id: UserId,
        title: impl Into<String>,
        text: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            text: text.into(),
            comments: Vec::new(),
            privacy: Privacy::Public,
            is_deleted: false,
            created_at,
        }
    }

    /// Returns whether `user_id` may delete or restore `comment`.
    ///
    /// Both the comment author and the note owner qualify.
    pub fn can_moderate(&self, comment: &Comment, user_id: UserId) -> bool {
        comment.author_id == user_id || self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::{Comment, Note, Privacy};

    #[test]
    fn privacy_maps_wire_values_both_ways() {
        for value in 0..=3u8 {
            let privacy = Privacy::try_from(value).expect("0..=3 should be valid");
            assert_eq!(privacy.as_u8(), value);
        }
        assert!(Privacy::try_from(4).is_err());
    }

    #[test]
    fn note_new_sets_defaults() {
        let note = Note::new(1, 7, "title", "body", 42);
        assert_eq!(note.privacy, Privacy::Public);
        assert!(note.comments.is_empty());
        assert!(!note.is_deleted);
        assert_eq!(note.created_at, 42);
    }

    #[test]
    fn owner_and_author_can_moderate_but_others_cannot() {
        let note = Note::new(1, 7, "title", "body", 0);
        let comment = Comment::new(1, 9, "hi", 0);
        assert!(note.can_moderate(&comment, 7));
        assert!(note.can_moderate(&comment, 9));
        assert!(!note.can_moderate(&comment, 3));
    }

    #[test]
    fn comment_soft_delete_and_restore_toggle_flag() {
        let mut comment = Comment::new(1, 1, "hi", 0);
        comment.soft_delete();
        assert!(!comment.is_active());
        comment.restore();
        assert!(comment.is_active());
    }
}
