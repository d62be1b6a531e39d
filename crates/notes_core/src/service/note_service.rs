//! Note and comment use-case service.
//!
//! # Responsibility
//! - Provide note create/get/list/edit/delete APIs.
//! - Provide comment create/list/edit/delete/restore APIs with authorship
//!   checks.
//! - Keep an archive of deleted notes.
//!
//! # Invariants
//! - Note and comment ids come from counters that are never rewound except
//!   by `reset`.
//! - Comment ids are global across notes.
//! - Deleted notes leave the active list and are only visible via `dump`.
//! - Deleted comments stay in their note with `is_deleted = true`.
//! - Listings order by `created_at`, ties broken by id.

use crate::model::note::{Comment, CommentId, Note, NoteId};
use crate::model::user::UserId;
use crate::service::error::{ServiceError, ServiceResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Ordering applied to note and comment listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recently created first (flag `0`).
    #[default]
    NewestFirst,
    /// Creation order (flag `1`).
    OldestFirst,
}

impl SortOrder {
    /// Maps a numeric sort flag: `1` is oldest first, anything else newest
    /// first.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 1 {
            Self::OldestFirst
        } else {
            Self::NewestFirst
        }
    }

    pub fn as_flag(self) -> u8 {
        match self {
            Self::NewestFirst => 0,
            Self::OldestFirst => 1,
        }
    }
}

/// Debug dump of the whole note registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSnapshot {
    /// Active notes in creation order.
    pub notes: Vec<Note>,
    /// Deleted notes in deletion order.
    pub archive: Vec<Note>,
}

/// In-memory note registry with comment moderation.
#[derive(Debug)]
pub struct NoteService {
    notes: Vec<Note>,
    archive: Vec<Note>,
    last_note_id: NoteId,
    last_comment_id: CommentId,
    default_sort: SortOrder,
    clock: fn() -> i64,
}

impl Default for NoteService {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteService {
    /// Creates an empty service using the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_time_ms)
    }

    /// Creates an empty service that stamps records with `clock()`.
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            notes: Vec::new(),
            archive: Vec::new(),
            last_note_id: 0,
            last_comment_id: 0,
            default_sort: SortOrder::default(),
            clock,
        }
    }

    /// Overrides the order used when listings pass no explicit order.
    pub fn with_default_sort(mut self, sort: SortOrder) -> Self {
        self.default_sort = sort;
        self
    }

    /// Creates one note and returns its id.
    ///
    /// `owner_id` is not checked against the user registry.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        owner_id: UserId,
    ) -> NoteId {
        self.last_note_id += 1;
        let note = Note::new(self.last_note_id, owner_id, title, text, (self.clock)());
        self.notes.push(note);
        info!(
            "event=note_add module=note_service status=ok note_id={} owner_id={}",
            self.last_note_id, owner_id
        );
        self.last_note_id
    }

    /// Gets one active note by id.
    ///
    /// # Errors
    /// - `NoteNotFound` when the id is absent or archived.
    pub fn get_by_id(&self, note_id: NoteId) -> ServiceResult<&Note> {
        self.notes
            .iter()
            .find(|note| note.id == note_id)
            .ok_or_else(|| rejected("note_get", ServiceError::NoteNotFound(note_id)))
    }

    /// Lists active notes of one owner.
    ///
    /// `None` falls back to the configured default order.
    pub fn list_by_owner(&self, owner_id: UserId, sort: Option<SortOrder>) -> Vec<Note> {
        let mut items: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by_key(|note| (note.created_at, note.id));
        if sort.unwrap_or(self.default_sort) == SortOrder::NewestFirst {
            items.reverse();
        }
        items
    }

    /// Replaces title and text of one active note.
    ///
    /// # Errors
    /// - `NoteNotFound` when the id is absent or archived.
    pub fn edit(
        &mut self,
        note_id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> ServiceResult<()> {
        let note = self.active_note_mut(note_id, "note_edit")?;
        note.title = title.into();
        note.text = text.into();
        debug!("event=note_edit module=note_service status=ok note_id={note_id}");
        Ok(())
    }

    /// Moves one active note into the archive.
    ///
    /// The archived copy keeps its comments and has `is_deleted = true`.
    ///
    /// # Errors
    /// - `NoteNotFound` when the id is absent or already archived.
    pub fn delete(&mut self, note_id: NoteId) -> ServiceResult<()> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == note_id)
            .ok_or_else(|| rejected("note_delete", ServiceError::NoteNotFound(note_id)))?;
        let mut note = self.notes.remove(index);
        note.is_deleted = true;
        self.archive.push(note);
        info!(
            "event=note_delete module=note_service status=ok note_id={note_id} archived={}",
            self.archive.len()
        );
        Ok(())
    }

    /// Appends one comment to an active note and returns its global id.
    ///
    /// # Errors
    /// - `NoteNotFound` when the note is absent or archived. No id is
    ///   consumed in that case.
    pub fn create_comment(
        &mut self,
        note_id: NoteId,
        author_id: UserId,
        message: impl Into<String>,
    ) -> ServiceResult<CommentId> {
        let created_at = (self.clock)();
        let comment_id = self.last_comment_id + 1;
        let note = self.active_note_mut(note_id, "comment_create")?;
        note.comments
            .push(Comment::new(comment_id, author_id, message, created_at));
        self.last_comment_id = comment_id;
        info!(
            "event=comment_create module=note_service status=ok note_id={note_id} comment_id={comment_id} author_id={author_id}"
        );
        Ok(comment_id)
    }

    /// Lists all comments of one active note, soft-deleted ones included.
    ///
    /// `None` falls back to the configured default order.
    ///
    /// # Errors
    /// - `NoteNotFound` when the note is absent or archived.
    pub fn list_comments(
        &self,
        note_id: NoteId,
        sort: Option<SortOrder>,
    ) -> ServiceResult<Vec<Comment>> {
        let note = self
            .notes
            .iter()
            .find(|note| note.id == note_id)
            .ok_or_else(|| rejected("comment_list", ServiceError::NoteNotFound(note_id)))?;
        let mut items = note.comments.clone();
        items.sort_by_key(|comment| (comment.created_at, comment.id));
        if sort.unwrap_or(self.default_sort) == SortOrder::NewestFirst {
            items.reverse();
        }
        Ok(items)
    }

    /// Replaces the message of one active comment.
    ///
    /// # Errors
    /// - `CommentNotFound` when no active comment has this id.
    /// - `AccessDenied` when `requester_id` is not the author.
    pub fn edit_comment(
        &mut self,
        comment_id: CommentId,
        requester_id: UserId,
        message: impl Into<String>,
    ) -> ServiceResult<()> {
        let (note_idx, comment_idx) = self.locate_comment(comment_id, false, "comment_edit")?;
        let comment = &mut self.notes[note_idx].comments[comment_idx];
        if comment.author_id != requester_id {
            return Err(rejected(
                "comment_edit",
                ServiceError::AccessDenied {
                    requester_id,
                    comment_id,
                },
            ));
        }
        comment.message = message.into();
        debug!(
            "event=comment_edit module=note_service status=ok comment_id={comment_id} requester_id={requester_id}"
        );
        Ok(())
    }

    /// Soft-deletes one active comment.
    ///
    /// # Errors
    /// - `CommentNotFound` when no active comment has this id, including
    ///   comments that are already deleted.
    /// - `AccessDenied` when `requester_id` is neither author nor note owner.
    pub fn delete_comment(
        &mut self,
        comment_id: CommentId,
        requester_id: UserId,
    ) -> ServiceResult<()> {
        let comment =
            self.moderated_comment_mut(comment_id, requester_id, false, "comment_delete")?;
        comment.soft_delete();
        info!(
            "event=comment_delete module=note_service status=ok comment_id={comment_id} requester_id={requester_id}"
        );
        Ok(())
    }

    /// Restores one soft-deleted comment.
    ///
    /// # Errors
    /// - `CommentNotFound` when no deleted comment has this id, including
    ///   comments that are still active.
    /// - `AccessDenied` when `requester_id` is neither author nor note owner.
    pub fn restore_comment(
        &mut self,
        comment_id: CommentId,
        requester_id: UserId,
    ) -> ServiceResult<()> {
        let comment =
            self.moderated_comment_mut(comment_id, requester_id, true, "comment_restore")?;
        comment.restore();
        info!(
            "event=comment_restore module=note_service status=ok comment_id={comment_id} requester_id={requester_id}"
        );
        Ok(())
    }

    /// Returns a copy of active notes and the archive.
    pub fn dump(&self) -> ServiceSnapshot {
        ServiceSnapshot {
            notes: self.notes.clone(),
            archive: self.archive.clone(),
        }
    }

    /// Clears notes and archive and restarts both id counters.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.archive.clear();
        self.last_note_id = 0;
        self.last_comment_id = 0;
        debug!("event=service_reset module=note_service status=ok");
    }

    fn active_note_mut(
        &mut self,
        note_id: NoteId,
        event: &'static str,
    ) -> ServiceResult<&mut Note> {
        self.notes
            .iter_mut()
            .find(|note| note.id == note_id)
            .ok_or_else(|| rejected(event, ServiceError::NoteNotFound(note_id)))
    }

    /// Finds `(note index, comment index)` among comments whose deleted flag
    /// equals `deleted`.
    fn locate_comment(
        &self,
        comment_id: CommentId,
        deleted: bool,
        event: &'static str,
    ) -> ServiceResult<(usize, usize)> {
        self.notes
            .iter()
            .enumerate()
            .find_map(|(note_idx, note)| {
                note.comments
                    .iter()
                    .position(|comment| comment.id == comment_id && comment.is_deleted == deleted)
                    .map(|comment_idx| (note_idx, comment_idx))
            })
            .ok_or_else(|| rejected(event, ServiceError::CommentNotFound(comment_id)))
    }

    fn moderated_comment_mut(
        &mut self,
        comment_id: CommentId,
        requester_id: UserId,
        deleted: bool,
        event: &'static str,
    ) -> ServiceResult<&mut Comment> {
        let (note_idx, comment_idx) = self.locate_comment(comment_id, deleted, event)?;
        let note = &mut self.notes[note_idx];
        if !note.can_moderate(&note.comments[comment_idx], requester_id) {
            return Err(rejected(
                event,
                ServiceError::AccessDenied {
                    requester_id,
                    comment_id,
                },
            ));
        }
        Ok(&mut note.comments[comment_idx])
    }
}

fn rejected(event: &'static str, err: ServiceError) -> ServiceError {
    warn!(
        "event={event} module=note_service status=error error_code={} error={err}",
        err.code()
    );
    err
}

fn system_time_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
