//! User registry service.
//!
//! # Responsibility
//! - Register users with sequential ids.
//! - Look users up by id.
//!
//! # Invariants
//! - Ids start at 1 and increase by one per registration.
//! - Users are never removed except through `reset`.

use crate::model::user::{User, UserId};
use crate::service::error::{ServiceError, ServiceResult};
use log::{debug, warn};

/// In-memory user registry.
#[derive(Debug, Default)]
pub struct UserService {
    users: Vec<User>,
    last_id: UserId,
}

impl UserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one user and returns the stored record.
    ///
    /// Pass `None` as `last_name` for nickname-only users.
    pub fn register(&mut self, first_name: impl Into<String>, last_name: Option<String>) -> User {
        self.last_id += 1;
        let user = User {
            id: self.last_id,
            first_name: first_name.into(),
            last_name,
        };
        self.users.push(user.clone());
        debug!(
            "event=user_register module=user_service status=ok user_id={}",
            user.id
        );
        user
    }

    /// Gets one user by id.
    ///
    /// # Errors
    /// - `UserNotFound` when no user has this id.
    pub fn get_by_id(&self, id: UserId) -> ServiceResult<&User> {
        self.users.iter().find(|user| user.id == id).ok_or_else(|| {
            warn!(
                "event=user_get module=user_service status=error error_code=user_not_found user_id={id}"
            );
            ServiceError::UserNotFound(id)
        })
    }

    /// All users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Clears all users and restarts ids at 1.
    pub fn reset(&mut self) {
        self.users.clear();
        self.last_id = 0;
    }
}
