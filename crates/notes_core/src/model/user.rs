//! User domain model.
//!
//! Users are created only through `UserService::register` and are immutable
//! afterwards.

use serde::{Deserialize, Serialize};

/// Sequential user identifier, starts at 1.
pub type UserId = u64;

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// First name, or the nickname when `last_name` is absent.
    pub first_name: String,
    pub last_name: Option<String>,
}

impl User {
    /// Returns `first last`, or just the first name for nickname-only users.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}
