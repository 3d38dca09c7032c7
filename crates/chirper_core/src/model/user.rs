//! User domain model.
//!
//! Users are the author references chirps point at. Credentials and sessions
//! are owned by the authentication layer and never stored here.

use super::now_epoch_ms;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a user.
pub type UserId = Uuid;

/// Account that can author chirps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name shown next to chirps.
    pub name: String,
    /// Unique login address.
    pub email: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// User field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    BlankName,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "user name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Creates a user with a generated ID. Name and email are trimmed.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            created_at: now_epoch_ms(),
        }
    }

    /// Validates name and email shape.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(UserValidationError::InvalidEmail(self.email.clone())),
        }
    }
}
