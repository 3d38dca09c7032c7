//! Chirp domain model.
//!
//! # Responsibility
//! - Define the canonical short message record and its author reference.
//! - Expose the ownership check used by update authorization.
//!
//! # Invariants
//! - `id` and `user_id` never change after creation.
//! - `message` satisfies [`MESSAGE_RULES`](super::validation::MESSAGE_RULES)
//!   whenever it is persisted.

use super::now_epoch_ms;
use super::user::UserId;
use super::validation::{validate_message, ValidationErrors};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a chirp.
pub type ChirpId = Uuid;

/// One posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: ChirpId,
    /// Author reference. Set from the authenticated requester at creation.
    pub user_id: UserId,
    pub message: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Bumped by storage on every message update.
    pub updated_at: i64,
}

impl Chirp {
    /// Creates a new chirp authored by `user_id` with a generated ID.
    ///
    /// This constructor does not validate `message`; repository writes do.
    pub fn new(user_id: UserId, message: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            user_id,
            message: message.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks `message` against the chirp field rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_message(&self.message)
    }

    /// Returns whether `user_id` is the recorded author.
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::Chirp;
    use uuid::Uuid;

    #[test]
    fn new_chirp_records_author_and_equal_timestamps() {
        let author = Uuid::new_v4();
        let chirp = Chirp::new(author, "hello");
        assert_eq!(chirp.user_id, author);
        assert_eq!(chirp.message, "hello");
        assert_eq!(chirp.created_at, chirp.updated_at);
        assert!(chirp.created_at > 0);
    }

    #[test]
    fn authorship_is_an_exact_id_comparison() {
        let author = Uuid::new_v4();
        let chirp = Chirp::new(author, "mine");
        assert!(chirp.is_authored_by(author));
        assert!(!chirp.is_authored_by(Uuid::new_v4()));
    }

    #[test]
    fn validate_delegates_to_message_rules() {
        let chirp = Chirp::new(Uuid::new_v4(), " ");
        let errors = chirp.validate().expect_err("blank chirp must fail");
        assert!(errors.has("message"));
    }
}
