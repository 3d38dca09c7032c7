//! Authentication boundary.
//!
//! The session layer owns login; core only sees the identity it resolved for
//! the current request. Guests are stopped here, before any handler logic,
//! validation, or storage access runs.

use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity attached to one incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// No authenticated session.
    Guest,
    /// Session resolved to a known user.
    User(UserId),
}

impl Requester {
    /// Builds a requester from an optional session user.
    pub fn from_session(user_id: Option<UserId>) -> Self {
        user_id.map_or(Self::Guest, Self::User)
    }

    pub fn user_id(self) -> Option<UserId> {
        match self {
            Self::Guest => None,
            Self::User(id) => Some(id),
        }
    }
}

/// Request carried no authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthenticated;

impl Display for Unauthenticated {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unauthenticated")
    }
}

impl Error for Unauthenticated {}

/// Resolves the authenticated user for `requester`.
///
/// # Errors
/// - `Unauthenticated` for guests.
pub fn authenticate(requester: Requester) -> Result<UserId, Unauthenticated> {
    requester.user_id().ok_or(Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::{authenticate, Requester, Unauthenticated};
    use uuid::Uuid;

    #[test]
    fn guests_are_rejected() {
        assert_eq!(authenticate(Requester::Guest), Err(Unauthenticated));
        assert_eq!(Requester::from_session(None), Requester::Guest);
    }

    #[test]
    fn session_user_is_returned() {
        let id = Uuid::new_v4();
        assert_eq!(authenticate(Requester::from_session(Some(id))), Ok(id));
    }
}
