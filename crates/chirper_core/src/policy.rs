//! Chirp authorization policy.
//!
//! # Invariants
//! - Only the recorded author may mutate a chirp.
//! - Any authenticated user may create and list chirps.

use crate::model::chirp::{Chirp, ChirpId};
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authenticated user is not allowed to perform the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forbidden {
    pub user_id: UserId,
    pub chirp_id: ChirpId,
}

impl Display for Forbidden {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "user {} is not allowed to modify chirp {}",
            self.user_id, self.chirp_id
        )
    }
}

impl Error for Forbidden {}

/// Ownership checks for chirp mutations.
pub struct ChirpPolicy;

impl ChirpPolicy {
    /// Allows the update only when `user_id` authored `chirp`.
    pub fn update(user_id: UserId, chirp: &Chirp) -> Result<(), Forbidden> {
        if chirp.is_authored_by(user_id) {
            Ok(())
        } else {
            Err(Forbidden {
                user_id,
                chirp_id: chirp.id,
            })
        }
    }
}
