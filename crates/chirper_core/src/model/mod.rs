//! Domain model for users and their chirps.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own field validation rules shared by create and update paths.
//!
//! # Invariants
//! - Every chirp has exactly one author, fixed at creation time.
//! - Identifiers are stable UUIDs and never reused.

pub mod chirp;
pub mod user;
pub mod validation;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
