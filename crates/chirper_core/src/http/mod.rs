//! Framework-neutral request handling for chirps.
//!
//! # Responsibility
//! - Name the routes chirp responses point at.
//! - Turn service outcomes into response envelopes (view, redirect, field
//!   errors, forbidden, not found).
//!
//! # Invariants
//! - Handlers never panic and never propagate errors; every outcome is a
//!   `Response`.
//! - Guests are redirected to `login` before any other work happens.

pub mod chirp_handler;
pub mod response;
pub mod routes;
