//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, authorization and repository calls into
//!   use-case level APIs.
//! - Keep the request handler decoupled from storage details.

pub mod chirp_service;
