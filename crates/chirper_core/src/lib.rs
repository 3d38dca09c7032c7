//! Core domain logic for chirper.
//! This crate is the single source of truth for chirp ownership and message
//! rules.

pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;

pub use auth::{authenticate, Requester, Unauthenticated};
pub use config::{ChirperConfig, ConfigError, ConfigOverrides};
pub use http::chirp_handler::ChirpHandler;
pub use http::response::{ChirpForm, ChirpIndexProps, Response, CHIRPS_INDEX_COMPONENT};
pub use http::routes::{Method, Route};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::chirp::{Chirp, ChirpId};
pub use model::user::{User, UserId, UserValidationError};
pub use model::validation::{
    normalize_message, validate_message, Rule, ValidationErrors, MESSAGE_FIELD,
    MESSAGE_MAX_CHARS,
};
pub use policy::{ChirpPolicy, Forbidden};
pub use repo::chirp_repo::{ChirpAuthor, ChirpRecord, ChirpRepository, SqliteChirpRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::chirp_service::{ChirpService, ChirpServiceError, ChirpServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
