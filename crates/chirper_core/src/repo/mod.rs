//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts (the persistence boundary).
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes re-check model validation before persistence.
//! - Repository APIs return semantic errors (`*NotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod chirp_repo;
pub mod user_repo;

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::chirp::ChirpId;
use crate::model::user::{UserId, UserValidationError};
use crate::model::validation::ValidationErrors;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by user and chirp persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationErrors),
    InvalidUser(UserValidationError),
    Db(DbError),
    ChirpNotFound(ChirpId),
    UserNotFound(UserId),
    /// Unique constraint violation, e.g. a duplicate email.
    Conflict(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidUser(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ChirpNotFound(id) => write!(f, "chirp not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidUser(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::ChirpNotFound(_)
            | Self::UserNotFound(_)
            | Self::Conflict(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not bootstrapped through `db::open_db*`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let version = schema_version(conn)?;
    let latest = latest_version();
    if version != latest {
        return Err(RepoError::InvalidData(format!(
            "connection schema version {version} does not match expected {latest}"
        )));
    }
    Ok(())
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Returns the extended constraint code when `err` is a constraint violation.
pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(failure.extended_code)
        }
        _ => None,
    }
}
