//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the accounts chirps are authored by.
//!
//! # Invariants
//! - Email addresses are unique; duplicates surface as `RepoError::Conflict`.
//! - Write paths call `User::validate()` before SQL mutations.

use super::{constraint_violation, ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, Row};

/// Repository interface for user persistence.
pub trait UserRepository {
    /// Inserts one user and returns its stable ID.
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    /// Loads one user by ID.
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        let result = self.conn.execute(
            "INSERT INTO users (id, name, email, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                user.name.as_str(),
                user.email.as_str(),
                user.created_at,
            ],
        );

        match result {
            Ok(_) => Ok(user.id),
            Err(err)
                if constraint_violation(&err) == Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) =>
            {
                Err(RepoError::Conflict(format!(
                    "email `{}` is already registered",
                    user.email
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, created_at FROM users WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    Ok(User {
        id: parse_uuid(&id_text, "users.id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
    })
}
