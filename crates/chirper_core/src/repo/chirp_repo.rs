//! Chirp repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the insert/find/update/list persistence boundary for chirps.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the message before SQL mutations.
//! - Message updates touch `message` and `updated_at` only; `id`, `user_id`
//!   and `created_at` are never rewritten.
//! - `created_at` never goes below the newest stored chirp, so a clock
//!   stepping backwards cannot reorder the list.
//! - Lists are ordered by `created_at ASC, rowid ASC` (insertion order).

use super::{constraint_violation, ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use crate::model::chirp::{Chirp, ChirpId};
use crate::model::now_epoch_ms;
use crate::model::user::UserId;
use crate::model::validation::validate_message;
use rusqlite::{params, Connection, Row};
use serde::Serialize;

const CHIRP_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    message,
    created_at,
    updated_at
FROM chirps";

/// Author projection embedded in list rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpAuthor {
    pub id: UserId,
    pub name: String,
}

/// Read model for the chirp list, joined with author info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpRecord {
    pub id: ChirpId,
    pub message: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
    /// Serialized as `user` to match the list view contract.
    #[serde(rename = "user")]
    pub author: ChirpAuthor,
}

/// Repository interface for chirp persistence.
pub trait ChirpRepository {
    /// Inserts one chirp and returns its stable ID.
    fn insert_chirp(&self, chirp: &Chirp) -> RepoResult<ChirpId>;
    /// Loads one chirp by ID; absent rows yield `None`.
    fn find_chirp(&self, id: ChirpId) -> RepoResult<Option<Chirp>>;
    /// Replaces the message of one chirp.
    fn update_chirp_message(&self, id: ChirpId, message: &str) -> RepoResult<()>;
    /// Lists every chirp, oldest first, with author info.
    fn list_chirps(&self) -> RepoResult<Vec<ChirpRecord>>;
}

/// SQLite-backed chirp repository.
pub struct SqliteChirpRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChirpRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ChirpRepository for SqliteChirpRepository<'_> {
    fn insert_chirp(&self, chirp: &Chirp) -> RepoResult<ChirpId> {
        chirp.validate()?;

        let result = self.conn.execute(
            "INSERT INTO chirps (
                id,
                user_id,
                message,
                created_at,
                updated_at
            )
            SELECT
                ?1,
                ?2,
                ?3,
                MAX(?4, COALESCE(MAX(created_at), ?4)),
                MAX(?5, COALESCE(MAX(created_at), ?5))
            FROM chirps;",
            params![
                chirp.id.to_string(),
                chirp.user_id.to_string(),
                chirp.message.as_str(),
                chirp.created_at,
                chirp.updated_at,
            ],
        );

        match result {
            Ok(_) => Ok(chirp.id),
            Err(err)
                if constraint_violation(&err)
                    == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) =>
            {
                Err(RepoError::UserNotFound(chirp.user_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_chirp(&self, id: ChirpId) -> RepoResult<Option<Chirp>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHIRP_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_chirp_row(row)?));
        }

        Ok(None)
    }

    fn update_chirp_message(&self, id: ChirpId, message: &str) -> RepoResult<()> {
        validate_message(message)?;

        let changed = self.conn.execute(
            "UPDATE chirps
             SET
                message = ?2,
                updated_at = MAX(created_at, ?3)
             WHERE id = ?1;",
            params![id.to_string(), message, now_epoch_ms()],
        )?;

        if changed == 0 {
            return Err(RepoError::ChirpNotFound(id));
        }

        Ok(())
    }

    fn list_chirps(&self) -> RepoResult<Vec<ChirpRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id,
                c.message,
                c.created_at,
                c.updated_at,
                u.id AS user_id,
                u.name AS user_name
             FROM chirps c
             INNER JOIN users u ON u.id = c.user_id
             ORDER BY c.created_at ASC, c.rowid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut chirps = Vec::new();
        while let Some(row) = rows.next()? {
            chirps.push(parse_record_row(row)?);
        }

        Ok(chirps)
    }
}

fn parse_chirp_row(row: &Row<'_>) -> RepoResult<Chirp> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;

    Ok(Chirp {
        id: parse_uuid(&id_text, "chirps.id")?,
        user_id: parse_uuid(&user_text, "chirps.user_id")?,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<ChirpRecord> {
    let id_text: String = row.get("id")?;
    let user_text: String = row.get("user_id")?;

    Ok(ChirpRecord {
        id: parse_uuid(&id_text, "chirps.id")?,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        author: ChirpAuthor {
            id: parse_uuid(&user_text, "users.id")?,
            name: row.get("user_name")?,
        },
    })
}
