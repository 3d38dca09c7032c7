//! Chirp use-case service.
//!
//! # Responsibility
//! - Provide list/create/update entry points for chirps.
//! - Enforce ownership and message rules before any write.
//!
//! # Invariants
//! - Each operation issues exactly one persistence call, except update which
//!   reads the target row before writing it.
//! - Update checks run in order: existence, authorization, validation.
//! - Submitted text is trimmed once; the trimmed text is validated and stored.
//! - Failed operations never mutate storage.
//! - Log lines carry ids and status only, never message text.

use crate::model::chirp::{Chirp, ChirpId};
use crate::model::user::UserId;
use crate::model::validation::{normalize_message, validate_message, ValidationErrors};
use crate::policy::{ChirpPolicy, Forbidden};
use crate::repo::chirp_repo::{ChirpRecord, ChirpRepository};
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for chirp use-cases.
#[derive(Debug)]
pub enum ChirpServiceError {
    /// Message failed field rules.
    Validation(ValidationErrors),
    /// Requester is not the author.
    Forbidden(Forbidden),
    /// Target chirp does not exist.
    NotFound(ChirpId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ChirpServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Forbidden(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "chirp not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChirpServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Forbidden(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ChirpServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ChirpNotFound(id) => Self::NotFound(id),
            RepoError::Validation(errors) => Self::Validation(errors),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationErrors> for ChirpServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<Forbidden> for ChirpServiceError {
    fn from(value: Forbidden) -> Self {
        Self::Forbidden(value)
    }
}

pub type ChirpServiceResult<T> = Result<T, ChirpServiceError>;

/// Chirp service facade over repository implementations.
pub struct ChirpService<R: ChirpRepository> {
    repo: R,
}

impl<R: ChirpRepository> ChirpService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every chirp, oldest first, regardless of author.
    pub fn list(&self) -> ChirpServiceResult<Vec<ChirpRecord>> {
        let chirps = self.repo.list_chirps()?;
        info!(
            "event=chirp_list module=service status=ok count={}",
            chirps.len()
        );
        Ok(chirps)
    }

    /// Posts a new chirp authored by `author`.
    ///
    /// # Errors
    /// - `Validation` when the trimmed `message` is empty or longer than 255
    ///   characters; nothing is persisted.
    pub fn create(&self, author: UserId, message: &str) -> ChirpServiceResult<Chirp> {
        let message = normalize_message(message);
        if let Err(errors) = validate_message(message) {
            warn!("event=chirp_create module=service status=rejected reason=validation user_id={author}");
            return Err(errors.into());
        }

        let chirp = Chirp::new(author, message);
        self.repo.insert_chirp(&chirp)?;
        info!(
            "event=chirp_create module=service status=ok chirp_id={} user_id={}",
            chirp.id, author
        );
        Ok(chirp)
    }

    /// Replaces the message of a chirp owned by `user_id`.
    ///
    /// # Errors
    /// - `NotFound` when `chirp_id` does not exist.
    /// - `Forbidden` when `user_id` is not the author; checked before input.
    /// - `Validation` when the trimmed `message` breaks the field rules.
    pub fn update(
        &self,
        user_id: UserId,
        chirp_id: ChirpId,
        message: &str,
    ) -> ChirpServiceResult<()> {
        let Some(chirp) = self.repo.find_chirp(chirp_id)? else {
            warn!("event=chirp_update module=service status=rejected reason=not_found chirp_id={chirp_id}");
            return Err(ChirpServiceError::NotFound(chirp_id));
        };

        if let Err(forbidden) = ChirpPolicy::update(user_id, &chirp) {
            warn!(
                "event=chirp_update module=service status=rejected reason=forbidden chirp_id={} user_id={}",
                chirp_id, user_id
            );
            return Err(forbidden.into());
        }

        let message = normalize_message(message);
        if let Err(errors) = validate_message(message) {
            warn!("event=chirp_update module=service status=rejected reason=validation chirp_id={chirp_id}");
            return Err(errors.into());
        }

        self.repo.update_chirp_message(chirp_id, message)?;
        info!(
            "event=chirp_update module=service status=ok chirp_id={} user_id={}",
            chirp_id, user_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChirpService, ChirpServiceError};
    use crate::model::chirp::{Chirp, ChirpId};
    use crate::repo::chirp_repo::{ChirpRecord, ChirpRepository};
    use crate::repo::{RepoError, RepoResult};
    use std::cell::RefCell;
    use uuid::Uuid;

    /// In-memory repository that records every write it receives.
    #[derive(Default)]
    struct RecordingRepo {
        rows: RefCell<Vec<Chirp>>,
        writes: RefCell<u32>,
    }

    impl ChirpRepository for &RecordingRepo {
        fn insert_chirp(&self, chirp: &Chirp) -> RepoResult<ChirpId> {
            *self.writes.borrow_mut() += 1;
            self.rows.borrow_mut().push(chirp.clone());
            Ok(chirp.id)
        }

        fn find_chirp(&self, id: ChirpId) -> RepoResult<Option<Chirp>> {
            Ok(self.rows.borrow().iter().find(|row| row.id == id).cloned())
        }

        fn update_chirp_message(&self, id: ChirpId, message: &str) -> RepoResult<()> {
            *self.writes.borrow_mut() += 1;
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(RepoError::ChirpNotFound(id))?;
            row.message = message.to_string();
            Ok(())
        }

        fn list_chirps(&self) -> RepoResult<Vec<ChirpRecord>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn rejected_create_issues_no_write() {
        let repo = RecordingRepo::default();
        let service = ChirpService::new(&repo);

        let err = service.create(Uuid::new_v4(), "").unwrap_err();
        assert!(matches!(err, ChirpServiceError::Validation(_)));
        assert_eq!(*repo.writes.borrow(), 0);
    }

    #[test]
    fn forbidden_is_reported_before_validation() {
        let repo = RecordingRepo::default();
        let service = ChirpService::new(&repo);
        let chirp = service.create(Uuid::new_v4(), "original").unwrap();

        let err = service
            .update(Uuid::new_v4(), chirp.id, &"a".repeat(300))
            .unwrap_err();
        assert!(matches!(err, ChirpServiceError::Forbidden(_)));
        assert_eq!(*repo.writes.borrow(), 1);
        assert_eq!(repo.rows.borrow()[0].message, "original");
    }

    #[test]
    fn update_of_missing_chirp_is_not_found() {
        let repo = RecordingRepo::default();
        let service = ChirpService::new(&repo);
        let missing = Uuid::new_v4();

        let err = service.update(Uuid::new_v4(), missing, "hi").unwrap_err();
        assert!(matches!(err, ChirpServiceError::NotFound(id) if id == missing));
        assert_eq!(*repo.writes.borrow(), 0);
    }

    #[test]
    fn owner_update_keeps_identity_and_author() {
        let repo = RecordingRepo::default();
        let service = ChirpService::new(&repo);
        let author = Uuid::new_v4();
        let chirp = service.create(author, "draft").unwrap();

        service.update(author, chirp.id, "final").unwrap();

        let rows = repo.rows.borrow();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, chirp.id);
        assert_eq!(rows[0].user_id, author);
        assert_eq!(rows[0].message, "final");
    }

    #[test]
    fn create_and_update_store_trimmed_text() {
        let repo = RecordingRepo::default();
        let service = ChirpService::new(&repo);
        let author = Uuid::new_v4();

        let chirp = service.create(author, "  hi  ").unwrap();
        assert_eq!(chirp.message, "hi");
        assert_eq!(repo.rows.borrow()[0].message, "hi");

        service.update(author, chirp.id, "\tedited\n").unwrap();
        assert_eq!(repo.rows.borrow()[0].message, "edited");
    }
}
