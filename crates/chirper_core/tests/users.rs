use chirper_core::db::open_db_in_memory;
use chirper_core::{RepoError, SqliteUserRepository, User, UserRepository};
use uuid::Uuid;

#[test]
fn create_and_get_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let user = User::new("Ada Lovelace", "ada@example.com");
    let id = repo.create_user(&user).unwrap();

    assert_eq!(repo.get_user(id).unwrap(), Some(user));
    assert_eq!(repo.get_user(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn duplicate_email_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create_user(&User::new("Ada", "ada@example.com")).unwrap();
    let err = repo
        .create_user(&User::new("Imposter", "ada@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn invalid_user_is_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let user = User::new("  ", "ada@example.com");
    let err = repo.create_user(&user).unwrap_err();
    assert!(matches!(err, RepoError::InvalidUser(_)));
    assert_eq!(repo.get_user(user.id).unwrap(), None);
}
