//! UserRepository integration tests over a tempfile-backed embedded database.

use portal_server::db::DbService;
use portal_server::db::models::{UserCreate, UserRole, UserUpdate};
use portal_server::db::repository::{RepoError, UserRepository};

async fn test_repo() -> (UserRepository, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("portal.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    (UserRepository::new(service.db), tmp)
}

fn jane() -> UserCreate {
    UserCreate {
        name: "Jane".to_string(),
        email: "jane@example.edu".to_string(),
        password: "correct-horse-battery".to_string(),
        role: None,
        is_admin: None,
        is_active: None,
    }
}

#[tokio::test]
async fn create_applies_defaults() {
    let (repo, _tmp) = test_repo().await;

    let user = repo.create(jane()).await.unwrap();

    assert!(user.id.is_some());
    assert_eq!(user.role, UserRole::Student);
    assert!(!user.is_admin); // 默认不是管理员
    assert!(!user.is_active);
    assert!(user.created_at > 0);
    assert_eq!(user.created_at, user.last_login_date);
}

#[tokio::test]
async fn password_is_hashed_and_verifiable() {
    let (repo, _tmp) = test_repo().await;

    let user = repo.create(jane()).await.unwrap();

    assert_ne!(user.hash_pass, "correct-horse-battery");
    assert!(user.verify_password("correct-horse-battery").unwrap());
    assert!(!user.verify_password("wrong-password").unwrap());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (repo, _tmp) = test_repo().await;

    repo.create(jane()).await.unwrap();
    let err = repo.create(jane()).await.unwrap_err();

    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn find_by_email_and_id() {
    let (repo, _tmp) = test_repo().await;

    let created = repo.create(jane()).await.unwrap();
    let id = created.id_string();

    let by_email = repo.find_by_email("jane@example.edu").await.unwrap();
    assert_eq!(by_email.unwrap().id_string(), id);

    let by_id = repo.find_by_id(&id).await.unwrap();
    assert_eq!(by_id.unwrap().email, "jane@example.edu");

    assert!(repo.find_by_email("nobody@example.edu").await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let (repo, _tmp) = test_repo().await;

    let created = repo.create(jane()).await.unwrap();
    let id = created.id_string();

    let updated = repo
        .update(
            &id,
            UserUpdate {
                name: Some("Jane Doe".to_string()),
                email: None,
                password: None,
                role: Some(UserRole::Registrar),
                is_admin: None,
                is_active: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Jane Doe");
    assert_eq!(updated.email, "jane@example.edu"); // unchanged
    assert_eq!(updated.role, UserRole::Registrar);
    assert!(updated.is_active);
    assert!(!updated.is_admin); // unchanged
    assert!(updated.verify_password("correct-horse-battery").unwrap()); // unchanged
}

#[tokio::test]
async fn update_to_taken_email_is_rejected() {
    let (repo, _tmp) = test_repo().await;

    repo.create(jane()).await.unwrap();
    let other = repo
        .create(UserCreate {
            name: "Bob".to_string(),
            email: "bob@example.edu".to_string(),
            password: "some-long-password".to_string(),
            role: None,
            is_admin: None,
            is_active: None,
        })
        .await
        .unwrap();

    let err = repo
        .update(
            &other.id_string(),
            UserUpdate {
                name: None,
                email: Some("jane@example.edu".to_string()),
                password: None,
                role: None,
                is_admin: None,
                is_active: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn delete_returns_the_removed_row() {
    let (repo, _tmp) = test_repo().await;

    let created = repo.create(jane()).await.unwrap();
    let id = created.id_string();

    let deleted = repo.delete(&id).await.unwrap();
    assert_eq!(deleted.email, "jane@example.edu");

    assert!(repo.find_by_id(&id).await.unwrap().is_none());

    let err = repo.delete(&id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
