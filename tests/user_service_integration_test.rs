mod common;

use common::{RecordingLibrary, book, deps, seed, user};
use rusty_library_loans::application::loan::borrow_book;
use rusty_library_loans::application::user::{
    UserApplicationError, create_user, delete_user, get_all_users, get_user, update_user,
};
use rusty_library_loans::domain::{BookId, User, UserId, ValidationError};
use std::sync::Arc;

#[tokio::test]
async fn test_create_user_then_get_by_id() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let created = create_user(&deps, user(1)).await.unwrap();
    assert!(created.created_at.is_some());

    let fetched = get_user(&deps, UserId::new(1)).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(
        User {
            created_at: None,
            ..fetched
        },
        user(1)
    );
}

#[tokio::test]
async fn test_create_user_ignores_incoming_borrowed_books() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let mut input = user(1);
    input.borrowed_books.insert(BookId::new(3));
    create_user(&deps, input).await.unwrap();

    let fetched = get_user(&deps, UserId::new(1)).await.unwrap();
    assert!(fetched.borrowed_books.is_empty());
}

#[tokio::test]
async fn test_create_user_conflict() {
    let library = Arc::new(RecordingLibrary::new());
    seed(&library, &user(1), &[]).await;
    let deps = deps(&library);

    let result = create_user(&deps, User { email: String::new(), ..user(1) }).await;

    assert!(matches!(result.unwrap_err(), UserApplicationError::Conflict));
    assert!(library.calls_to("user.create").is_empty());
}

#[tokio::test]
async fn test_create_user_rejects_invalid_entities() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let cases = vec![
        (User { id: UserId::new(0), ..user(1) }, ValidationError::InvalidId),
        (
            User { first_name: String::new(), ..user(2) },
            ValidationError::MissingField("first_name"),
        ),
        (
            User { date_of_birth: None, ..user(3) },
            ValidationError::MissingField("date_of_birth"),
        ),
        (
            User { password: String::new(), ..user(4) },
            ValidationError::MissingField("password"),
        ),
    ];

    for (invalid, expected) in cases {
        match create_user(&deps, invalid).await.unwrap_err() {
            UserApplicationError::InvalidEntity(err) => assert_eq!(err, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(library.calls_to("user.create").is_empty());
}

#[tokio::test]
async fn test_get_user_not_found() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let result = get_user(&deps, UserId::new(5)).await;
    assert!(matches!(result.unwrap_err(), UserApplicationError::NotFound));
}

#[tokio::test]
async fn test_get_all_users() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);
    for id in [4, 1, 2] {
        create_user(&deps, user(id)).await.unwrap();
    }

    let ids: Vec<i64> = get_all_users(&deps)
        .await
        .unwrap()
        .iter()
        .map(|u| u.id.value())
        .collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[tokio::test]
async fn test_update_user_keeps_borrowed_books() {
    let library = Arc::new(RecordingLibrary::new());
    seed(&library, &user(1), &[book(3, 5)]).await;
    let deps = deps(&library);
    borrow_book(&deps, UserId::new(1), BookId::new(3))
        .await
        .unwrap();

    // 入力の貸出中集合は空だが、保存済みの集合が引き継がれる
    let changed = User {
        location: "Washington".to_string(),
        ..user(1)
    };
    let updated = update_user(&deps, changed).await.unwrap();
    assert!(updated.borrowed_books.contains(BookId::new(3)));

    let fetched = get_user(&deps, UserId::new(1)).await.unwrap();
    assert_eq!(fetched.location, "Washington");
    assert!(fetched.borrowed_books.contains(BookId::new(3)));
    assert!(fetched.updated_at.is_some());
}

#[tokio::test]
async fn test_update_user_not_found_never_writes() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let result = update_user(&deps, user(1)).await;

    assert!(matches!(result.unwrap_err(), UserApplicationError::NotFound));
    assert_eq!(library.calls(), vec!["user.get_by_id"]);
}

#[tokio::test]
async fn test_update_user_revalidates() {
    let library = Arc::new(RecordingLibrary::new());
    seed(&library, &user(1), &[]).await;
    let deps = deps(&library);

    let result = update_user(&deps, User { phone: String::new(), ..user(1) }).await;

    assert!(matches!(
        result.unwrap_err(),
        UserApplicationError::InvalidEntity(ValidationError::MissingField("phone"))
    ));
    assert!(library.calls_to("user.update").is_empty());
}

#[tokio::test]
async fn test_update_user_surfaces_repository_failure() {
    let library = Arc::new(RecordingLibrary::new());
    seed(&library, &user(1), &[]).await;
    library.fail_on("user.update");
    let deps = deps(&library);

    let result = update_user(&deps, user(1)).await;

    assert!(matches!(
        result.unwrap_err(),
        UserApplicationError::RepositoryError(_)
    ));
}

#[tokio::test]
async fn test_delete_user() {
    let library = Arc::new(RecordingLibrary::new());
    seed(&library, &user(1), &[]).await;
    let deps = deps(&library);

    delete_user(&deps, UserId::new(1)).await.unwrap();

    let result = get_user(&deps, UserId::new(1)).await;
    assert!(matches!(result.unwrap_err(), UserApplicationError::NotFound));
}

#[tokio::test]
async fn test_delete_user_not_found_never_writes() {
    let library = Arc::new(RecordingLibrary::new());
    let deps = deps(&library);

    let result = delete_user(&deps, UserId::new(1)).await;

    assert!(matches!(result.unwrap_err(), UserApplicationError::NotFound));
    assert!(library.calls_to("user.delete").is_empty());
}
