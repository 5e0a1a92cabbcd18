use crate::application::{ServiceDependencies, book, loan, user};
use crate::domain::{BookBorrowed, BookId, BookReturned, UserId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{BookRequest, BookResponse, UserRequest, UserResponse},
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Book handlers
// ============================================================================

/// POST /books - 書籍を登録
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = book::create_book(&state.service_deps, req.into_book()).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = book::get_book(&state.service_deps, BookId::new(book_id)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /books - 全書籍を取得
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = book::get_all_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// PUT /books - 書籍を更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = book::update_book(&state.service_deps, req.into_book()).await?;
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/:id - 書籍を削除
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    book::delete_book(&state.service_deps, BookId::new(book_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// User handlers
// ============================================================================

/// POST /users - 利用者を登録
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = user::create_user(&state.service_deps, req.into_user()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/:id - 利用者をIDで取得（貸出中の書籍を含む）
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user::get_user(&state.service_deps, UserId::new(user_id)).await?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /users - 全利用者を取得
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = user::get_all_users(&state.service_deps).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /users - 利用者を更新
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user::update_user(&state.service_deps, req.into_user()).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/:id - 利用者を削除
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    user::delete_user(&state.service_deps, UserId::new(user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Loan handlers
// ============================================================================

/// POST /loans/borrow/:user_id/:book_id - 書籍を貸し出す
///
/// 強制されるビジネスルール:
/// - 利用者と書籍が存在すること
/// - 在庫があること
/// - 同じ書籍をまだ借りていないこと
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Path((user_id, book_id)): Path<(i64, i64)>,
) -> Result<Json<BookBorrowed>, ApiError> {
    let event = loan::borrow_book(
        &state.service_deps,
        UserId::new(user_id),
        BookId::new(book_id),
    )
    .await?;

    tracing::info!(user_id, book_id, quantity_available = event.quantity_available, "book borrowed");
    Ok(Json(event))
}

/// POST /loans/return/:user_id/:book_id - 書籍を返却する
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path((user_id, book_id)): Path<(i64, i64)>,
) -> Result<Json<BookReturned>, ApiError> {
    let event = loan::return_book(
        &state.service_deps,
        UserId::new(user_id),
        BookId::new(book_id),
    )
    .await?;

    tracing::info!(user_id, book_id, quantity_available = event.quantity_available, "book returned");
    Ok(Json(event))
}
