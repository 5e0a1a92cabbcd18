use crate::application::{
    book::BookApplicationError, loan::LoanApplicationError, user::UserApplicationError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Book(BookApplicationError),
    User(UserApplicationError),
    Loan(LoanApplicationError),
}

impl From<BookApplicationError> for ApiError {
    fn from(err: BookApplicationError) -> Self {
        ApiError::Book(err)
    }
}

impl From<UserApplicationError> for ApiError {
    fn from(err: UserApplicationError) -> Self {
        ApiError::User(err)
    }
}

impl From<LoanApplicationError> for ApiError {
    fn from(err: LoanApplicationError) -> Self {
        ApiError::Loan(err)
    }
}

/// 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
fn internal_error(
    error_type: &'static str,
    source: &(dyn std::error::Error + Send + Sync),
) -> (StatusCode, &'static str, String) {
    tracing::error!("{}: {}", error_type, source);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_type,
        "An unexpected error occurred".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Book(err) => match err {
                // 404 Not Found
                BookApplicationError::NotFound => {
                    (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", err.to_string())
                }
                // 409 Conflict
                BookApplicationError::Conflict => {
                    (StatusCode::CONFLICT, "BOOK_ALREADY_EXISTS", err.to_string())
                }
                // 422 Unprocessable Entity - バリデーションエラー
                BookApplicationError::InvalidEntity(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_BOOK",
                    err.to_string(),
                ),
                BookApplicationError::RepositoryError(ref e) => {
                    internal_error("BOOK_REPOSITORY_ERROR", &**e)
                }
            },

            ApiError::User(err) => match err {
                UserApplicationError::NotFound => {
                    (StatusCode::NOT_FOUND, "USER_NOT_FOUND", err.to_string())
                }
                UserApplicationError::Conflict => {
                    (StatusCode::CONFLICT, "USER_ALREADY_EXISTS", err.to_string())
                }
                UserApplicationError::InvalidEntity(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_USER",
                    err.to_string(),
                ),
                UserApplicationError::RepositoryError(ref e) => {
                    internal_error("USER_REPOSITORY_ERROR", &**e)
                }
            },

            ApiError::Loan(err) => match err {
                LoanApplicationError::UserNotFound => {
                    (StatusCode::NOT_FOUND, "USER_NOT_FOUND", err.to_string())
                }
                LoanApplicationError::BookNotFound => {
                    (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", err.to_string())
                }

                // 422 Unprocessable Entity - ビジネスルール違反
                LoanApplicationError::InsufficientStock => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INSUFFICIENT_STOCK",
                    err.to_string(),
                ),
                LoanApplicationError::AlreadyBorrowed => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ALREADY_BORROWED",
                    err.to_string(),
                ),
                LoanApplicationError::NeverBorrowed => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "NEVER_BORROWED",
                    err.to_string(),
                ),
                LoanApplicationError::StockOverflow => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "STOCK_OVERFLOW",
                    err.to_string(),
                ),

                // 409 Conflict - 再試行すれば成功する可能性がある
                LoanApplicationError::ConcurrentModification => (
                    StatusCode::CONFLICT,
                    "CONCURRENT_MODIFICATION",
                    err.to_string(),
                ),

                // 500 Internal Server Error - システム障害
                LoanApplicationError::UserRepositoryError(ref e) => {
                    internal_error("USER_REPOSITORY_ERROR", &**e)
                }
                LoanApplicationError::BookRepositoryError(ref e) => {
                    internal_error("BOOK_REPOSITORY_ERROR", &**e)
                }
                LoanApplicationError::LoanStoreError(ref e) => {
                    internal_error("LOAN_STORE_ERROR", &**e)
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
