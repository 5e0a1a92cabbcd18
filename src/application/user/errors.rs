use crate::domain::ValidationError;
use thiserror::Error;

/// 利用者管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum UserApplicationError {
    /// 利用者が存在しない
    #[error("User not found")]
    NotFound,

    /// 同じIDの利用者が既に存在する
    #[error("User already exists")]
    Conflict,

    /// 必須項目のバリデーションに失敗
    #[error("Invalid user: {0}")]
    InvalidEntity(#[from] ValidationError),

    /// UserRepositoryのエラー
    #[error("User repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, UserApplicationError>;
