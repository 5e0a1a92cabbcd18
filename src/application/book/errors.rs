use crate::domain::ValidationError;
use thiserror::Error;

/// 書籍カタログアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookApplicationError {
    /// 書籍が存在しない
    #[error("Book not found")]
    NotFound,

    /// 同じIDの書籍が既に存在する
    #[error("Book already exists")]
    Conflict,

    /// 必須項目のバリデーションに失敗
    #[error("Invalid book: {0}")]
    InvalidEntity(#[from] ValidationError),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookApplicationError>;
