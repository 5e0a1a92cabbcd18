use crate::domain::{BorrowBookError, ReturnBookError};
use thiserror::Error;

/// 貸出調整アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LoanApplicationError {
    /// 利用者が存在しない
    #[error("User not found")]
    UserNotFound,

    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 在庫がない
    #[error("Not enough books in stock")]
    InsufficientStock,

    /// 既に借りている
    #[error("Book already borrowed")]
    AlreadyBorrowed,

    /// 借りていない書籍の返却
    #[error("Book was never borrowed")]
    NeverBorrowed,

    /// 返却すると在庫数が上限を超える
    #[error("Book quantity cannot be increased any further")]
    StockOverflow,

    /// 読み込み後に利用者か書籍が他の処理で更新された
    #[error("User or book was modified concurrently")]
    ConcurrentModification,

    /// UserRepositoryのエラー
    #[error("User repository error")]
    UserRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    BookRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// LoanStoreのエラー
    #[error("Loan store error")]
    LoanStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BorrowBookError> for LoanApplicationError {
    fn from(err: BorrowBookError) -> Self {
        match err {
            BorrowBookError::InsufficientStock => LoanApplicationError::InsufficientStock,
            BorrowBookError::AlreadyBorrowed => LoanApplicationError::AlreadyBorrowed,
        }
    }
}

impl From<ReturnBookError> for LoanApplicationError {
    fn from(err: ReturnBookError) -> Self {
        match err {
            ReturnBookError::NeverBorrowed => LoanApplicationError::NeverBorrowed,
            ReturnBookError::StockOverflow => LoanApplicationError::StockOverflow,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanApplicationError>;
