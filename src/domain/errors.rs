use thiserror::Error;

/// エンティティのバリデーションエラー
///
/// アプリケーション層ではすべて InvalidEntity として扱われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// IDが正の整数でない
    #[error("id must be a positive integer")]
    InvalidId,
    /// 必須項目が空
    #[error("{0} is required")]
    MissingField(&'static str),
    /// 正の値であるべき項目が0以下
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
}

/// 貸出のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowBookError {
    /// 在庫がない
    InsufficientStock,
    /// 既に同じ書籍を借りている
    AlreadyBorrowed,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 借りていない書籍を返却しようとした
    NeverBorrowed,
    /// 返却すると在庫数が上限を超える
    StockOverflow,
}
