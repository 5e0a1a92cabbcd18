pub mod book;
pub mod loan;
pub mod user;

use crate::ports::{BookRepository, LoanStore, UserRepository};
use std::sync::Arc;

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 各ユースケース関数に明示的に渡される（グローバルな状態は持たない）。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub loan_store: Arc<dyn LoanStore>,
}
