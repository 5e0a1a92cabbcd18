use crate::domain::{Book, BookId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
///
/// 書籍の永続化を抽象化する。重複登録の検出は呼び出し側（サービス層）の責務。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を登録する
    async fn create(&self, book: &Book) -> Result<()>;

    /// IDで書籍を取得する
    ///
    /// 存在しない場合は`Ok(None)`を返す（他の障害とは区別される）。
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 全書籍をID順で取得する
    async fn get_all(&self) -> Result<Vec<Book>>;

    /// IDが一致する書籍の可変項目をすべて置き換える
    ///
    /// 該当行が0件の場合は`RowNotAffected`で失敗する。
    async fn update(&self, book: &Book) -> Result<()>;

    /// 書籍を削除する。該当行が0件の場合は失敗する。
    async fn delete(&self, book_id: BookId) -> Result<()>;
}
