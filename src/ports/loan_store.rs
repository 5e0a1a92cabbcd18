use crate::domain::{Book, User};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// commitの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// 両方の集約を書き込んだ
    Committed,
    /// 読み込み後に利用者か書籍が更新されていた。何も書き込んでいない
    Stale,
}

/// 貸出ストアポート（Unit of Work）
///
/// 貸出・返却で変更された利用者と書籍を1つの原子的な単位で保存する。
/// 利用者（貸出中集合）を先に、書籍（在庫数）を後に書き込む。
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// 利用者の貸出中集合と書籍の在庫数を保存する
    ///
    /// 渡された集約の`version`は読み込み時点の値でなければならない。
    /// 保存済みのバージョンと一致しない場合は`CommitOutcome::Stale`を返す。
    async fn commit(&self, user: &User, book: &Book) -> Result<CommitOutcome>;
}
