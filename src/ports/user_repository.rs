use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 利用者リポジトリポート
///
/// 取得時は貸出中の書籍集合も復元する。
/// 貸出中集合の書き込みはLoanStoreだけが行い、このポートは触らない。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 利用者を登録する（貸出中集合は空で作成される）
    async fn create(&self, user: &User) -> Result<()>;

    /// IDで利用者を取得する。存在しない場合は`Ok(None)`
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// 全利用者をID順で取得する
    async fn get_all(&self) -> Result<Vec<User>>;

    /// プロフィール項目を置き換える。該当行が0件の場合は失敗する。
    async fn update(&self, user: &User) -> Result<()>;

    /// 利用者と貸出中集合を削除する。該当行が0件の場合は失敗する。
    async fn delete(&self, user_id: UserId) -> Result<()>;
}
