use thiserror::Error;

/// 更新・削除で該当行が0件だった
///
/// リポジトリは黙って何もしないのではなく、このエラーで失敗する。
#[derive(Debug, Error)]
#[error("expected to affect 1 {entity} row, affected {affected}")]
pub struct RowNotAffected {
    pub entity: &'static str,
    pub affected: u64,
}
