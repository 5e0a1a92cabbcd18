use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, ValidationError};

/// Book集約 - 蔵書1タイトルと貸出可能な冊数
///
/// 不変条件：quantityは負にならない。
/// どの利用者が借りているかは保持しない（利用者側のBorrowedBooksが持つ）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub pages: i32,
    /// 貸出可能な冊数
    pub quantity: i32,

    /// 楽観的排他制御用のバージョン（書き込みのたびに増える）
    #[serde(default)]
    pub version: i64,

    // 監査情報
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    /// 登録・更新時の入力チェック
    ///
    /// 新規登録時は在庫1冊以上が必要。更新時も同じルールを適用する。
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.id.is_valid() {
            return Err(ValidationError::InvalidId);
        }
        if self.title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.author.is_empty() {
            return Err(ValidationError::MissingField("author"));
        }
        if self.pages <= 0 {
            return Err(ValidationError::NonPositive("pages"));
        }
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositive("quantity"));
        }
        Ok(())
    }

    /// 貸出可能な在庫があるか
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}
