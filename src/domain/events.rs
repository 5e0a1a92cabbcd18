use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, UserId};

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub user_id: UserId,
    pub book_id: BookId,
    /// 貸出後に貸出可能な在庫数
    pub quantity_available: i32,
    pub occurred_at: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub user_id: UserId,
    pub book_id: BookId,
    /// 返却後に貸出可能な在庫数（返却分を含む）
    pub quantity_available: i32,
    pub occurred_at: DateTime<Utc>,
}
