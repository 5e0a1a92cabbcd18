use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{BookId, UserId, ValidationError};

/// 利用者が現在借りている書籍IDの集合
///
/// 不変条件：同じ書籍IDは1度しか含まれない（集合型で保証）。
/// 変更できるのは貸出調整（application::loan）のみ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowedBooks(BTreeSet<BookId>);

impl BorrowedBooks {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, book_id: BookId) -> bool {
        self.0.contains(&book_id)
    }

    /// 追加する。既に含まれていた場合はfalse
    pub fn insert(&mut self, book_id: BookId) -> bool {
        self.0.insert(book_id)
    }

    /// 取り除く。含まれていなかった場合はfalse
    pub fn remove(&mut self, book_id: BookId) -> bool {
        self.0.remove(&book_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<BookId> for BorrowedBooks {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// User集約 - 利用者のプロフィールと貸出中の書籍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// 未設定（None）は「ゼロ値」とみなされ、バリデーションで弾かれる
    pub date_of_birth: Option<NaiveDate>,
    pub location: String,
    pub phone: String,
    pub email: String,
    /// 不透明な文字列として扱う
    pub password: String,

    #[serde(default)]
    pub borrowed_books: BorrowedBooks,

    #[serde(default)]
    pub version: i64,

    // 監査情報
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.id.is_valid() {
            return Err(ValidationError::InvalidId);
        }

        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("location", &self.location),
            ("phone", &self.phone),
            ("email", &self.email),
            ("password", &self.password),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(ValidationError::MissingField(*field));
        }

        if self.date_of_birth.is_none() {
            return Err(ValidationError::MissingField("date_of_birth"));
        }

        Ok(())
    }
}
