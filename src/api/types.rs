use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookId, BorrowedBooks, User, UserId};

/// 書籍の登録・更新リクエスト（POST /books, PUT /books）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRequest {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub pages: i32,
    #[serde(default)]
    pub quantity: i32,
}

impl BookRequest {
    /// リクエストをドメインのBookに変換
    pub fn into_book(self) -> Book {
        Book {
            id: BookId::new(self.id),
            title: self.title,
            author: self.author,
            pages: self.pages,
            quantity: self.quantity,
            version: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub quantity: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            title: book.title,
            author: book.author,
            pages: book.pages,
            quantity: book.quantity,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// 利用者の登録・更新リクエスト（POST /users, PUT /users）
///
/// 貸出中の書籍は受け付けない（貸出・返却でのみ変更される）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl UserRequest {
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            location: self.location,
            phone: self.phone,
            email: self.email,
            password: self.password,
            borrowed_books: BorrowedBooks::new(),
            version: 0,
            created_at: None,
            updated_at: None,
        }
    }
}

/// 利用者レスポンス（パスワードは返さない）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub borrowed_books: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            borrowed_books: user.borrowed_books.iter().map(|id| id.value()).collect(),
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            location: user.location,
            phone: user.phone,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
