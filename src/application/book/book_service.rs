use crate::application::ServiceDependencies;
use crate::domain::{Book, BookId};
use chrono::Utc;

use super::errors::{BookApplicationError, Result};

/// 書籍の存在確認（見つからなければNotFound）
async fn load_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    deps.book_repository
        .get_by_id(book_id)
        .await
        .map_err(BookApplicationError::RepositoryError)?
        .ok_or(BookApplicationError::NotFound)
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - 同じIDの書籍が存在しないこと（存在すれば内容に関わらずConflict）
/// - 必須項目がそろっていること、在庫が1冊以上あること
///
/// 作成日時を記録し、登録後の書籍を返す。
pub async fn create_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    let existing = deps
        .book_repository
        .get_by_id(book.id)
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    if existing.is_some() {
        return Err(BookApplicationError::Conflict);
    }

    book.validate()?;

    let book = Book {
        version: 0,
        created_at: Some(Utc::now()),
        updated_at: None,
        ..book
    };

    deps.book_repository
        .create(&book)
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    Ok(book)
}

/// IDで書籍を取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    load_book(deps, book_id).await
}

/// 全書籍を取得する
pub async fn get_all_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.book_repository
        .get_all()
        .await
        .map_err(BookApplicationError::RepositoryError)
}

/// 書籍を更新する（可変項目の全置換）
///
/// 存在確認 → バリデーション → 更新日時の記録 の順に行う。
/// 存在しない場合、リポジトリへの書き込みは行わない。
pub async fn update_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    let existing = load_book(deps, book.id).await?;

    book.validate()?;

    let book = Book {
        version: existing.version + 1,
        created_at: existing.created_at,
        updated_at: Some(Utc::now()),
        ..book
    };

    deps.book_repository
        .update(&book)
        .await
        .map_err(BookApplicationError::RepositoryError)?;

    Ok(book)
}

/// 書籍を削除する
pub async fn delete_book(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    load_book(deps, book_id).await?;

    deps.book_repository
        .delete(book_id)
        .await
        .map_err(BookApplicationError::RepositoryError)
}
