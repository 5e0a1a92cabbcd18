use crate::domain::{Book, BookId};
use crate::ports::RowNotAffected;
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: BookId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        pages: row.try_get("pages")?,
        quantity: row.try_get("quantity")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn create(&self, book: &Book) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, pages, quantity, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(book.id.value())
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.pages)
        .bind(book.quantity)
        .bind(book.version)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(book_id = %book.id, "book created");
        Ok(())
    }

    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, pages, quantity, version, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, pages, quantity, version, created_at, updated_at
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    /// 可変項目をすべて置き換え、versionを進める
    async fn update(&self, book: &Book) -> Result<()> {
        let affected = sqlx::query(
            r#"
            UPDATE books
            SET title = $1,
                author = $2,
                pages = $3,
                quantity = $4,
                updated_at = $5,
                version = version + 1
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.pages)
        .bind(book.quantity)
        .bind(book.updated_at)
        .bind(book.id.value())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected != 1 {
            return Err(Box::new(RowNotAffected {
                entity: "book",
                affected,
            }));
        }

        tracing::debug!(book_id = %book.id, "book updated");
        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected != 1 {
            return Err(Box::new(RowNotAffected {
                entity: "book",
                affected,
            }));
        }

        tracing::debug!(%book_id, "book deleted");
        Ok(())
    }
}
