use crate::domain::{Book, User};
use crate::ports::loan_store::{CommitOutcome, LoanStore as LoanStoreTrait, Result};
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of LoanStore
///
/// Writes the user's borrowed set and the book's quantity in one transaction.
/// Each row is guarded by the version the caller read, so a concurrent
/// borrow of the same book rolls back instead of decrementing twice.
pub struct LoanStore {
    pool: PgPool,
}

impl LoanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStoreTrait for LoanStore {
    async fn commit(&self, user: &User, book: &Book) -> Result<CommitOutcome> {
        let mut tx = self.pool.begin().await?;

        // User side first
        let affected = sqlx::query(
            r#"
            UPDATE users
            SET updated_at = $1,
                version = version + 1
            WHERE id = $2 AND version = $3
            "#,
        )
        .bind(user.updated_at)
        .bind(user.id.value())
        .bind(user.version)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected != 1 {
            tx.rollback().await?;
            tracing::debug!(user_id = %user.id, "stale user version, loan not committed");
            return Ok(CommitOutcome::Stale);
        }

        sqlx::query("DELETE FROM users_books WHERE user_id = $1")
            .bind(user.id.value())
            .execute(&mut *tx)
            .await?;

        let book_ids: Vec<i64> = user.borrowed_books.iter().map(|id| id.value()).collect();
        sqlx::query(
            r#"
            INSERT INTO users_books (user_id, book_id)
            SELECT $1::bigint, * FROM UNNEST($2::bigint[])
            "#,
        )
        .bind(user.id.value())
        .bind(&book_ids)
        .execute(&mut *tx)
        .await?;

        // Then the book side
        let affected = sqlx::query(
            r#"
            UPDATE books
            SET quantity = $1,
                updated_at = $2,
                version = version + 1
            WHERE id = $3 AND version = $4
            "#,
        )
        .bind(book.quantity)
        .bind(book.updated_at)
        .bind(book.id.value())
        .bind(book.version)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected != 1 {
            tx.rollback().await?;
            tracing::debug!(book_id = %book.id, "stale book version, loan not committed");
            return Ok(CommitOutcome::Stale);
        }

        tx.commit().await?;

        tracing::debug!(user_id = %user.id, book_id = %book.id, "loan committed");
        Ok(CommitOutcome::Committed)
    }
}
