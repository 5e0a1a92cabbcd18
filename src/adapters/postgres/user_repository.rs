use crate::domain::{BookId, BorrowedBooks, User, UserId};
use crate::ports::RowNotAffected;
use crate::ports::user_repository::{Result, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::collections::HashMap;

/// PostgreSQLの行データをUserに変換する
///
/// 貸出中集合はusers_booksから別途読み込んで渡す。
fn map_row_to_user(row: &PgRow, borrowed_books: BorrowedBooks) -> Result<User> {
    Ok(User {
        id: UserId::new(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        date_of_birth: Some(row.try_get("date_of_birth")?),
        location: row.try_get("location")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        borrowed_books,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// UserRepositoryのPostgreSQL実装
///
/// 貸出中集合は結合テーブル users_books に保存される。
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                first_name,
                last_name,
                date_of_birth,
                location,
                phone,
                email,
                password,
                version,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.value())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.date_of_birth)
        .bind(&user.location)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.version)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(user_id = %user.id, "user created");
        Ok(())
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let Some(row) = sqlx::query(
            r#"
            SELECT id, first_name, last_name, date_of_birth, location, phone, email, password,
                   version, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let book_ids: Vec<i64> =
            sqlx::query_scalar("SELECT book_id FROM users_books WHERE user_id = $1")
                .bind(user_id.value())
                .fetch_all(&self.pool)
                .await?;

        let borrowed_books = book_ids.into_iter().map(BookId::new).collect();
        map_row_to_user(&row, borrowed_books).map(Some)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, date_of_birth, location, phone, email, password,
                   version, created_at, updated_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // 全利用者分の貸出中集合を1回のクエリで読み込む
        let loans: Vec<(i64, i64)> = sqlx::query_as("SELECT user_id, book_id FROM users_books")
            .fetch_all(&self.pool)
            .await?;

        let mut borrowed: HashMap<i64, BorrowedBooks> = HashMap::new();
        for (user_id, book_id) in loans {
            borrowed
                .entry(user_id)
                .or_default()
                .insert(BookId::new(book_id));
        }

        rows.iter()
            .map(|row| {
                let user_id: i64 = row.try_get("id")?;
                map_row_to_user(row, borrowed.remove(&user_id).unwrap_or_default())
            })
            .collect()
    }

    /// プロフィール項目だけを置き換える（users_booksは変更しない）
    async fn update(&self, user: &User) -> Result<()> {
        let affected = sqlx::query(
            r#"
            UPDATE users
            SET first_name = $1,
                last_name = $2,
                date_of_birth = $3,
                location = $4,
                phone = $5,
                email = $6,
                password = $7,
                updated_at = $8,
                version = version + 1
            WHERE id = $9
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.date_of_birth)
        .bind(&user.location)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.updated_at)
        .bind(user.id.value())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected != 1 {
            return Err(Box::new(RowNotAffected {
                entity: "user",
                affected,
            }));
        }

        tracing::debug!(user_id = %user.id, "user updated");
        Ok(())
    }

    /// users_booksの行は外部キーのON DELETE CASCADEで削除される
    async fn delete(&self, user_id: UserId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected != 1 {
            return Err(Box::new(RowNotAffected {
                entity: "user",
                affected,
            }));
        }

        tracing::debug!(%user_id, "user deleted");
        Ok(())
    }
}
