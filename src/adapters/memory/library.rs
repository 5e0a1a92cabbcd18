use crate::domain::{Book, BookId, User, UserId};
use crate::ports::{
    BookRepository, CommitOutcome, LoanStore, RowNotAffected, UserRepository, book_repository,
    loan_store, user_repository,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    books: BTreeMap<BookId, Book>,
    users: BTreeMap<UserId, User>,
}

/// In-memory implementation of all three persistence ports
///
/// Books and users share one lock, so `LoanStore::commit` is atomic
/// the same way the PostgreSQL transaction is.
/// Used when no database is configured, and by the test suite.
#[derive(Default)]
pub struct InMemoryLibrary {
    tables: Mutex<Tables>,
}

impl InMemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, Box<dyn std::error::Error + Send + Sync>> {
        self.tables
            .lock()
            .map_err(|e| e.to_string().into())
    }
}

#[async_trait]
impl BookRepository for InMemoryLibrary {
    async fn create(&self, book: &Book) -> book_repository::Result<()> {
        let mut tables = self.tables()?;
        if tables.books.contains_key(&book.id) {
            return Err(format!("duplicate key: book {}", book.id).into());
        }
        tables.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn get_by_id(&self, book_id: BookId) -> book_repository::Result<Option<Book>> {
        Ok(self.tables()?.books.get(&book_id).cloned())
    }

    async fn get_all(&self) -> book_repository::Result<Vec<Book>> {
        Ok(self.tables()?.books.values().cloned().collect())
    }

    async fn update(&self, book: &Book) -> book_repository::Result<()> {
        let mut tables = self.tables()?;
        let stored = tables.books.get_mut(&book.id).ok_or(RowNotAffected {
            entity: "book",
            affected: 0,
        })?;
        *stored = Book {
            version: stored.version + 1,
            created_at: stored.created_at,
            ..book.clone()
        };
        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> book_repository::Result<()> {
        self.tables()?
            .books
            .remove(&book_id)
            .map(|_| ())
            .ok_or_else(|| {
                RowNotAffected {
                    entity: "book",
                    affected: 0,
                }
                .into()
            })
    }
}

#[async_trait]
impl UserRepository for InMemoryLibrary {
    async fn create(&self, user: &User) -> user_repository::Result<()> {
        let mut tables = self.tables()?;
        if tables.users.contains_key(&user.id) {
            return Err(format!("duplicate key: user {}", user.id).into());
        }
        tables.users.insert(
            user.id,
            User {
                borrowed_books: Default::default(),
                ..user.clone()
            },
        );
        Ok(())
    }

    async fn get_by_id(&self, user_id: UserId) -> user_repository::Result<Option<User>> {
        Ok(self.tables()?.users.get(&user_id).cloned())
    }

    async fn get_all(&self) -> user_repository::Result<Vec<User>> {
        Ok(self.tables()?.users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> user_repository::Result<()> {
        let mut tables = self.tables()?;
        let stored = tables.users.get_mut(&user.id).ok_or(RowNotAffected {
            entity: "user",
            affected: 0,
        })?;
        // 貸出中集合はLoanStoreの管轄
        *stored = User {
            borrowed_books: stored.borrowed_books.clone(),
            version: stored.version + 1,
            created_at: stored.created_at,
            ..user.clone()
        };
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> user_repository::Result<()> {
        self.tables()?
            .users
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| {
                RowNotAffected {
                    entity: "user",
                    affected: 0,
                }
                .into()
            })
    }
}

#[async_trait]
impl LoanStore for InMemoryLibrary {
    async fn commit(&self, user: &User, book: &Book) -> loan_store::Result<CommitOutcome> {
        let mut tables = self.tables()?;

        let user_current = tables.users.get(&user.id).map(|u| u.version);
        let book_current = tables.books.get(&book.id).map(|b| b.version);
        if user_current != Some(user.version) || book_current != Some(book.version) {
            return Ok(CommitOutcome::Stale);
        }
        if book.quantity < 0 {
            return Err(format!("quantity of book {} would become negative", book.id).into());
        }

        if let Some(stored) = tables.users.get_mut(&user.id) {
            stored.borrowed_books = user.borrowed_books.clone();
            stored.updated_at = user.updated_at;
            stored.version += 1;
        }
        if let Some(stored) = tables.books.get_mut(&book.id) {
            stored.quantity = book.quantity;
            stored.updated_at = book.updated_at;
            stored.version += 1;
        }

        Ok(CommitOutcome::Committed)
    }
}
