pub mod book_repository;
pub mod loan_store;
pub mod user_repository;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use loan_store::LoanStore as PostgresLoanStore;
pub use user_repository::UserRepository as PostgresUserRepository;
