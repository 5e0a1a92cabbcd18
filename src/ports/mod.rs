pub mod book_repository;
pub mod errors;
pub mod loan_store;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use errors::RowNotAffected;
pub use loan_store::{CommitOutcome, LoanStore};
pub use user_repository::UserRepository;
