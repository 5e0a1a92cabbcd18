use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, create_book, create_user, delete_book, delete_user, get_book,
    get_user, list_books, list_users, return_book, update_book, update_user,
};

/// Creates the API router
///
/// Catalog endpoints:
/// - POST /books, PUT /books, GET /books
/// - GET /books/:id, DELETE /books/:id
///
/// User endpoints mirror the catalog under /users.
///
/// Loan endpoints:
/// - POST /loans/borrow/:user_id/:book_id
/// - POST /loans/return/:user_id/:book_id
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route(
            "/books",
            get(list_books).post(create_book).put(update_book),
        )
        .route("/books/:id", get(get_book).delete(delete_book))
        .route(
            "/users",
            get(list_users).post(create_user).put(update_user),
        )
        .route("/users/:id", get(get_user).delete(delete_user))
        .route("/loans/borrow/:user_id/:book_id", post(borrow_book))
        .route("/loans/return/:user_id/:book_id", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
