use rusty_library_loans::{
    adapters::{
        memory::InMemoryLibrary,
        postgres::{PostgresBookRepository, PostgresLoanStore, PostgresUserRepository},
    },
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service_deps = match &config.database.url {
        Some(database_url) => {
            tracing::info!("Connecting to PostgreSQL");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            ServiceDependencies {
                book_repository: Arc::new(PostgresBookRepository::new(pool.clone())),
                user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
                loan_store: Arc::new(PostgresLoanStore::new(pool)),
            }
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using in-memory storage");

            let library = Arc::new(InMemoryLibrary::new());
            ServiceDependencies {
                book_repository: library.clone(),
                user_repository: library.clone(),
                loan_store: library,
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
