//! Carrel Server - Lending Library Catalog
//!
//! Server-rendered catalog workflows for a small lending library.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carrel_server::{
    api,
    config::AppConfig,
    repository::{memory::MemoryCatalogStore, postgres::PgCatalogStore, CatalogStore},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("carrel_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Carrel Server v{}", env!("CARGO_PKG_VERSION"));

    // Pick the catalog store backend
    let store: Arc<dyn CatalogStore> = if config.database.url == "memory" {
        tracing::warn!("Using in-memory catalog store; data will not survive restarts");
        Arc::new(MemoryCatalogStore::new())
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .connect(&config.database.url)
            .await?;

        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Database migrations completed");

        Arc::new(PgCatalogStore::new(pool))
    };

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services and application state
    let services = Services::new(store);
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse()?, server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Home (catalog counts)
        .route("/", get(api::stats::index))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/book/create", get(api::books::create_book_form))
        .route("/book", post(api::books::create_book))
        .route("/book/:id", get(api::books::book_detail))
        .route("/book/:id", put(api::books::update_book))
        .route("/book/:id", delete(api::books::delete_book))
        .route("/book/:id/update", get(api::books::update_book_form))
        // Authors
        .route("/authors", get(api::authors::list_authors))
        .route("/author/create", get(api::authors::create_author_form))
        .route("/author", post(api::authors::create_author))
        .route("/author/:id", get(api::authors::author_detail))
        .route("/author/:id", put(api::authors::update_author))
        .route("/author/:id", delete(api::authors::delete_author))
        .route("/author/:id/update", get(api::authors::update_author_form))
        // Genres
        .route("/genres", get(api::genres::list_genres))
        .route("/genre/create", get(api::genres::create_genre_form))
        .route("/genre", post(api::genres::create_genre))
        .route("/genre/:id", get(api::genres::genre_detail))
        .route("/genre/:id", put(api::genres::update_genre))
        .route("/genre/:id", delete(api::genres::delete_genre))
        .route("/genre/:id/update", get(api::genres::update_genre_form))
        // Book instances
        .route("/bookinstances", get(api::instances::list_instances))
        .route("/bookinstance/create", get(api::instances::create_instance_form))
        .route("/bookinstance", post(api::instances::create_instance))
        .route("/bookinstance/:id", get(api::instances::instance_detail))
        .route("/bookinstance/:id", put(api::instances::update_instance))
        .route("/bookinstance/:id", delete(api::instances::delete_instance))
        .route(
            "/bookinstance/:id/update",
            get(api::instances::update_instance_form),
        );

    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
