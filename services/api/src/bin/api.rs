//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DbAdapter, HttpRemoteSync},
    config::Config,
    error::ApiError,
    web::{api_router, rest::ApiDoc, state::AppState},
};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderName, Method};
use axum::Router;
use emotion_assessment_core::{
    features::{FeatureExtractor, KeywordLexicon},
    ports::{PersistenceStore, RemoteArchive, UserDirectory},
    AssessmentEngine, EngineConfig, InMemoryStore, KeywordSentimentScorer, StorageRouter,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Set Up Persistence ---
    let (store, users, archive) = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = Arc::new(DbAdapter::new(db_pool, config.default_storage_preference));
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            (
                db_adapter.clone() as Arc<dyn PersistenceStore>,
                db_adapter.clone() as Arc<dyn UserDirectory>,
                db_adapter as Arc<dyn RemoteArchive>,
            )
        }
        None => {
            warn!("DATABASE_URL is not set; assessments will only be kept in memory.");
            let memory = Arc::new(InMemoryStore::new(config.default_storage_preference));
            (
                memory.clone() as Arc<dyn PersistenceStore>,
                memory.clone() as Arc<dyn UserDirectory>,
                memory as Arc<dyn RemoteArchive>,
            )
        }
    };

    // --- 3. Initialize the Engine and Storage Router ---
    let engine = Arc::new(AssessmentEngine::new(
        FeatureExtractor::new(KeywordLexicon::default()),
        Arc::new(KeywordSentimentScorer::new()),
        EngineConfig {
            sensitivity: config.sensitivity,
        },
    ));

    let remote_sync = Arc::new(HttpRemoteSync::new(
        config.sync_base_url.clone(),
        config.sync_timeout,
    )?);
    info!("Remote sync target: {}", config.sync_base_url);
    let router = StorageRouter::new(store, remote_sync);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        engine,
        router,
        users,
        archive,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static("x-user-id")]);

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
