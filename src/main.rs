//! Brewlog Backend
//!
//! REST backend for a brewery review application: review submission,
//! like/dislike expressions with per-user dedup, and a proxy onto the
//! public brewery directory.

mod api;
mod auth;
mod config;
mod db;
mod directory;
mod domain;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use directory::BreweryDirectory;
use domain::{ExpressionGuard, ReviewSubmissionFlow, SessionOverlay};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub guard: Arc<ExpressionGuard>,
    pub submissions: Arc<ReviewSubmissionFlow>,
    pub directory: Arc<BreweryDirectory>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Brewlog Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Directory URL: {}", config.directory_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BREWLOG_API_PSK). Authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Wire up the expression core and the outbound directory client
    let overlay = Arc::new(SessionOverlay::new());
    let guard = Arc::new(ExpressionGuard::new(Arc::clone(&repo), overlay));
    let submissions = Arc::new(ReviewSubmissionFlow::new(Arc::clone(&repo)));
    let directory = Arc::new(BreweryDirectory::new(&config.directory_url)?);

    // Create application state
    let state = AppState {
        repo,
        guard,
        submissions,
        directory,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Brewery directory
        .route("/breweries", get(api::list_breweries))
        .route("/breweries/{id}", get(api::get_brewery))
        // Reviews
        .route("/breweries/{id}/reviews", get(api::list_reviews))
        .route("/breweries/{id}/reviews", post(api::create_review))
        .route("/reviews/{id}/expressions", post(api::express))
        // Preferences
        .route("/preferences", get(api::get_preferences))
        .route("/preferences", put(api::put_preferences))
        // Apply bearer auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::bearer_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
