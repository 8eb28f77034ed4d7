//! HTTP proxy between the browser client and the upstream APIs

mod handlers;

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::{info, warn};
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::error::ChefError;

pub use handlers::HEALTH_MESSAGE;

/// State shared by all handlers. Holds no per-request mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ChefError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ChefError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(AppState {
            config: Arc::new(config),
            client,
        })
    }
}

/// Build the router with all proxy endpoints and the CORS policy
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/youtube-search", post(handlers::youtube_search))
        .route("/api/youtube-discover", post(handlers::youtube_discover))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::list([value]),
        Err(_) => {
            warn!("Invalid allowed origin '{}', cross-origin requests disabled", origin);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

fn key_status(key: Option<&str>) -> &'static str {
    if key.is_some() {
        "configured"
    } else {
        "NOT FOUND"
    }
}

/// Bind to the configured port and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Chef Claude server running on http://localhost:{}", config.port);
    info!("CORS enabled for: {}", config.allowed_origin);
    info!("Gemini API key: {}", key_status(config.gemini_key()));
    info!("YouTube API key: {}", key_status(config.youtube_key()));

    let router = build_router(AppState::new(config)?);
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
