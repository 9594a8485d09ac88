use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use crate::config::NodeConfig;
use crate::crop::BoundaryResolver;
use crate::fetch::{ImageFetcher, ImageSource};
use crate::version;
use crate::vision::{OcrProvider, ReadClient};

use super::process_image::process_image_handler;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Downloads source images
    pub fetcher: Arc<dyn ImageSource>,
    /// Remote text recognition; `None` until credentials are configured
    pub ocr: Option<Arc<dyn OcrProvider>>,
    /// Resolves crop bounds from recognized lines
    pub resolver: Arc<BoundaryResolver>,
}

impl AppState {
    pub fn new(config: &NodeConfig) -> Self {
        let ocr = ReadClient::from_config(&config.vision)
            .map(|client| Arc::new(client) as Arc<dyn OcrProvider>);

        Self {
            fetcher: Arc::new(ImageFetcher::new(config.fetch.clone())),
            ocr,
            resolver: Arc::new(BoundaryResolver::new(config.phrases.clone())),
        }
    }
}

pub async fn start_server(config: NodeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.listen_addr().parse::<SocketAddr>()?;
    let state = AppState::new(&config);

    let app = Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Image processing endpoint
        .route("/v1/process-image", post(process_image_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::response::Json(json!({
        "status": "healthy",
        "version": version::get_version_string(),
        "ocr_configured": state.ocr.is_some(),
    }))
}
