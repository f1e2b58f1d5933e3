//! HTTP API consumed by the explorer frontend

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Settings;
use crate::core::{EntityRecord, RankedEntities};
use crate::error::ExplorerError;
use crate::explorer::Explorer;

#[derive(Clone)]
pub struct AppState {
    pub explorer: Arc<Explorer>,
    pub project_name: String,
}

impl AppState {
    pub fn new(explorer: Explorer, settings: &Settings) -> Self {
        Self {
            explorer: Arc::new(explorer),
            project_name: settings.project_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    resolver: String,
    available: bool,
}

/// Build the router with CORS restricted to `allowed_origins`
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/entity/:name", get(entity_handler))
        .route("/api/fetch-related-entities", post(related_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Welcome to the {} API", state.project_name),
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        resolver: state.explorer.resolver_name().to_string(),
        available: state.explorer.is_available().await,
    })
}

async fn entity_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<EntityRecord>, AppError> {
    let entity = state.explorer.entity(&name).await?;

    tracing::debug!(
        "Resolved {}: {} seeAlso links, comment: {}",
        entity.identifier,
        entity.see_also().len(),
        entity.comment().is_some()
    );

    Ok(Json(entity))
}

async fn related_handler(
    State(state): State<AppState>,
    Json(main): Json<EntityRecord>,
) -> Result<Json<RankedEntities>, AppError> {
    let identifier = main.identifier.clone();
    let ranked = state.explorer.related(main).await?;

    tracing::info!("✅ Ranked {} related entities for {}", ranked.len(), identifier);

    Ok(Json(ranked.into()))
}

// Error handling
struct AppError(ExplorerError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExplorerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ExplorerError::NotFound(_) => StatusCode::NOT_FOUND,
            ExplorerError::Endpoint { .. } | ExplorerError::HttpRequest(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, detail);

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<ExplorerError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
