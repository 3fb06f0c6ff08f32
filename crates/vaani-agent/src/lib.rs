//! Vaani agent worker library logic.

pub mod api;
pub mod config;
pub mod jobs;
pub mod runtime;

use axum::{
    routing::{delete, get},
    Extension, Json, Router,
};
use jobs::JobRegistry;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vaani_voice::{
    AgentSettings, MetricsSink, ProviderFactory, SessionBootstrapper, TracingMetricsSink,
    VoiceService,
};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// LiveKit room and token service.
    pub voice_service: Arc<VoiceService>,
    /// Bootstrapper shared by every dispatched call.
    pub bootstrapper: SessionBootstrapper,
    /// In-flight call jobs.
    pub jobs: JobRegistry,
}

impl AppState {
    pub fn new(
        voice_service: VoiceService,
        settings: AgentSettings,
        providers: Arc<dyn ProviderFactory>,
    ) -> Self {
        let metrics: Arc<dyn MetricsSink> = Arc::new(TracingMetricsSink);
        Self {
            voice_service: Arc::new(voice_service),
            bootstrapper: SessionBootstrapper::new(settings, providers, metrics),
            jobs: JobRegistry::new(),
        }
    }
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/connection-details",
            get(api::connection_details_handler),
        )
        .route(
            "/api/jobs",
            get(api::list_jobs_handler).post(api::dispatch_job_handler),
        )
        .route("/api/jobs/{jobId}", delete(api::cancel_job_handler))
        .layer(Extension(Arc::new(state)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
