use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::ApiError;
use crate::middleware::{get_request_id, trace_id};
use crate::routes::{dashboard, health, reports};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub fn create_app(config: Config) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route(
            "/api/v1/dashboard/stats",
            post(dashboard::get_dashboard_stats),
        )
        .route(
            "/api/v1/reports/parse",
            post(reports::parse_report_text)
                .layer(DefaultBodyLimit::max(config.limits.max_report_bytes)),
        )
        .route("/api/v1/reports/render", post(reports::render_report_text));

    let public_routes = Router::new().route("/api/health", get(health::health_check));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback(not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

async fn not_found(req: Request<Body>) -> ApiError {
    tracing::debug!(
        request_id = %get_request_id(req.extensions()),
        path = %req.uri().path(),
        "No route matched"
    );
    ApiError::NotFound(format!("No route for {} {}", req.method(), req.uri().path()))
}
