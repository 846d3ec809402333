//! HTTP transport: routing and CORS for the transform engine.
//!
//! The engine itself never sees HTTP; this layer parses the multipart
//! upload, hands bytes + operation + params to the pipeline and maps the
//! result (or error) onto the wire.

mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer, ExposeHeaders};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use routes::ApiError;

/// Builds the service router.
///
/// `cors_origin` is the allowed origin (`*` for any); trailing slashes are
/// stripped to match what browsers send in the `Origin` header.
pub fn router(cors_origin: &str) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/operations", get(routes::list_operations))
        .route("/api/transform", post(routes::transform))
        // Uploaded photos routinely exceed axum's 2 MB default
        .layer(DefaultBodyLimit::max(64 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let exposed = routes::TIMING_HEADERS.iter().copied().map(HeaderName::from_static);

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(ExposeHeaders::list(exposed));

    let origin = origin.trim();
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.trim_end_matches('/').parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("invalid CORS origin {origin:?}, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
