//! HTTP handlers for the transform service.

use axum::Json;
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::processing::{pipeline, registry};
use crate::utils::TransformError;

pub(super) const TIMING_HEADERS: [&str; 4] = [
    "x-decode-ms",
    "x-transform-ms",
    "x-encode-ms",
    "x-output-size",
];

/// Error envelope returned to HTTP callers as JSON.
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.into() }),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": message.into() }),
        }
    }
}

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::UnknownOperation { ref allowed, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                body: json!({ "error": err.to_string(), "allowed": allowed }),
            },
            TransformError::Decode(_) => Self::bad_request(err.to_string()),
            TransformError::Encode(_) | TransformError::InvalidBuffer { .. } => {
                warn!("internal transform failure: {err}");
                Self::internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/operations`
///
/// Lists registered operation names (sorted) together with each operation's
/// parameter schema so a client can generate its controls.
pub async fn list_operations() -> Json<Value> {
    let mut parameters = Map::new();
    for descriptor in registry::descriptors() {
        parameters.insert(
            descriptor.name.to_string(),
            serde_json::to_value(descriptor.params).unwrap_or_default(),
        );
    }
    Json(json!({
        "operations": registry::operation_names(),
        "parameters": parameters,
    }))
}

/// `POST /api/transform`
///
/// Multipart form: an `image` file field, an `operation` text field and an
/// optional `params` text field holding a flat JSON object of numbers.
/// Responds with the transformed PNG plus per-stage timing headers.
pub async fn transform(mut multipart: Multipart) -> Result<Response, ApiError> {
    let mut image_bytes: Option<Bytes> = None;
    let mut operation: Option<String> = None;
    let mut raw_params = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable image field: {e}")))?;
                image_bytes = Some(bytes);
            }
            "operation" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Unreadable operation field: {e}"))
                })?;
                operation = Some(text);
            }
            "params" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable params field: {e}")))?;
                if !text.trim().is_empty() {
                    raw_params = serde_json::from_str(&text)
                        .map_err(|e| ApiError::bad_request(format!("Invalid params JSON: {e}")))?;
                }
            }
            // Unknown form fields are ignored
            _ => {}
        }
    }

    let bytes = image_bytes
        .ok_or_else(|| ApiError::bad_request("Missing image file field \"image\""))?;
    let operation = operation
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing operation"))?;

    debug!(
        "transform request: operation={operation}, {} input bytes",
        bytes.len()
    );

    // The engine is synchronous and CPU-bound; run it off the async runtime.
    let output = tokio::task::spawn_blocking(move || {
        pipeline::run(&bytes, &operation, &raw_params)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Transform task panicked: {e}")))??;

    let timings = output.timings;
    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            HeaderName::from_static(TIMING_HEADERS[0]),
            format!("{:.2}", timings.decode_ms),
        ),
        (
            HeaderName::from_static(TIMING_HEADERS[1]),
            format!("{:.2}", timings.transform_ms),
        ),
        (
            HeaderName::from_static(TIMING_HEADERS[2]),
            format!("{:.2}", timings.encode_ms),
        ),
        (
            HeaderName::from_static(TIMING_HEADERS[3]),
            format!("{}x{}", output.width, output.height),
        ),
    ];

    Ok((headers, output.png).into_response())
}
