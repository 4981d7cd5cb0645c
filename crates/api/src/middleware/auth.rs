//! Admin authentication middleware.
//!
//! Admin routes require an `X-Admin-Key` header whose SHA-256 digest matches
//! `security.admin_key_sha256`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Rejects requests without a valid admin key.
///
/// 403 when no admin key is configured at all, 401 when the header is
/// missing or does not match.
pub async fn require_admin(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let expected = state.config.security.admin_key_sha256.trim();
    if expected.is_empty() {
        return forbidden_response("Admin API is disabled");
    }

    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match presented {
        Some(key) if shared::crypto::verify_key(key, expected) => next.run(req).await,
        Some(_) => {
            tracing::warn!(path = %req.uri().path(), "Rejected invalid admin key");
            unauthorized_response("Invalid or missing admin key")
        }
        None => unauthorized_response("Invalid or missing admin key"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}
