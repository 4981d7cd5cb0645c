//! Function endpoints: sitemap, search-engine notification and IndexNow.
//!
//! These keep their public contract: XML or plain text for the sitemap and
//! `{success, ...}` JSON bodies for the two POST endpoints.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::headers::{HeaderMapExt, Host};
use domain::models::{IndexNowSkippedResponse, IndexNowSubmitRequest, RateLimitedResponse};
use domain::services::{resolve_origin, RateWindow};
use serde::Deserialize;
use tracing::{error, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::FunctionError;
use crate::services::{
    generate_sitemap, IndexNowSubmitter, NotifyOutcome, SeoNotifier, SubmitOutcome,
};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[derive(Debug, Default, Deserialize)]
pub struct SitemapQuery {
    pub host: Option<String>,
}

/// Serve the XML sitemap.
///
/// GET /functions/v1/sitemap?host=<host>
/// GET /sitemap.xml
pub async fn sitemap(
    State(state): State<AppState>,
    Query(query): Query<SitemapQuery>,
    headers: HeaderMap,
) -> Response {
    let host_header = headers.typed_get::<Host>().map(|h| match h.port() {
        Some(port) => format!("{}:{}", h.hostname(), port),
        None => h.hostname().to_string(),
    });
    let forwarded_proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok());
    let origin = resolve_origin(
        query.host.as_deref(),
        host_header.as_deref(),
        forwarded_proto,
        state.config.seo.site_origin(),
    );

    match generate_sitemap(&state.pool, &origin).await {
        Ok(xml) => {
            let cache_control = format!(
                "public, max-age={}",
                state.config.seo.sitemap_cache_max_age_secs
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/xml; charset=utf-8".to_string()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                xml,
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, origin = %origin, "Sitemap generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                "Error generating sitemap",
            )
                .into_response()
        }
    }
}

/// Ping search engines with the sitemap URL, at most once per window.
///
/// POST /functions/v1/notify-search-engines
pub async fn notify_search_engines(
    State(state): State<AppState>,
) -> Result<Response, FunctionError> {
    let notifier = SeoNotifier::new(
        state.pool.clone(),
        state.outbound.pinger.clone(),
        RateWindow::from_secs(state.config.seo.ping_window_secs),
        state.config.seo.sitemap_url(),
    );

    match notifier.notify().await {
        Ok(NotifyOutcome::Completed(response)) => Ok(Json(response).into_response()),
        Ok(NotifyOutcome::RateLimited { retry_after_secs }) => {
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(RateLimitedResponse::new(retry_after_secs)),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
            Ok(response)
        }
        Err(e) => {
            error!(error = %e, "Search engine notification failed");
            Err(FunctionError::internal())
        }
    }
}

/// Submit one site path to IndexNow.
///
/// POST /functions/v1/indexnow-submit
///
/// The body is parsed by hand so that a missing or malformed body gets the
/// same `path is required` answer as an empty path.
pub async fn indexnow_submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, FunctionError> {
    let request: IndexNowSubmitRequest = if body.is_empty() {
        IndexNowSubmitRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(error = %e, "Unparseable IndexNow submit body");
            IndexNowSubmitRequest::default()
        })
    };

    request.validate()?;
    let path = request
        .path()
        .ok_or_else(|| FunctionError::BadRequest("path is required".into()))?;

    let submitter = IndexNowSubmitter::new(state.pool.clone(), state.outbound.indexnow.clone());
    match submitter.submit(path).await {
        Ok(SubmitOutcome::Submitted(response)) => Ok(Json(response).into_response()),
        Ok(SubmitOutcome::Skipped) => Ok(Json(IndexNowSkippedResponse::default()).into_response()),
        Err(e) => {
            error!(error = %e, path = %path, "IndexNow submission failed");
            Err(FunctionError::internal())
        }
    }
}
