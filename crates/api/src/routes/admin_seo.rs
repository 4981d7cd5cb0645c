//! Admin endpoints for SEO pages, the index log and IndexNow settings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    IndexNowSettings, ListIndexLogsQuery, ListIndexLogsResponse, ListSeoPagesResponse, SeoIndexLog,
    SeoPage, SeoPageResponse, UpdateIndexNowSettingsRequest, UpsertSeoPageRequest,
    INDEXNOW_SETTING_NAME,
};
use persistence::repositories::{SeoIndexLogRepository, SeoPageRepository, SeoSettingRepository};
use serde::Serialize;
use shared::pagination::{clamp_page_size, decode_cursor, encode_cursor};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// List all SEO pages.
///
/// GET /api/v1/admin/seo/pages
pub async fn list_seo_pages(
    State(state): State<AppState>,
) -> Result<Json<ListSeoPagesResponse>, ApiError> {
    let pages: Vec<SeoPageResponse> = SeoPageRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(|e| SeoPage::from(e).into())
        .collect();
    let total = pages.len();
    Ok(Json(ListSeoPagesResponse { pages, total }))
}

/// Create or replace the SEO page for a path.
///
/// PUT /api/v1/admin/seo/pages
pub async fn upsert_seo_page(
    State(state): State<AppState>,
    Json(request): Json<UpsertSeoPageRequest>,
) -> Result<Json<SeoPageResponse>, ApiError> {
    let request = request.validated()?;

    let page: SeoPage = SeoPageRepository::new(state.pool.clone())
        .upsert(&request.path, &request)
        .await?
        .into();

    info!(page_id = %page.id, path = %page.path, "SEO page saved");
    Ok(Json(page.into()))
}

/// Delete an SEO page.
///
/// DELETE /api/v1/admin/seo/pages/:id
pub async fn delete_seo_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !SeoPageRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::NotFound("SEO page not found".to_string()));
    }
    info!(page_id = %id, "SEO page deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Page through the index log, newest first.
///
/// GET /api/v1/admin/seo/index-logs?cursor=<cursor>&limit=<n>
pub async fn list_index_logs(
    State(state): State<AppState>,
    Query(query): Query<ListIndexLogsQuery>,
) -> Result<Json<ListIndexLogsResponse>, ApiError> {
    let cursor = query.cursor.as_deref().map(decode_cursor).transpose()?;
    let limit = clamp_page_size(query.limit);

    let (rows, has_more) = SeoIndexLogRepository::new(state.pool.clone())
        .list_page(cursor, limit)
        .await?;
    let logs: Vec<SeoIndexLog> = rows.into_iter().map(Into::into).collect();

    let next_cursor = if has_more {
        logs.last().map(|l| encode_cursor(l.created_at, l.id))
    } else {
        None
    };

    Ok(Json(ListIndexLogsResponse { logs, next_cursor }))
}

/// Stored IndexNow settings with the key masked.
#[derive(Debug, Serialize)]
pub struct IndexNowSettingsResponse {
    pub configured: bool,
    pub host: Option<String>,
    pub key_location: Option<String>,
}

/// Store the IndexNow settings row.
///
/// PUT /api/v1/admin/seo/indexnow
pub async fn update_indexnow_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateIndexNowSettingsRequest>,
) -> Result<Json<IndexNowSettingsResponse>, ApiError> {
    request.validate()?;

    let settings = IndexNowSettings::from(request);
    let value = serde_json::to_value(&settings)
        .map_err(|e| ApiError::Internal(format!("Failed to encode settings: {}", e)))?;
    SeoSettingRepository::new(state.pool.clone())
        .upsert(INDEXNOW_SETTING_NAME, value)
        .await?;

    let resolved = settings.resolve();
    info!(host = ?settings.host, "IndexNow settings updated");
    Ok(Json(IndexNowSettingsResponse {
        configured: resolved.is_some(),
        host: resolved.as_ref().map(|r| r.host.clone()),
        key_location: resolved.map(|r| r.key_location),
    }))
}
