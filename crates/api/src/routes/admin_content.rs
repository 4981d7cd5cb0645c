//! Admin endpoints for layout settings, page sections, ads and notifications.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    Ad, CreateNotificationRequest, LayoutSetting, Notification, PageSection, Platform,
    SaveAdRequest, UpdateLayoutSettingRequest, UpsertPageSectionRequest,
};
use persistence::repositories::{
    AdRepository, LayoutSettingRepository, NotificationRepository, PageSectionRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// PUT /api/v1/admin/layout-settings/:platform
pub async fn update_layout_setting(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Json(request): Json<UpdateLayoutSettingRequest>,
) -> Result<Json<LayoutSetting>, ApiError> {
    let platform = Platform::parse(&platform)
        .ok_or_else(|| ApiError::validation(format!("Unknown platform: {}", platform)))?;
    request.validate()?;

    let setting: LayoutSetting = LayoutSettingRepository::new(state.pool.clone())
        .upsert(platform, &request)
        .await?
        .into();

    info!(platform = %platform, show_ads = setting.show_ads, "Layout settings updated");
    Ok(Json(setting))
}

/// Create or update a section, keyed by page and section key.
///
/// PUT /api/v1/admin/page-sections
pub async fn upsert_page_section(
    State(state): State<AppState>,
    Json(request): Json<UpsertPageSectionRequest>,
) -> Result<Json<PageSection>, ApiError> {
    request.validate()?;

    let section: PageSection = PageSectionRepository::new(state.pool.clone())
        .upsert(&request)
        .await?
        .into();

    info!(section_id = %section.id, page = %section.page, key = %section.section_key, "Page section saved");
    Ok(Json(section))
}

/// DELETE /api/v1/admin/page-sections/:id
pub async fn delete_page_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !PageSectionRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::NotFound("Page section not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validate_ad(request: &SaveAdRequest) -> Result<(), ApiError> {
    request.validate()?;
    request.validate_consistency().map_err(ApiError::validation)
}

/// POST /api/v1/admin/ads
pub async fn create_ad(
    State(state): State<AppState>,
    Json(request): Json<SaveAdRequest>,
) -> Result<(StatusCode, Json<Ad>), ApiError> {
    validate_ad(&request)?;

    let ad: Ad = AdRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(ad_id = %ad.id, placement = %ad.placement, "Ad created");
    Ok((StatusCode::CREATED, Json(ad)))
}

/// PUT /api/v1/admin/ads/:id
pub async fn update_ad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveAdRequest>,
) -> Result<Json<Ad>, ApiError> {
    validate_ad(&request)?;

    let ad: Ad = AdRepository::new(state.pool.clone())
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ad not found".to_string()))?
        .into();

    info!(ad_id = %ad.id, "Ad updated");
    Ok(Json(ad))
}

/// DELETE /api/v1/admin/ads/:id
pub async fn delete_ad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !AdRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::NotFound("Ad not found".to_string()));
    }
    info!(ad_id = %id, "Ad deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate()?;
    if let (Some(start), Some(end)) = (request.starts_at, request.expires_at) {
        if end <= start {
            return Err(ApiError::validation("expires_at must be after starts_at"));
        }
    }

    let notification: Notification = NotificationRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    info!(notification_id = %notification.id, "Notification created");
    Ok((StatusCode::CREATED, Json(notification)))
}

/// DELETE /api/v1/admin/notifications/:id
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !NotificationRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
