//! Public settings and content reads.
//!
//! Reads other than the layout lookup degrade to empty lists on database
//! errors so the front end can still render.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use domain::models::{
    Ad, LayoutSetting, ListAdsQuery, ListAdsResponse, ListNotificationsQuery,
    ListNotificationsResponse, ListPageSectionsQuery, ListPageSectionsResponse, Notification,
    PageSection, Platform,
};
use domain::services::AdDelivery;
use persistence::repositories::{
    AdRepository, LayoutSettingRepository, NotificationRepository, PageSectionRepository,
};
use tracing::warn;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Client;

/// Parses an optional platform query value. Absent means every platform.
fn parse_platform(value: Option<&str>) -> Result<Option<Platform>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Platform::parse(v)
            .map(Some)
            .ok_or_else(|| ApiError::validation(format!("Unknown platform: {}", v))),
    }
}

/// Layout settings for a platform, or the platform defaults.
///
/// GET /api/v1/layout-settings/:platform
pub async fn get_layout_setting(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Json<LayoutSetting>, ApiError> {
    let platform = Platform::parse(&platform)
        .ok_or_else(|| ApiError::validation(format!("Unknown platform: {}", platform)))?;

    let setting = match LayoutSettingRepository::new(state.pool.clone())
        .find_by_platform(platform)
        .await
    {
        Ok(Some(entity)) => entity.into(),
        Ok(None) => LayoutSetting::defaults_for(platform),
        Err(e) => {
            warn!(error = %e, platform = %platform, "Failed to load layout settings, using defaults");
            LayoutSetting::defaults_for(platform)
        }
    };

    Ok(Json(setting))
}

/// Visible sections of a page.
///
/// GET /api/v1/page-sections?page=<page>&platform=<platform>
pub async fn list_page_sections(
    State(state): State<AppState>,
    Query(query): Query<ListPageSectionsQuery>,
) -> Result<Json<ListPageSectionsResponse>, ApiError> {
    let platform = parse_platform(query.platform.as_deref())?;

    let sections: Vec<PageSection> = match PageSectionRepository::new(state.pool.clone())
        .list_visible(&query.page, platform)
        .await
    {
        Ok(rows) => rows.into_iter().map(Into::into).collect(),
        Err(e) => {
            warn!(error = %e, page = %query.page, "Failed to load page sections");
            Vec::new()
        }
    };

    let total = sections.len();
    Ok(Json(ListPageSectionsResponse { sections, total }))
}

/// Ads for a placement, filtered by what the calling client can render.
///
/// GET /api/v1/ads?placement=<placement>&platform=<platform>
pub async fn list_ads(
    State(state): State<AppState>,
    Client(client): Client,
    Query(query): Query<ListAdsQuery>,
) -> Result<Json<ListAdsResponse>, ApiError> {
    let platform = parse_platform(query.platform.as_deref())?;

    let ads_enabled = match platform {
        Some(p) => show_ads(&state, p).await,
        None => true,
    };
    let delivery = client.ad_delivery(ads_enabled);
    if delivery == AdDelivery::None {
        return Ok(Json(ListAdsResponse {
            delivery,
            ads: Vec::new(),
        }));
    }

    let now = Utc::now();
    let ads: Vec<Ad> = match AdRepository::new(state.pool.clone())
        .list_live(&query.placement, platform, now)
        .await
    {
        Ok(rows) => rows
            .into_iter()
            .map(Ad::from)
            .filter(|ad| ad.ad_type.renderable_with(delivery))
            .collect(),
        Err(e) => {
            warn!(error = %e, placement = %query.placement, "Failed to load ads");
            Vec::new()
        }
    };

    Ok(Json(ListAdsResponse { delivery, ads }))
}

/// The platform's `show_ads` switch. Unreadable settings fall back to defaults.
async fn show_ads(state: &AppState, platform: Platform) -> bool {
    match LayoutSettingRepository::new(state.pool.clone())
        .find_by_platform(platform)
        .await
    {
        Ok(Some(entity)) => LayoutSetting::from(entity).show_ads,
        Ok(None) => LayoutSetting::defaults_for(platform).show_ads,
        Err(e) => {
            warn!(error = %e, platform = %platform, "Failed to load layout settings for ads");
            LayoutSetting::defaults_for(platform).show_ads
        }
    }
}

/// Active notifications, newest first.
///
/// GET /api/v1/notifications?platform=<platform>
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let platform = parse_platform(query.platform.as_deref())?;

    let notifications: Vec<Notification> = match NotificationRepository::new(state.pool.clone())
        .list_active(platform, Utc::now())
        .await
    {
        Ok(rows) => rows.into_iter().map(Into::into).collect(),
        Err(e) => {
            warn!(error = %e, "Failed to load notifications");
            Vec::new()
        }
    };

    let total = notifications.len();
    Ok(Json(ListNotificationsResponse {
        notifications,
        total,
    }))
}
