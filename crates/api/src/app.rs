use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{admin_content, admin_seo, content, functions, health};
use crate::services::OutboundClients;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub outbound: OutboundClients,
}

/// Shared per-IP limiter for the function routes, `None` when
/// `security.rate_limit_per_minute` is 0.
pub fn build_rate_limiter(config: &Config) -> Option<Arc<RateLimiterState>> {
    (config.security.rate_limit_per_minute > 0).then(|| {
        Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
            config.security.trust_forwarded_headers,
        ))
    })
}

pub fn create_app(config: Config, pool: PgPool, outbound: OutboundClients) -> Router {
    let rate_limiter = build_rate_limiter(&config);
    create_app_with_limiter(config, pool, outbound, rate_limiter)
}

/// Like [`create_app`], with a limiter the caller also hands to the
/// cleanup job.
pub fn create_app_with_limiter(
    config: Config,
    pool: PgPool,
    outbound: OutboundClients,
    rate_limiter: Option<Arc<RateLimiterState>>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
        outbound,
    };

    let cors = if config.security.cors_origins.is_empty() {
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

    // Function endpoints, limited per client IP
    let function_routes = Router::new()
        .route("/functions/v1/sitemap", get(functions::sitemap))
        .route(
            "/functions/v1/notify-search-engines",
            post(functions::notify_search_engines),
        )
        .route(
            "/functions/v1/indexnow-submit",
            post(functions::indexnow_submit),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/sitemap.xml", get(functions::sitemap))
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route(
            "/api/v1/layout-settings/:platform",
            get(content::get_layout_setting),
        )
        .route("/api/v1/page-sections", get(content::list_page_sections))
        .route("/api/v1/ads", get(content::list_ads))
        .route("/api/v1/notifications", get(content::list_notifications));

    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/seo/pages",
            get(admin_seo::list_seo_pages).put(admin_seo::upsert_seo_page),
        )
        .route(
            "/api/v1/admin/seo/pages/:id",
            delete(admin_seo::delete_seo_page),
        )
        .route(
            "/api/v1/admin/seo/index-logs",
            get(admin_seo::list_index_logs),
        )
        .route(
            "/api/v1/admin/seo/indexnow",
            put(admin_seo::update_indexnow_settings),
        )
        .route(
            "/api/v1/admin/layout-settings/:platform",
            put(admin_content::update_layout_setting),
        )
        .route(
            "/api/v1/admin/page-sections",
            put(admin_content::upsert_page_section),
        )
        .route(
            "/api/v1/admin/page-sections/:id",
            delete(admin_content::delete_page_section),
        )
        .route("/api/v1/admin/ads", post(admin_content::create_ad))
        .route(
            "/api/v1/admin/ads/:id",
            put(admin_content::update_ad).delete(admin_content::delete_ad),
        )
        .route(
            "/api/v1/admin/notifications",
            post(admin_content::create_notification),
        )
        .route(
            "/api/v1/admin/notifications/:id",
            delete(admin_content::delete_notification),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(function_routes)
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state)
}
