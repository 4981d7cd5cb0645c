//! Integration tests for the admin API.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    admin_request, create_test_app, fake_body, fake_title, insert_log_row, insert_seo_page,
    parse_response_body,
    setup, test_config,
};
use deen_api::middleware::ADMIN_KEY_HEADER;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_requires_key() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    let app = create_test_app(config.clone(), pool.clone());
    let request = Request::builder()
        .uri("/api/v1/admin/seo/pages")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = create_test_app(config, pool.clone());
    let request = Request::builder()
        .uri("/api/v1/admin/seo/pages")
        .header(ADMIN_KEY_HEADER, "wrong-key")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_admin_forbidden_without_configured_key() {
    let (pool, _guard) = setup().await;
    let mut config = test_config();
    config.security.admin_key_sha256 = String::new();

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(Method::GET, "/api/v1/admin/seo/pages", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_seo_page_crud() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/seo/pages",
            Some(json!({"path": "prayer-times", "priority": 0.9, "changefreq": "daily"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = parse_response_body(response).await;
    assert_eq!(created["path"], "/prayer-times");
    assert_eq!(created["priority"], 0.9);

    // Upsert by path keeps the row
    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/seo/pages",
            Some(json!({"path": "/prayer-times", "priority": 0.5})),
        ))
        .await
        .unwrap();
    let updated = parse_response_body(response).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["priority"], 0.5);

    let app = create_test_app(config.clone(), pool.clone());
    let body = parse_response_body(
        app.oneshot(admin_request(Method::GET, "/api/v1/admin/seo/pages", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 1);

    let id = created["id"].as_str().unwrap();
    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::DELETE,
            &format!("/api/v1/admin/seo/pages/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::DELETE,
            &format!("/api/v1/admin/seo/pages/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seo_page_validation() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    for body in [
        json!({"path": "/x", "priority": 1.5}),
        json!({"path": "/x", "changefreq": "sometimes"}),
        json!({"path": "https://other.example/x"}),
    ] {
        let app = create_test_app(config.clone(), pool.clone());
        let response = app
            .oneshot(admin_request(Method::PUT, "/api/v1/admin/seo/pages", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn test_blank_seo_path_does_not_replace_root_page() {
    let (pool, _guard) = setup().await;
    insert_seo_page(&pool, "/", Some(1.0), None).await;
    let config = test_config();

    for path in ["", "   "] {
        let app = create_test_app(config.clone(), pool.clone());
        let response = app
            .oneshot(admin_request(
                Method::PUT,
                "/api/v1/admin/seo/pages",
                Some(json!({"path": path, "robots": "noindex", "priority": 0.1})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response).await;
        assert_eq!(body["message"], "Path is required");
    }

    let (robots, priority): (Option<String>, Option<f64>) =
        sqlx::query_as("SELECT robots, priority FROM seo_pages WHERE path = '/'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(robots, None);
    assert_eq!(priority, Some(1.0));
}

#[tokio::test]
async fn test_index_log_pagination() {
    let (pool, _guard) = setup().await;
    for age in 1..=5 {
        insert_log_row(&pool, "ping_google", age * 60, true).await;
    }
    let config = test_config();

    let app = create_test_app(config.clone(), pool.clone());
    let first = parse_response_body(
        app.oneshot(admin_request(
            Method::GET,
            "/api/v1/admin/seo/index-logs?limit=3",
            None,
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(first["logs"].as_array().unwrap().len(), 3);
    let cursor = first["next_cursor"].as_str().unwrap().to_string();

    let app = create_test_app(config.clone(), pool.clone());
    let second = parse_response_body(
        app.oneshot(admin_request(
            Method::GET,
            &format!("/api/v1/admin/seo/index-logs?limit=3&cursor={}", cursor),
            None,
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(second["logs"].as_array().unwrap().len(), 2);
    assert!(second.get("next_cursor").is_none());

    let newest_second = second["logs"][0]["created_at"].as_str().unwrap();
    let oldest_first = first["logs"][2]["created_at"].as_str().unwrap();
    assert!(newest_second < oldest_first);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::GET,
            "/api/v1/admin/seo/index-logs?cursor=garbage",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_layout_setting_upsert_then_read() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/layout-settings/ios",
            Some(json!({"theme": "dark", "show_footer": false, "show_bottom_nav": true, "show_ads": false})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = create_test_app(config, pool.clone());
    let body = parse_response_body(
        app.oneshot(common::get_request("/api/v1/layout-settings/ios"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["show_footer"], false);
    assert_eq!(body["show_ads"], false);
}

#[tokio::test]
async fn test_page_section_upsert_and_delete() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    let section = json!({"page": "home", "section_key": "hero", "is_visible": true, "sort_order": 1});
    let app = create_test_app(config.clone(), pool.clone());
    let first = parse_response_body(
        app.oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/page-sections",
            Some(section),
        ))
        .await
        .unwrap(),
    )
    .await;

    let app = create_test_app(config.clone(), pool.clone());
    let second = parse_response_body(
        app.oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/page-sections",
            Some(json!({"page": "home", "section_key": "hero", "is_visible": false, "sort_order": 4})),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["is_visible"], false);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::DELETE,
            &format!("/api/v1/admin/page-sections/{}", first["id"].as_str().unwrap()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_ad_lifecycle() {
    let (pool, _guard) = setup().await;
    let config = test_config();
    let ad = json!({
        "name": "Ramadan banner",
        "placement": "home_banner",
        "platform": "web",
        "ad_type": "image",
        "image_url": "https://cdn.example.org/ramadan.png",
        "target_url": "https://example.org/ramadan",
        "is_active": true,
        "priority": 5
    });

    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(Method::POST, "/api/v1/admin/ads", Some(ad.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut changed = ad.clone();
    changed["priority"] = json!(9);
    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            &format!("/api/v1/admin/ads/{}", id),
            Some(changed.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["priority"], 9);

    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            &format!("/api/v1/admin/ads/{}", uuid::Uuid::new_v4()),
            Some(changed),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::DELETE,
            &format!("/api/v1/admin/ads/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_ad_inconsistent_request_rejected() {
    let (pool, _guard) = setup().await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::POST,
            "/api/v1/admin/ads",
            Some(json!({
                "name": "Tag",
                "placement": "sidebar",
                "platform": "all",
                "ad_type": "script",
                "is_active": true,
                "priority": 0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_notification_create_and_delete() {
    let (pool, _guard) = setup().await;
    let config = test_config();
    let title = fake_title();

    let app = create_test_app(config.clone(), pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::POST,
            "/api/v1/admin/notifications",
            Some(json!({"title": title, "body": fake_body(), "platform": "all"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = parse_response_body(response).await;
    assert_eq!(created["title"], title.as_str());

    let app = create_test_app(config.clone(), pool.clone());
    let listed = parse_response_body(
        app.oneshot(common::get_request("/api/v1/notifications?platform=ios"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listed["total"], 1);

    let app = create_test_app(config, pool.clone());
    let response = app
        .oneshot(admin_request(
            Method::DELETE,
            &format!("/api/v1/admin/notifications/{}", created["id"].as_str().unwrap()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
