//! Integration tests for IndexNow submission and its admin settings.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    admin_request, count_log_rows, create_test_app_with, json_request, parse_response_body,
    setup, test_config, FakeIndexNow, FakePinger,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

const SUBMIT: &str = "/functions/v1/indexnow-submit";

async fn configure_indexnow(pool: &PgPool, value: serde_json::Value) {
    sqlx::query("INSERT INTO seo_settings (setting_name, setting_value) VALUES ('indexnow', $1)")
        .bind(value)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_posts_payload_and_logs() {
    let (pool, _guard) = setup().await;
    configure_indexnow(
        &pool,
        json!({"api_key": "abcdef123456", "host": "deen.example.org"}),
    )
    .await;
    let client = FakeIndexNow::new(Some(202));

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), client.clone());
    let response = app
        .oneshot(json_request(Method::POST, SUBMIT, json!({"path": "articles/zakat"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], 202);
    assert_eq!(body["url"], "https://deen.example.org/articles/zakat");

    let submitted = client.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].host, "deen.example.org");
    assert_eq!(submitted[0].key, "abcdef123456");
    assert_eq!(
        submitted[0].key_location,
        "https://deen.example.org/abcdef123456.txt"
    );
    assert_eq!(submitted[0].url_list, vec!["https://deen.example.org/articles/zakat"]);

    assert_eq!(count_log_rows(&pool, "indexnow_submit").await, 1);
}

#[tokio::test]
async fn test_submit_reports_rejection_verbatim() {
    let (pool, _guard) = setup().await;
    configure_indexnow(
        &pool,
        json!({"api_key": "abcdef123456", "host": "deen.example.org"}),
    )
    .await;

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), FakeIndexNow::new(Some(422)));
    let response = app
        .oneshot(json_request(Method::POST, SUBMIT, json!({"path": "/quran"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 422);
}

#[tokio::test]
async fn test_submit_skipped_without_settings() {
    let (pool, _guard) = setup().await;
    let client = FakeIndexNow::new(Some(200));

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), client.clone());
    let response = app
        .oneshot(json_request(Method::POST, SUBMIT, json!({"path": "/quran"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["skipped"], true);
    assert_eq!(body["reason"], "indexnow_not_configured");
    assert!(client.submitted().is_empty());
    assert_eq!(count_log_rows(&pool, "indexnow_submit").await, 0);
}

#[tokio::test]
async fn test_submit_skipped_with_partial_settings() {
    let (pool, _guard) = setup().await;
    configure_indexnow(&pool, json!({"api_key": "abcdef123456", "host": "  "})).await;
    let client = FakeIndexNow::new(Some(200));

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), client.clone());
    let body = parse_response_body(
        app.oneshot(json_request(Method::POST, SUBMIT, json!({"path": "/quran"})))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["skipped"], true);
    assert!(client.submitted().is_empty());
}

#[tokio::test]
async fn test_submit_requires_path() {
    let (pool, _guard) = setup().await;
    let config = test_config();

    for body in [json!({}), json!({"path": ""}), json!({"path": "   "}), json!({"path": null})] {
        let app = create_test_app_with(config.clone(), pool.clone(), FakePinger::new(None, None), FakeIndexNow::new(Some(200)));
        let response = app
            .oneshot(json_request(Method::POST, SUBMIT, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "path is required");
    }

    let app = create_test_app_with(config, pool.clone(), FakePinger::new(None, None), FakeIndexNow::new(Some(200)));
    let request = Request::builder()
        .method(Method::POST)
        .uri(SUBMIT)
        .body(Body::from("not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_transport_failure_is_500() {
    let (pool, _guard) = setup().await;
    configure_indexnow(
        &pool,
        json!({"api_key": "abcdef123456", "host": "deen.example.org"}),
    )
    .await;

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), FakeIndexNow::new(None));
    let response = app
        .oneshot(json_request(Method::POST, SUBMIT, json!({"path": "/quran"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");

    let (success, error_message): (bool, Option<String>) = sqlx::query_as(
        "SELECT success, error_message FROM seo_index_logs WHERE action = 'indexnow_submit'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(!success);
    assert!(error_message.unwrap().contains("connection reset"));
}

#[tokio::test]
async fn test_admin_settings_enable_submission() {
    let (pool, _guard) = setup().await;
    let config = test_config();
    let client = FakeIndexNow::new(Some(200));

    let app = create_test_app_with(config.clone(), pool.clone(), FakePinger::new(None, None), client.clone());
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/seo/indexnow",
            Some(json!({
                "api_key": "abcdef123456",
                "host": "deen.example.org",
                "key_location": "https://deen.example.org/keys/indexnow.txt"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["configured"], true);
    assert!(body.get("api_key").is_none());

    let app = create_test_app_with(config, pool.clone(), FakePinger::new(None, None), client.clone());
    let response = app
        .oneshot(json_request(Method::POST, SUBMIT, json!({"path": "/hadith"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        client.submitted()[0].key_location,
        "https://deen.example.org/keys/indexnow.txt"
    );
}

#[tokio::test]
async fn test_admin_settings_validation() {
    let (pool, _guard) = setup().await;

    let app = create_test_app_with(test_config(), pool.clone(), FakePinger::new(None, None), FakeIndexNow::new(None));
    let response = app
        .oneshot(admin_request(
            Method::PUT,
            "/api/v1/admin/seo/indexnow",
            Some(json!({"api_key": "short", "host": "deen.example.org"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
