use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::common::json_body;
use crate::support::app_builder::test_state_with_push;
use crate::support::auth::bearer_for;
use crate::support::factory::seed_admin;
use crate::support::push::{browser_subscription, RecordingSender};
use crate::support::{create_test_app, test_state};

const ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send/abc123";

#[actix_web::test]
async fn send_delivers_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let sender = Arc::new(RecordingSender::default());
    let state = test_state_with_push(sender.clone()).await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    for uri in ["/api/push", "/api/auth/push"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(bearer_for(&admin))
            .set_json(json!({
                "subscription": browser_subscription(ENDPOINT),
                "title": "TOR disetujui",
                "message": "Pengajuan 001 telah disetujui",
            }))
            .to_request();
        let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
        assert_eq!(body, json!({"success": true}));
    }

    let sent = sender.sent();
    assert_eq!(sent.len(), 2);
    let (target, message) = &sent[0];
    assert_eq!(target.endpoint, ENDPOINT);
    assert_eq!(message.title, "TOR disetujui");
    assert_eq!(message.url, "/");
    assert_eq!(message.icon, "/vercel.svg");
    Ok(())
}

#[actix_web::test]
async fn public_send_path_still_needs_token() -> Result<(), Box<dyn std::error::Error>> {
    let sender = Arc::new(RecordingSender::default());
    let app = create_test_app(test_state_with_push(sender.clone()).await?)
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/api/push")
        .set_json(json!({
            "subscription": browser_subscription(ENDPOINT),
            "title": "t",
            "message": "m",
        }))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "MISSING_AUTH_HEADER",
        None,
    )
    .await;
    assert!(sender.sent().is_empty());

    // Usage document is public
    let req = test::TestRequest::get().uri("/api/push").to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["endpoints"]["send"], "POST /api/push");
    Ok(())
}

#[actix_web::test]
async fn send_validation() -> Result<(), Box<dyn std::error::Error>> {
    let sender = Arc::new(RecordingSender::default());
    let state = test_state_with_push(sender.clone()).await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/push")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"subscription": browser_subscription(ENDPOINT), "title": "t"}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("Missing required fields: subscription, title, message"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/push")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"subscription": {"endpoint": ENDPOINT}, "title": "t", "message": "m"}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        Some("Missing or invalid subscription data"),
    )
    .await;
    assert!(sender.sent().is_empty());
    Ok(())
}

#[actix_web::test]
async fn sender_absent_or_failing_is_500() -> Result<(), Box<dyn std::error::Error>> {
    let body = json!({
        "subscription": browser_subscription(ENDPOINT),
        "title": "t",
        "message": "m",
    });

    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;
    let req = test::TestRequest::post()
        .uri("/api/auth/push")
        .insert_header(bearer_for(&admin))
        .set_json(body.clone())
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::INTERNAL_SERVER_ERROR,
        "PUSH_NOT_CONFIGURED",
        Some("Server configuration error: VAPID keys not set"),
    )
    .await;

    let state = test_state_with_push(Arc::new(RecordingSender::failing())).await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;
    let req = test::TestRequest::post()
        .uri("/api/auth/push")
        .insert_header(bearer_for(&admin))
        .set_json(body)
        .to_request();
    let err = assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::INTERNAL_SERVER_ERROR,
        "PUSH_DELIVERY_FAILED",
        Some("Failed to send push notification"),
    )
    .await;
    assert!(!err.error.contains("410"));
    Ok(())
}
