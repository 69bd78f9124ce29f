use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;
use simjur_backend::{AuthOutcome, TokenAuthenticator};

use crate::common::json_body;
use crate::support::auth::test_security;
use crate::support::factory::{seed_admin, TEST_PASSWORD};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn login_by_email_name_or_nim_issues_gate_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, user) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;
    let gate = TokenAuthenticator::new(&test_security());

    for identifier in [&user.email, &user.name, &user.nim] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"identifier": identifier, "password": TEST_PASSWORD}))
            .to_request();
        let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;

        assert_eq!(body["message"], "Login success");
        assert_eq!(body["user"]["id"], json!(user.id));
        assert!(body["user"].get("password").is_none());

        let token = body["token"].as_str().expect("token string");
        let AuthOutcome::Authenticated(claims) = gate.authenticate(Some(token)) else {
            panic!("issued token should pass the gate");
        };
        assert_eq!(claims.subject_id(), Some(user.id));
        assert_eq!(claims.name(), Some(user.name.as_str()));
        assert_eq!(claims.role_id(), Some(user.roles_id));
    }
    Ok(())
}

#[actix_web::test]
async fn wrong_password_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, user) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": user.email, "password": "salah"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(
        resp,
        StatusCode::UNAUTHORIZED,
        "INVALID_PASSWORD",
        Some("Invalid password"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn unknown_identifier_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": "nobody@example.test", "password": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(
        resp,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
        Some("User not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn missing_or_empty_credentials_are_400() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await?;

    for body in [
        json!({"identifier": "admin"}),
        json!({"password": "x"}),
        json!({"identifier": "", "password": "x"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(
            resp,
            StatusCode::BAD_REQUEST,
            "MISSING_FIELDS",
            Some("Missing credentials"),
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"identifier\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;
    Ok(())
}
