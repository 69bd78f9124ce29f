use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use backend_test_support::unique_helpers::{unique_email, unique_nim};
use serde_json::{json, Value};

use crate::common::json_body;
use crate::support::factory::seed_role;
use crate::support::{create_test_app, test_state};

fn registration(roles_id: i32) -> Value {
    json!({
        "name": "Sari",
        "email": unique_email("sari"),
        "nim": unique_nim(),
        "program_studi": "Sistem Informasi",
        "roles_id": roles_id.to_string(),
        "password": "rahasia123",
    })
}

#[actix_web::test]
async fn register_then_login() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let role = seed_role(state.db().unwrap(), "mahasiswa").await?;
    let app = create_test_app(state).build().await?;
    let payload = registration(role.id_roles);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], payload["email"]);
    assert_eq!(body["user"]["roles_id"], json!(role.id_roles));
    assert_eq!(body["user"]["description"], Value::Null);
    assert!(body["user"].get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"identifier": payload["nim"], "password": "rahasia123"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    Ok(())
}

#[actix_web::test]
async fn duplicate_email_and_nim_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let role = seed_role(state.db().unwrap(), "mahasiswa").await?;
    let app = create_test_app(state).build().await?;
    let first = registration(role.id_roles);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&first)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let mut same_email = registration(role.id_roles);
    same_email["email"] = first["email"].clone();
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&same_email)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::CONFLICT,
        "EMAIL_EXISTS",
        Some("Email already exists"),
    )
    .await;

    let mut same_nim = registration(role.id_roles);
    same_nim["nim"] = first["nim"].clone();
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&same_nim)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::CONFLICT,
        "NIM_EXISTS",
        Some("NIM already exists"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn invalid_input_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let role = seed_role(state.db().unwrap(), "mahasiswa").await?;
    let app = create_test_app(state).build().await?;

    let mut bad_email = registration(role.id_roles);
    bad_email["email"] = json!("not-an-email");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&bad_email)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_EMAIL",
        Some("Invalid email format"),
    )
    .await;

    let mut missing = registration(role.id_roles);
    missing.as_object_mut().unwrap().remove("program_studi");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&missing)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("Missing required fields: name, email, nim, program_studi, roles_id, password"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn unknown_role_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(test_state().await?).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(registration(999))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
