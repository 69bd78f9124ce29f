use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::common::json_body;
use crate::support::auth::bearer_for;
use crate::support::factory::seed_admin;
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn module_create_list_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"module_name": "Pengajuan TOR"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Module added successfully");
    assert_eq!(body["module"]["description"], "");
    let id = body["module"]["id"].as_i64().expect("module id");

    let req = test::TestRequest::get()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["modules"][0]["module_name"], "Pengajuan TOR");

    let req = test::TestRequest::delete()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": id}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Module deleted successfully");

    let req = test::TestRequest::delete()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": id}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "MODULE_NOT_FOUND",
        Some("Module not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn module_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"module_name": ""}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("Module name is required"),
    )
    .await;

    // An empty body reads as `{}`
    let req = test::TestRequest::delete()
        .uri("/api/module")
        .insert_header(bearer_for(&admin))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("Module ID is required"),
    )
    .await;
    Ok(())
}
