use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::{json, Value};

use crate::common::json_body;
use crate::support::auth::bearer_for;
use crate::support::factory::{seed_admin, seed_role, seed_user};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn users_are_listed_with_their_role() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let db = state.db().unwrap().clone();
    let (role, admin) = seed_admin(&db).await?;
    let other = seed_user(&db, "budi", role.id_roles).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get()
        .uri("/api/user")
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    let users = body["users"].as_array().unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], json!(admin.id));
    assert_eq!(users[1]["id"], json!(other.id));
    assert_eq!(users[1]["roles_table"]["name_roles"], json!(role.name_roles));
    assert!(users.iter().all(|u| u.get("password").is_none()));
    Ok(())
}

#[actix_web::test]
async fn get_put_patch_delete_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let db = state.db().unwrap().clone();
    let (role, admin) = seed_admin(&db).await?;
    let promoted = seed_role(&db, "ketua").await?;
    let user = seed_user(&db, "citra", role.id_roles).await?;
    let app = create_test_app(state).build().await?;
    let uri = format!("/api/user/{}", user.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["user"]["email"], json!(user.email));
    assert_eq!(body["user"]["roles_table"]["id_roles"], json!(role.id_roles));

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name": "Citra Dewi", "roles_id": promoted.id_roles, "description": "Ketua angkatan"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["user"]["name"], "Citra Dewi");
    assert_eq!(body["user"]["roles_id"], json!(promoted.id_roles));

    // null clears the description; absent fields stay as they were
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .set_json(json!({"description": null}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["user"]["description"], Value::Null);
    assert_eq!(body["user"]["name"], "Citra Dewi");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "User deleted successfully");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
        Some("User not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn collection_patch_and_delete_take_id_in_body() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let db = state.db().unwrap().clone();
    let (role, admin) = seed_admin(&db).await?;
    let user = seed_user(&db, "dimas", role.id_roles).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::patch()
        .uri("/api/user")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": user.id.to_string(), "description": "Bendahara"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "User updated successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/user/{}", user.id))
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["user"]["description"], "Bendahara");

    let req = test::TestRequest::delete()
        .uri("/api/user")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": user.id}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "User deleted successfully");

    let req = test::TestRequest::delete()
        .uri("/api/user")
        .insert_header(bearer_for(&admin))
        .set_json(json!({}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("User ID is required"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn user_update_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;
    let uri = format!("/api/user/{}", admin.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name": "Admin"}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("Name and roles_id are required"),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer_for(&admin))
        .set_json(json!({}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("At least one field to update is required"),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/user/9999")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name": "Hantu", "roles_id": 1}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
        Some("User not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn moving_user_to_unknown_role_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/user/{}", admin.id))
        .insert_header(bearer_for(&admin))
        .set_json(json!({"roles_id": 4242}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "FK_VIOLATION",
        Some("Role not found"),
    )
    .await;
    Ok(())
}
