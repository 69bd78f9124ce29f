use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;

use crate::common::json_body;
use crate::support::auth::bearer_for;
use crate::support::factory::{seed_admin, seed_role};
use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn role_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/roles")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name_roles": "bendahara"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Role added successfully");
    assert_eq!(body["role"]["keterangan"], "");
    let id = body["role"]["id_roles"].as_i64().expect("id_roles");

    let req = test::TestRequest::put()
        .uri(&format!("/api/roles/{id}"))
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name_roles": "bendahara umum", "keterangan": "Mengelola kas"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Role updated successfully");
    assert_eq!(body["role"]["name_roles"], "bendahara umum");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/roles/{id}"))
        .insert_header(bearer_for(&admin))
        .set_json(json!({"keterangan": "Kas dan laporan"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["role"]["name_roles"], "bendahara umum");
    assert_eq!(body["role"]["keterangan"], "Kas dan laporan");

    let req = test::TestRequest::get()
        .uri(&format!("/api/roles/{id}"))
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["role"]["id_roles"], json!(id));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/roles/{id}"))
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "Role deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/roles/{id}"))
        .insert_header(bearer_for(&admin))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "ROLE_NOT_FOUND",
        Some("Role not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn roles_are_listed_by_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let db = state.db().unwrap().clone();
    let (first, admin) = seed_admin(&db).await?;
    let second = seed_role(&db, "sekretaris").await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::get()
        .uri("/api/roles")
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    let ids: Vec<i64> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id_roles"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first.id_roles as i64, second.id_roles as i64]);
    Ok(())
}

#[actix_web::test]
async fn role_in_use_cannot_be_deleted() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (role, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::delete()
        .uri("/api/roles")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id_roles": role.id_roles}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "ROLE_IN_USE",
        Some("Cannot delete role that is still in use by users"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn duplicate_role_name_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (role, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/roles")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"name_roles": role.name_roles}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::CONFLICT,
        "ROLE_NAME_EXISTS",
        Some("Role name already exists"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn role_validation_messages() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (role, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let cases = [
        (test::TestRequest::post().uri("/api/roles"), json!({}), "Role name is required"),
        (test::TestRequest::delete().uri("/api/roles"), json!({}), "Role ID is required"),
        (
            test::TestRequest::put().uri(&format!("/api/roles/{}", role.id_roles)),
            json!({"name_roles": "x"}),
            "name_roles and keterangan are required",
        ),
        (
            test::TestRequest::patch().uri(&format!("/api/roles/{}", role.id_roles)),
            json!({"name_roles": ""}),
            "At least one field to update is required",
        ),
    ];

    for (req, body, message) in cases {
        let req = req
            .insert_header(bearer_for(&admin))
            .set_json(body)
            .to_request();
        assert_error_response(
            test::call_service(&app, req).await,
            StatusCode::BAD_REQUEST,
            "MISSING_FIELDS",
            Some(message),
        )
        .await;
    }
    Ok(())
}
