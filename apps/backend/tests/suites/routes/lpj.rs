use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::{json, Value};

use crate::common::json_body;
use crate::support::auth::bearer_for;
use crate::support::factory::seed_admin;
use crate::support::{create_test_app, test_state};

fn report(admin_id: i32, jadwal_awal: &str) -> Value {
    json!({
        "nama_kegiatan": "Bakti Sosial",
        "tujuan": "Pengabdian masyarakat",
        "latar_belakang": "Program kerja",
        "peserta_mahasiswa": 40,
        "jadwal_awal": jadwal_awal,
        "jadwal_akhir": "2025-05-03",
        "estimasi_jadwal": "3 hari",
        "dana_diajukan": "2500000",
        "pic": "Andi",
        "upload_file": "lpj.pdf",
        "admin_id": admin_id,
        "admin_name": "Admin",
    })
}

#[actix_web::test]
async fn submit_defaults_status_and_nulls_optional_amounts() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let mut body = report(admin.id, "2025-05-01");
    body["peserta_dosen"] = json!(0);
    let req = test::TestRequest::post()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(body)
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["message"], "LPJ submitted successfully");
    assert_eq!(body["lpj"]["status"], "pending");
    assert_eq!(body["lpj"]["dana_diajukan"], 2_500_000);
    assert!(body["lpj"]["peserta_dosen"].is_null());
    assert!(body["lpj"]["dana_terpakai"].is_null());
    Ok(())
}

#[actix_web::test]
async fn first_missing_field_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let mut body = report(admin.id, "2025-05-01");
    body.as_object_mut().unwrap().remove("estimasi_jadwal");
    body["pic"] = json!("");
    let req = test::TestRequest::post()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(body)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("estimasi_jadwal is required"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(report(9_999, "2025-05-01"))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "FK_VIOLATION",
        Some("Admin ID not found"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn list_update_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let mut ids = Vec::new();
    for jadwal in ["2025-01-10", "2025-06-01"] {
        let req = test::TestRequest::post()
            .uri("/api/pengajuan/lpj")
            .insert_header(bearer_for(&admin))
            .set_json(report(admin.id, jadwal))
            .to_request();
        let body = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
        ids.push(body["lpj"]["id"].as_i64().expect("lpj id"));
    }

    let req = test::TestRequest::get()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["lpj_list"][0]["id"], json!(ids[1]));
    assert_eq!(body["lpj_list"][1]["id"], json!(ids[0]));

    let req = test::TestRequest::put()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": ids[0], "status": "approved", "dana_terpakai": 2_000_000}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "LPJ updated successfully");
    assert_eq!(body["lpj"]["status"], "approved");
    assert_eq!(body["lpj"]["dana_terpakai"], 2_000_000);
    assert_eq!(body["lpj"]["nama_kegiatan"], "Bakti Sosial");

    let req = test::TestRequest::put()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"status": "approved"}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("LPJ ID is required"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": ids[0]}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "LPJ deleted successfully");

    let req = test::TestRequest::put()
        .uri("/api/pengajuan/lpj")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": ids[0], "status": "rejected"}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "LPJ_NOT_FOUND",
        Some("LPJ not found"),
    )
    .await;
    Ok(())
}
