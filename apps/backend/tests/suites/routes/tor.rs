use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::{json, Value};

use crate::common::json_body;
use crate::support::auth::bearer_for;
use crate::support::factory::{seed_admin, seed_user};
use crate::support::{create_test_app, test_state};

fn submission(nomor_surat: &str, tanggal_pengajuan: &str) -> Value {
    json!({
        "nomor_surat": nomor_surat,
        "nama_kegiatan": "Seminar Nasional",
        "tujuan": "Berbagi riset",
        "latar_belakang": "Program kerja tahunan",
        "tanggal_pengajuan": tanggal_pengajuan,
        "nominal_pengajuan": "1500000",
        "peserta": "Mahasiswa",
        "jadwal_awal": "2025-03-01",
        "jadwal_akhir": "2025-03-02",
        "anggaran": "Dana kemahasiswaan",
        "pic": "Budi",
        "upload_file": "tor-001.pdf",
    })
}

#[actix_web::test]
async fn submit_records_caller_as_owner() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (role, _) = seed_admin(state.db().unwrap()).await?;
    let submitter = seed_user(state.db().unwrap(), "Siti", role.id_roles).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&submitter))
        .set_json(submission("001/TOR/2025", "2025-02-01"))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["message"], "TOR submitted successfully");
    assert_eq!(body["tor"]["pengaju_id"], json!(submitter.id));
    assert_eq!(body["tor"]["user_id"], json!(submitter.id));
    assert_eq!(body["tor"]["nominal_pengajuan"], 1_500_000);
    assert_eq!(body["tor"]["jadwal_awal"], "2025-03-01");
    Ok(())
}

#[actix_web::test]
async fn list_is_newest_first_with_submitter() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    for (nomor, tanggal) in [("A", "2025-01-05"), ("B", "2025-02-10"), ("C", "2024-12-31")] {
        let req = test::TestRequest::post()
            .uri("/api/pengajuan/tor")
            .insert_header(bearer_for(&admin))
            .set_json(submission(nomor, tanggal))
            .to_request();
        json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    let order: Vec<&str> = body["tor_list"]
        .as_array()
        .expect("tor_list array")
        .iter()
        .map(|t| t["nomor_surat"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(order, ["B", "A", "C"]);
    assert_eq!(body["tor_list"][0]["user_list"]["name"], json!(admin.name));
    assert!(body["tor_list"][0]["user_list"].get("password").is_none());
    Ok(())
}

#[actix_web::test]
async fn submit_requires_every_field() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (_, admin) = seed_admin(state.db().unwrap()).await?;
    let app = create_test_app(state).build().await?;

    let mut body = submission("001", "2025-02-01");
    body["pic"] = json!("");
    let req = test::TestRequest::post()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(body)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("All fields are required"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn replace_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (role, admin) = seed_admin(state.db().unwrap()).await?;
    let other = seed_user(state.db().unwrap(), "Rina", role.id_roles).await?;
    let app = create_test_app(state).build().await?;

    let req = test::TestRequest::post()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(submission("001", "2025-02-01"))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let id = body["tor"]["id"].as_i64().expect("tor id");

    let mut update = submission("001-rev", "2025-02-03");
    update["id"] = json!(id);
    update["pengaju_id"] = json!(other.id);
    update["user_id"] = json!(other.id);
    let req = test::TestRequest::put()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(update)
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "TOR updated successfully");
    assert_eq!(body["tor"]["nomor_surat"], "001-rev");
    assert_eq!(body["tor"]["pengaju_id"], json!(other.id));

    // Owner ids are part of a full replacement
    let mut partial = submission("001-rev2", "2025-02-03");
    partial["id"] = json!(id);
    let req = test::TestRequest::put()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(partial)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("All fields are required"),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": id}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["message"], "TOR deleted successfully");

    let req = test::TestRequest::delete()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(json!({"id": id}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "TOR_NOT_FOUND",
        Some("TOR not found"),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/pengajuan/tor")
        .insert_header(bearer_for(&admin))
        .set_json(json!({}))
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "MISSING_FIELDS",
        Some("TOR ID is required"),
    )
    .await;
    Ok(())
}
