use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::Date;

use super::{non_empty, non_zero};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::transactions::{self as transactions_repo, NewTransaction, TransactionChanges};
use crate::state::app_state::AppState;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TransactionBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub anggaran_id: Option<i32>,
    #[serde(default)]
    pub jenis_transaksi: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub jumlah: Option<i64>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub tanggal: Option<Date>,
}

async fn list_transactions(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let data = transactions_repo::list_transactions(db).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

async fn create_transaction(
    body: ValidatedJson<TransactionBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(anggaran_id), Some(jenis_transaksi), Some(jumlah), Some(tanggal)) = (
        non_zero(body.anggaran_id),
        non_empty(body.jenis_transaksi),
        non_zero(body.jumlah),
        body.tanggal,
    ) else {
        return Err(AppError::missing_fields(
            "Field anggaran_id, jenis_transaksi, jumlah, tanggal wajib diisi.",
        ));
    };

    let db = require_db(&app_state)?;
    let data = transactions_repo::create_transaction(
        db,
        NewTransaction {
            anggaran_id,
            jenis_transaksi,
            jumlah,
            keterangan: non_empty(body.keterangan),
            tanggal,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Transaksi berhasil dibuat",
        "data": data,
    })))
}

async fn get_transaction(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let data = transactions_repo::get_transaction(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

/// Partial update; fields left out of the body keep their values.
async fn update_transaction(
    path: web::Path<i32>,
    body: ValidatedJson<TransactionBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let changes = TransactionChanges {
        anggaran_id: non_zero(body.anggaran_id),
        jenis_transaksi: non_empty(body.jenis_transaksi),
        jumlah: body.jumlah,
        keterangan: body.keterangan,
        tanggal: body.tanggal,
    };

    let db = require_db(&app_state)?;
    let data = transactions_repo::update_transaction(db, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Berhasil update transaksi",
        "data": data,
    })))
}

async fn delete_transaction(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    transactions_repo::delete_transaction(db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Transaksi berhasil dihapus" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/transaksi")
            .route(web::get().to(list_transactions))
            .route(web::post().to(create_transaction)),
    )
    .service(
        web::resource("/transaksi/{id}")
            .route(web::get().to(get_transaction))
            .route(web::put().to(update_transaction))
            .route(web::delete().to(delete_transaction)),
    );
}
