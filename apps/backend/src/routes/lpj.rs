use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::Date;

use super::{non_empty, non_zero};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::lpj::{self as lpj_repo, LpjChanges, NewLpj};
use crate::state::app_state::AppState;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct LpjBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub nama_kegiatan: Option<String>,
    #[serde(default)]
    pub tujuan: Option<String>,
    #[serde(default)]
    pub latar_belakang: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub peserta_mahasiswa: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub peserta_dosen: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub peserta_alumni: Option<i32>,
    #[serde(default)]
    pub jadwal_awal: Option<Date>,
    #[serde(default)]
    pub jadwal_akhir: Option<Date>,
    #[serde(default)]
    pub estimasi_jadwal: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub dana_diajukan: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub dana_terpakai: Option<i64>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub upload_file: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub admin_id: Option<i32>,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub catatan_pengajuan: Option<String>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::missing_fields(format!("{field} is required")))
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    required(non_empty(value), field)
}

impl TryFrom<LpjBody> for NewLpj {
    type Error = AppError;

    /// Checks required fields in submission order and reports the first
    /// one missing. Zero is an accepted count or amount.
    fn try_from(body: LpjBody) -> Result<Self, Self::Error> {
        Ok(NewLpj {
            nama_kegiatan: required_text(body.nama_kegiatan, "nama_kegiatan")?,
            tujuan: required_text(body.tujuan, "tujuan")?,
            latar_belakang: required_text(body.latar_belakang, "latar_belakang")?,
            peserta_mahasiswa: required(body.peserta_mahasiswa, "peserta_mahasiswa")?,
            jadwal_awal: required(body.jadwal_awal, "jadwal_awal")?,
            jadwal_akhir: required(body.jadwal_akhir, "jadwal_akhir")?,
            estimasi_jadwal: required_text(body.estimasi_jadwal, "estimasi_jadwal")?,
            dana_diajukan: required(body.dana_diajukan, "dana_diajukan")?,
            pic: required_text(body.pic, "pic")?,
            upload_file: required_text(body.upload_file, "upload_file")?,
            admin_id: required(body.admin_id, "admin_id")?,
            admin_name: required_text(body.admin_name, "admin_name")?,
            peserta_dosen: non_zero(body.peserta_dosen),
            peserta_alumni: non_zero(body.peserta_alumni),
            dana_terpakai: non_zero(body.dana_terpakai),
            status: non_empty(body.status),
            catatan_pengajuan: non_empty(body.catatan_pengajuan),
        })
    }
}

impl From<LpjBody> for LpjChanges {
    fn from(body: LpjBody) -> Self {
        LpjChanges {
            nama_kegiatan: non_empty(body.nama_kegiatan),
            tujuan: non_empty(body.tujuan),
            latar_belakang: non_empty(body.latar_belakang),
            peserta_mahasiswa: body.peserta_mahasiswa,
            peserta_dosen: body.peserta_dosen,
            peserta_alumni: body.peserta_alumni,
            jadwal_awal: body.jadwal_awal,
            jadwal_akhir: body.jadwal_akhir,
            estimasi_jadwal: non_empty(body.estimasi_jadwal),
            dana_diajukan: body.dana_diajukan,
            dana_terpakai: body.dana_terpakai,
            pic: non_empty(body.pic),
            upload_file: non_empty(body.upload_file),
            admin_id: non_zero(body.admin_id),
            admin_name: non_empty(body.admin_name),
            status: non_empty(body.status),
            catatan_pengajuan: body.catatan_pengajuan,
        }
    }
}

fn lpj_id_required() -> AppError {
    AppError::missing_fields("LPJ ID is required")
}

async fn list_lpj(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let lpj_list = lpj_repo::list_lpj(db).await?;
    Ok(HttpResponse::Ok().json(json!({ "lpj_list": lpj_list })))
}

async fn create_lpj(
    body: ValidatedJson<LpjBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new = NewLpj::try_from(body.into_inner())?;

    let db = require_db(&app_state)?;
    let lpj = lpj_repo::create_lpj(db, new).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "LPJ submitted successfully",
        "lpj": lpj,
    })))
}

async fn update_lpj(
    body: ValidatedJson<LpjBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = non_zero(body.id).ok_or_else(lpj_id_required)?;

    let db = require_db(&app_state)?;
    let lpj = lpj_repo::update_lpj(db, id, LpjChanges::from(body)).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "LPJ updated successfully",
        "lpj": lpj,
    })))
}

async fn delete_lpj(
    body: ValidatedJson<LpjBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id).ok_or_else(lpj_id_required)?;

    let db = require_db(&app_state)?;
    lpj_repo::delete_lpj(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "LPJ deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/pengajuan/lpj")
            .route(web::get().to(list_lpj))
            .route(web::post().to(create_lpj))
            .route(web::put().to(update_lpj))
            .route(web::delete().to(delete_lpj)),
    );
}
