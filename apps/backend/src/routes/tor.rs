use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use time::Date;

use super::{non_empty, non_zero};
use crate::entities::{tor, users};
use crate::error::AppError;
use crate::extractors::{AuthClaims, ValidatedJson};
use crate::infra::db::require_db;
use crate::repos::tor::{self as tor_repo, TorFields};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct Submitter {
    id: i32,
    name: String,
    roles_id: i32,
}

#[derive(Debug, Serialize)]
struct TorView {
    #[serde(flatten)]
    tor: tor::Model,
    user_list: Option<Submitter>,
}

impl From<(tor::Model, Option<users::Model>)> for TorView {
    fn from((tor, user): (tor::Model, Option<users::Model>)) -> Self {
        Self {
            tor,
            user_list: user.map(|u| Submitter {
                id: u.id,
                name: u.name,
                roles_id: u.roles_id,
            }),
        }
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TorBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub nomor_surat: Option<String>,
    #[serde(default)]
    pub nama_kegiatan: Option<String>,
    #[serde(default)]
    pub tujuan: Option<String>,
    #[serde(default)]
    pub latar_belakang: Option<String>,
    #[serde(default)]
    pub tanggal_pengajuan: Option<Date>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub nominal_pengajuan: Option<i64>,
    #[serde(default)]
    pub peserta: Option<String>,
    #[serde(default)]
    pub jadwal_awal: Option<Date>,
    #[serde(default)]
    pub jadwal_akhir: Option<Date>,
    #[serde(default)]
    pub anggaran: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub upload_file: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub pengaju_id: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub user_id: Option<i32>,
}

impl TorBody {
    /// All twelve submission fields, or `None` if any is missing or empty.
    fn fields(&mut self) -> Option<TorFields> {
        Some(TorFields {
            nomor_surat: non_empty(self.nomor_surat.take())?,
            nama_kegiatan: non_empty(self.nama_kegiatan.take())?,
            tujuan: non_empty(self.tujuan.take())?,
            latar_belakang: non_empty(self.latar_belakang.take())?,
            tanggal_pengajuan: self.tanggal_pengajuan?,
            nominal_pengajuan: non_zero(self.nominal_pengajuan)?,
            peserta: non_empty(self.peserta.take())?,
            jadwal_awal: self.jadwal_awal?,
            jadwal_akhir: self.jadwal_akhir?,
            anggaran: non_empty(self.anggaran.take())?,
            pic: non_empty(self.pic.take())?,
            upload_file: non_empty(self.upload_file.take())?,
        })
    }
}

fn all_fields_required() -> AppError {
    AppError::missing_fields("All fields are required")
}

fn tor_id_required() -> AppError {
    AppError::missing_fields("TOR ID is required")
}

async fn list_tor(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let tor_list: Vec<TorView> = tor_repo::list_tor(db)
        .await?
        .into_iter()
        .map(TorView::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({ "tor_list": tor_list })))
}

/// File a new TOR owned by the caller.
async fn create_tor(
    claims: AuthClaims,
    body: ValidatedJson<TorBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let fields = body.into_inner().fields().ok_or_else(all_fields_required)?;
    let submitter_id = claims.user_id()?;

    let db = require_db(&app_state)?;
    let tor = tor_repo::create_tor(db, fields, submitter_id).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "TOR submitted successfully",
        "tor": tor,
    })))
}

async fn replace_tor(
    body: ValidatedJson<TorBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let mut body = body.into_inner();
    let id = non_zero(body.id).ok_or_else(tor_id_required)?;
    let (Some(fields), Some(pengaju_id), Some(user_id)) = (
        body.fields(),
        non_zero(body.pengaju_id),
        non_zero(body.user_id),
    ) else {
        return Err(all_fields_required());
    };

    let db = require_db(&app_state)?;
    let tor = tor_repo::replace_tor(db, id, fields, pengaju_id, user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "TOR updated successfully",
        "tor": tor,
    })))
}

async fn delete_tor(
    body: ValidatedJson<TorBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id).ok_or_else(tor_id_required)?;

    let db = require_db(&app_state)?;
    tor_repo::delete_tor(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "TOR deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/pengajuan/tor")
            .route(web::get().to(list_tor))
            .route(web::post().to(create_tor))
            .route(web::put().to(replace_tor))
            .route(web::delete().to(delete_tor)),
    );
}
