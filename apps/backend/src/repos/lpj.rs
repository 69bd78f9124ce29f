use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::entities::lpj;
use crate::errors::domain::{DomainError, NotFoundKind};

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLpj {
    pub nama_kegiatan: String,
    pub tujuan: String,
    pub latar_belakang: String,
    pub peserta_mahasiswa: i32,
    pub peserta_dosen: Option<i32>,
    pub peserta_alumni: Option<i32>,
    pub jadwal_awal: Date,
    pub jadwal_akhir: Date,
    pub estimasi_jadwal: String,
    pub dana_diajukan: i64,
    pub dana_terpakai: Option<i64>,
    pub pic: String,
    pub upload_file: String,
    pub admin_id: i32,
    pub admin_name: String,
    pub status: Option<String>,
    pub catatan_pengajuan: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LpjChanges {
    pub nama_kegiatan: Option<String>,
    pub tujuan: Option<String>,
    pub latar_belakang: Option<String>,
    pub peserta_mahasiswa: Option<i32>,
    pub peserta_dosen: Option<i32>,
    pub peserta_alumni: Option<i32>,
    pub jadwal_awal: Option<Date>,
    pub jadwal_akhir: Option<Date>,
    pub estimasi_jadwal: Option<String>,
    pub dana_diajukan: Option<i64>,
    pub dana_terpakai: Option<i64>,
    pub pic: Option<String>,
    pub upload_file: Option<String>,
    pub admin_id: Option<i32>,
    pub admin_name: Option<String>,
    pub status: Option<String>,
    pub catatan_pengajuan: Option<String>,
}

fn lpj_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Lpj, "LPJ not found")
}

fn admin_missing(e: sea_orm::DbErr) -> DomainError {
    DomainError::from(e).with_fk_detail("Admin ID not found")
}

/// All reports, newest `jadwal_awal` first.
pub async fn list_lpj<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<lpj::Model>, DomainError> {
    Ok(lpj::Entity::find()
        .order_by_desc(lpj::Column::JadwalAwal)
        .order_by_desc(lpj::Column::Id)
        .all(conn)
        .await?)
}

pub async fn create_lpj<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewLpj,
) -> Result<lpj::Model, DomainError> {
    let status = new
        .status
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());

    let created = lpj::ActiveModel {
        id: NotSet,
        nama_kegiatan: Set(new.nama_kegiatan),
        tujuan: Set(new.tujuan),
        latar_belakang: Set(new.latar_belakang),
        peserta_mahasiswa: Set(new.peserta_mahasiswa),
        peserta_dosen: Set(new.peserta_dosen),
        peserta_alumni: Set(new.peserta_alumni),
        jadwal_awal: Set(new.jadwal_awal),
        jadwal_akhir: Set(new.jadwal_akhir),
        estimasi_jadwal: Set(new.estimasi_jadwal),
        dana_diajukan: Set(new.dana_diajukan),
        dana_terpakai: Set(new.dana_terpakai),
        pic: Set(new.pic),
        upload_file: Set(new.upload_file),
        admin_id: Set(new.admin_id),
        admin_name: Set(new.admin_name),
        status: Set(status),
        catatan_pengajuan: Set(new.catatan_pengajuan),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
    .map_err(admin_missing)?;

    info!(lpj_id = created.id, admin_id = created.admin_id, "LPJ submitted");
    Ok(created)
}

pub async fn update_lpj<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: LpjChanges,
) -> Result<lpj::Model, DomainError> {
    let existing = lpj::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(lpj_not_found)?;

    let mut active: lpj::ActiveModel = existing.clone().into();
    macro_rules! set_some {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = changes.$field { active.$field = Set(v); })*
        };
    }
    macro_rules! set_nullable {
        ($($field:ident),* $(,)?) => {
            $(if let Some(v) = changes.$field { active.$field = Set(Some(v)); })*
        };
    }
    set_some!(
        nama_kegiatan,
        tujuan,
        latar_belakang,
        peserta_mahasiswa,
        jadwal_awal,
        jadwal_akhir,
        estimasi_jadwal,
        dana_diajukan,
        pic,
        upload_file,
        admin_id,
        admin_name,
        status,
    );
    set_nullable!(peserta_dosen, peserta_alumni, dana_terpakai, catatan_pengajuan);

    if !active.is_changed() {
        return Ok(existing);
    }
    active.update(conn).await.map_err(admin_missing)
}

pub async fn delete_lpj<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = lpj::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(lpj_not_found());
    }
    Ok(())
}
