use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::entities::{tor, users};
use crate::errors::domain::{DomainError, NotFoundKind};

/// The twelve submitter-supplied TOR fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorFields {
    pub nomor_surat: String,
    pub nama_kegiatan: String,
    pub tujuan: String,
    pub latar_belakang: String,
    pub tanggal_pengajuan: Date,
    pub nominal_pengajuan: i64,
    pub peserta: String,
    pub jadwal_awal: Date,
    pub jadwal_akhir: Date,
    pub anggaran: String,
    pub pic: String,
    pub upload_file: String,
}

fn tor_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Tor, "TOR not found")
}

fn apply_fields(active: &mut tor::ActiveModel, fields: TorFields) {
    active.nomor_surat = Set(fields.nomor_surat);
    active.nama_kegiatan = Set(fields.nama_kegiatan);
    active.tujuan = Set(fields.tujuan);
    active.latar_belakang = Set(fields.latar_belakang);
    active.tanggal_pengajuan = Set(fields.tanggal_pengajuan);
    active.nominal_pengajuan = Set(fields.nominal_pengajuan);
    active.peserta = Set(fields.peserta);
    active.jadwal_awal = Set(fields.jadwal_awal);
    active.jadwal_akhir = Set(fields.jadwal_akhir);
    active.anggaran = Set(fields.anggaran);
    active.pic = Set(fields.pic);
    active.upload_file = Set(fields.upload_file);
}

/// All submissions with their owner, newest `tanggal_pengajuan` first.
pub async fn list_tor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(tor::Model, Option<users::Model>)>, DomainError> {
    Ok(tor::Entity::find()
        .find_also_related(users::Entity)
        .order_by_desc(tor::Column::TanggalPengajuan)
        .order_by_desc(tor::Column::Id)
        .all(conn)
        .await?)
}

pub async fn create_tor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    fields: TorFields,
    submitter_id: i32,
) -> Result<tor::Model, DomainError> {
    let mut active = tor::ActiveModel {
        id: NotSet,
        pengaju_id: Set(submitter_id),
        user_id: Set(submitter_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    apply_fields(&mut active, fields);

    let created = active
        .insert(conn)
        .await
        .map_err(|e| DomainError::from(e).with_fk_detail("User not found"))?;

    info!(tor_id = created.id, user_id = submitter_id, "TOR submitted");
    Ok(created)
}

/// Replace every field of an existing submission.
pub async fn replace_tor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    fields: TorFields,
    pengaju_id: i32,
    user_id: i32,
) -> Result<tor::Model, DomainError> {
    let existing = tor::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(tor_not_found)?;

    let mut active: tor::ActiveModel = existing.into();
    apply_fields(&mut active, fields);
    active.pengaju_id = Set(pengaju_id);
    active.user_id = Set(user_id);

    active
        .update(conn)
        .await
        .map_err(|e| DomainError::from(e).with_fk_detail("User not found"))
}

pub async fn delete_tor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = tor::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(tor_not_found());
    }
    Ok(())
}
