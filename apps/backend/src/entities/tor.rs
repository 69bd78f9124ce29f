use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Terms of reference: a funding request submitted before an activity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tor_database_tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nomor_surat: String,
    pub nama_kegiatan: String,
    pub tujuan: String,
    pub latar_belakang: String,
    pub tanggal_pengajuan: Date,
    /// Whole rupiah
    pub nominal_pengajuan: i64,
    pub peserta: String,
    pub jadwal_awal: Date,
    pub jadwal_akhir: Date,
    pub anggaran: String,
    pub pic: String,
    pub upload_file: String,
    pub pengaju_id: i32,
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
