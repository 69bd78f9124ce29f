use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Accountability report filed after an activity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lpj_database_tables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
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
    pub status: String,
    pub catatan_pengajuan: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AdminId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Admin,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
