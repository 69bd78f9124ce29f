use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(DeriveIden)]
enum RolesTable {
    Table,
    IdRoles,
    NameRoles,
    Keterangan,
}

#[derive(DeriveIden)]
enum UserList {
    Table,
    Id,
    Name,
    Email,
    Nim,
    Password,
    RolesId,
    ProgramStudi,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Module {
    Table,
    Id,
    ModuleName,
    Description,
}

#[derive(DeriveIden)]
enum AccessModule {
    Table,
    Id,
    RoleId,
    ModuleId,
    CanView,
    CanCreate,
    CanEdit,
    CanDelete,
}

#[derive(DeriveIden)]
enum TorDatabaseTables {
    Table,
    Id,
    NomorSurat,
    NamaKegiatan,
    Tujuan,
    LatarBelakang,
    TanggalPengajuan,
    NominalPengajuan,
    Peserta,
    JadwalAwal,
    JadwalAkhir,
    Anggaran,
    Pic,
    UploadFile,
    PengajuId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LpjDatabaseTables {
    Table,
    Id,
    NamaKegiatan,
    Tujuan,
    LatarBelakang,
    PesertaMahasiswa,
    PesertaDosen,
    PesertaAlumni,
    JadwalAwal,
    JadwalAkhir,
    EstimasiJadwal,
    DanaDiajukan,
    DanaTerpakai,
    Pic,
    UploadFile,
    AdminId,
    AdminName,
    Status,
    CatatanPengajuan,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Transaksi {
    Table,
    Id,
    AnggaranId,
    JenisTransaksi,
    Jumlah,
    Keterangan,
    Tanggal,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PushSubscriptions {
    Table,
    Id,
    UserId,
    Endpoint,
    #[sea_orm(iden = "p256dh_key")]
    P256dhKey,
    AuthKey,
    Subscription,
    UserAgent,
    CreatedAt,
    UpdatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // roles_table
        manager
            .create_table(
                Table::create()
                    .table(RolesTable::Table)
                    .if_not_exists()
                    .col(pk(RolesTable::IdRoles))
                    .col(
                        ColumnDef::new(RolesTable::NameRoles)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RolesTable::Keterangan).string().null())
                    .to_owned(),
            )
            .await?;

        // user_list
        manager
            .create_table(
                Table::create()
                    .table(UserList::Table)
                    .if_not_exists()
                    .col(pk(UserList::Id))
                    .col(ColumnDef::new(UserList::Name).string().not_null())
                    .col(
                        ColumnDef::new(UserList::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserList::Nim)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserList::Password).string().not_null())
                    .col(ColumnDef::new(UserList::RolesId).integer().not_null())
                    .col(ColumnDef::new(UserList::ProgramStudi).string().not_null())
                    .col(ColumnDef::new(UserList::Description).text().null())
                    .col(timestamp(UserList::CreatedAt))
                    .col(timestamp(UserList::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_list_roles_id")
                            .from(UserList::Table, UserList::RolesId)
                            .to(RolesTable::Table, RolesTable::IdRoles)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_user_list_roles_id")
                    .table(UserList::Table)
                    .col(UserList::RolesId)
                    .to_owned(),
            )
            .await?;

        // module
        manager
            .create_table(
                Table::create()
                    .table(Module::Table)
                    .if_not_exists()
                    .col(pk(Module::Id))
                    .col(ColumnDef::new(Module::ModuleName).string().not_null())
                    .col(ColumnDef::new(Module::Description).string().null())
                    .to_owned(),
            )
            .await?;

        // access_module
        manager
            .create_table(
                Table::create()
                    .table(AccessModule::Table)
                    .if_not_exists()
                    .col(pk(AccessModule::Id))
                    .col(ColumnDef::new(AccessModule::RoleId).integer().not_null())
                    .col(ColumnDef::new(AccessModule::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(AccessModule::CanView)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AccessModule::CanCreate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AccessModule::CanEdit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AccessModule::CanDelete)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_access_module_role_id")
                            .from(AccessModule::Table, AccessModule::RoleId)
                            .to(RolesTable::Table, RolesTable::IdRoles)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_access_module_module_id")
                            .from(AccessModule::Table, AccessModule::ModuleId)
                            .to(Module::Table, Module::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // tor_database_tables
        manager
            .create_table(
                Table::create()
                    .table(TorDatabaseTables::Table)
                    .if_not_exists()
                    .col(pk(TorDatabaseTables::Id))
                    .col(ColumnDef::new(TorDatabaseTables::NomorSurat).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::NamaKegiatan).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::Tujuan).text().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::LatarBelakang).text().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::TanggalPengajuan).date().not_null())
                    .col(
                        ColumnDef::new(TorDatabaseTables::NominalPengajuan)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TorDatabaseTables::Peserta).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::JadwalAwal).date().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::JadwalAkhir).date().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::Anggaran).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::Pic).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::UploadFile).string().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::PengajuId).integer().not_null())
                    .col(ColumnDef::new(TorDatabaseTables::UserId).integer().not_null())
                    .col(timestamp(TorDatabaseTables::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tor_pengaju_id")
                            .from(TorDatabaseTables::Table, TorDatabaseTables::PengajuId)
                            .to(UserList::Table, UserList::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tor_user_id")
                            .from(TorDatabaseTables::Table, TorDatabaseTables::UserId)
                            .to(UserList::Table, UserList::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // lpj_database_tables
        manager
            .create_table(
                Table::create()
                    .table(LpjDatabaseTables::Table)
                    .if_not_exists()
                    .col(pk(LpjDatabaseTables::Id))
                    .col(ColumnDef::new(LpjDatabaseTables::NamaKegiatan).string().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::Tujuan).text().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::LatarBelakang).text().not_null())
                    .col(
                        ColumnDef::new(LpjDatabaseTables::PesertaMahasiswa)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LpjDatabaseTables::PesertaDosen).integer().null())
                    .col(ColumnDef::new(LpjDatabaseTables::PesertaAlumni).integer().null())
                    .col(ColumnDef::new(LpjDatabaseTables::JadwalAwal).date().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::JadwalAkhir).date().not_null())
                    .col(
                        ColumnDef::new(LpjDatabaseTables::EstimasiJadwal)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LpjDatabaseTables::DanaDiajukan)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LpjDatabaseTables::DanaTerpakai).big_integer().null())
                    .col(ColumnDef::new(LpjDatabaseTables::Pic).string().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::UploadFile).string().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::AdminId).integer().not_null())
                    .col(ColumnDef::new(LpjDatabaseTables::AdminName).string().not_null())
                    .col(
                        ColumnDef::new(LpjDatabaseTables::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LpjDatabaseTables::CatatanPengajuan).text().null())
                    .col(timestamp(LpjDatabaseTables::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lpj_admin_id")
                            .from(LpjDatabaseTables::Table, LpjDatabaseTables::AdminId)
                            .to(UserList::Table, UserList::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // transaksi
        manager
            .create_table(
                Table::create()
                    .table(Transaksi::Table)
                    .if_not_exists()
                    .col(pk(Transaksi::Id))
                    .col(ColumnDef::new(Transaksi::AnggaranId).integer().not_null())
                    .col(ColumnDef::new(Transaksi::JenisTransaksi).string().not_null())
                    .col(ColumnDef::new(Transaksi::Jumlah).big_integer().not_null())
                    .col(ColumnDef::new(Transaksi::Keterangan).text().null())
                    .col(ColumnDef::new(Transaksi::Tanggal).date().not_null())
                    .col(timestamp(Transaksi::CreatedAt))
                    .col(timestamp(Transaksi::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // push_subscriptions
        manager
            .create_table(
                Table::create()
                    .table(PushSubscriptions::Table)
                    .if_not_exists()
                    .col(pk(PushSubscriptions::Id))
                    .col(ColumnDef::new(PushSubscriptions::UserId).integer().not_null())
                    .col(ColumnDef::new(PushSubscriptions::Endpoint).text().not_null())
                    .col(ColumnDef::new(PushSubscriptions::P256dhKey).string().null())
                    .col(ColumnDef::new(PushSubscriptions::AuthKey).string().null())
                    .col(
                        ColumnDef::new(PushSubscriptions::Subscription)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PushSubscriptions::UserAgent).text().null())
                    .col(timestamp(PushSubscriptions::CreatedAt))
                    .col(timestamp(PushSubscriptions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_push_subscriptions_user_id")
                            .from(PushSubscriptions::Table, PushSubscriptions::UserId)
                            .to(UserList::Table, UserList::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_push_subscriptions_user_endpoint")
                    .table(PushSubscriptions::Table)
                    .col(PushSubscriptions::UserId)
                    .col(PushSubscriptions::Endpoint)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_push_subscriptions_user_endpoint")
                    .table(PushSubscriptions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(PushSubscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transaksi::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LpjDatabaseTables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TorDatabaseTables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccessModule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Module::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_user_list_roles_id")
                    .table(UserList::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(UserList::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RolesTable::Table).to_owned())
            .await?;

        Ok(())
    }
}
