pub use sea_orm_migration::prelude::*;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_init;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run `command` against an open connection.
///
/// Shared by the migration CLI, backend startup and tests; works on both
/// PostgreSQL and SQLite.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = format!("{:?}", db.get_database_backend());
    let defined = Migrator::migrations().len();
    let applied_before = count_applied_migrations(db).await?;
    tracing::debug!(?command, %backend, defined, applied = applied_before, "Running migrations");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            let applied = count_applied_migrations(db).await?;
            tracing::info!(?command, %backend, defined, applied, "Migrations finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(?command, %backend, error = %e, "Migrations failed");
            Err(e)
        }
    }
}

/// Number of applied migrations; 0 before the tracking table exists.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the newest applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
