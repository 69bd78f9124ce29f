use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::infra::db::require_db;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    migrations: String,
    time: String,
}

/// Liveness plus a cheap database probe. Always 200 while the process can
/// answer; `db` reports whether the database did too.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, migrations) = match require_db(&app_state) {
        Ok(conn) => {
            let probe = Statement::from_string(conn.get_database_backend(), "SELECT 1".to_string());
            match conn.query_one(probe).await {
                Ok(_) => {
                    let version = match get_latest_migration_version(conn).await {
                        Ok(Some(version)) => version,
                        Ok(None) => "no_migrations".to_string(),
                        Err(_) => "unknown".to_string(),
                    };
                    ("ok", version)
                }
                Err(_) => ("error", "unknown".to_string()),
            }
        }
        Err(_) => ("unavailable", "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
