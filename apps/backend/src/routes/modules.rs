use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{non_empty, non_zero};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::modules as modules_repo;
use crate::state::app_state::AppState;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ModuleBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub module_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

async fn list_modules(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let modules = modules_repo::list_modules(db).await?;
    Ok(HttpResponse::Ok().json(json!({ "modules": modules })))
}

async fn create_module(
    body: ValidatedJson<ModuleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let name = non_empty(body.module_name)
        .ok_or_else(|| AppError::missing_fields("Module name is required"))?;

    let db = require_db(&app_state)?;
    let module =
        modules_repo::create_module(db, name, Some(body.description.unwrap_or_default())).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Module added successfully",
        "module": module,
    })))
}

async fn delete_module(
    body: ValidatedJson<ModuleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id)
        .ok_or_else(|| AppError::missing_fields("Module ID is required"))?;

    let db = require_db(&app_state)?;
    modules_repo::delete_module(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Module deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/module")
            .route(web::get().to(list_modules))
            .route(web::post().to(create_module))
            .route(web::delete().to(delete_module)),
    );
}
