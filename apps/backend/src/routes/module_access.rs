use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::non_zero;
use crate::entities::module_access;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::module_access::{self as access_repo, AccessChanges, AccessEntry, AccessFlags};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RoleRef {
    id_roles: i32,
    name_roles: String,
}

#[derive(Debug, Serialize)]
struct ModuleRef {
    id: i32,
    module_name: String,
}

/// Access row with the role and module names it refers to.
#[derive(Debug, Serialize)]
struct AccessView {
    #[serde(flatten)]
    access: module_access::Model,
    roles_table: Option<RoleRef>,
    modules: Option<ModuleRef>,
}

impl From<AccessEntry> for AccessView {
    fn from(entry: AccessEntry) -> Self {
        Self {
            access: entry.access,
            roles_table: entry.role.map(|r| RoleRef {
                id_roles: r.id_roles,
                name_roles: r.name_roles,
            }),
            modules: entry.module.map(|m| ModuleRef {
                id: m.id,
                module_name: m.module_name,
            }),
        }
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct AccessBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub role_id: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub module_id: Option<i32>,
    #[serde(default)]
    pub can_view: Option<bool>,
    #[serde(default)]
    pub can_create: Option<bool>,
    #[serde(default)]
    pub can_edit: Option<bool>,
    #[serde(default)]
    pub can_delete: Option<bool>,
}

fn id_required() -> AppError {
    AppError::missing_fields("id is required")
}

async fn list_access(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let access: Vec<AccessView> = access_repo::list_access(db)
        .await?
        .into_iter()
        .map(AccessView::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({ "access": access })))
}

/// Grant a role access to a module; unspecified flags default to `false`.
async fn create_access(
    body: ValidatedJson<AccessBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(role_id), Some(module_id)) = (non_zero(body.role_id), non_zero(body.module_id))
    else {
        return Err(AppError::missing_fields(
            "role_id and module_id are required",
        ));
    };

    let flags = AccessFlags {
        can_view: body.can_view.unwrap_or(false),
        can_create: body.can_create.unwrap_or(false),
        can_edit: body.can_edit.unwrap_or(false),
        can_delete: body.can_delete.unwrap_or(false),
    };

    let db = require_db(&app_state)?;
    let access = access_repo::create_access(db, role_id, module_id, flags).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Access module created successfully",
        "access": access,
    })))
}

async fn update_access(
    body: ValidatedJson<AccessBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = non_zero(body.id).ok_or_else(id_required)?;

    let changes = AccessChanges {
        can_view: body.can_view,
        can_create: body.can_create,
        can_edit: body.can_edit,
        can_delete: body.can_delete,
    };

    let db = require_db(&app_state)?;
    let access = access_repo::update_access(db, id, changes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Access module updated successfully",
        "access": access,
    })))
}

async fn delete_access(
    body: ValidatedJson<AccessBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id).ok_or_else(id_required)?;

    let db = require_db(&app_state)?;
    access_repo::delete_access(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Access module deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/module_access")
            .route(web::get().to(list_access))
            .route(web::post().to(create_access))
            .route(web::patch().to(update_access))
            .route(web::delete().to(delete_access)),
    );
}
