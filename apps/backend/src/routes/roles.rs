use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{non_empty, non_zero};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::roles::{self as roles_repo, RoleChanges};
use crate::state::app_state::AppState;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RoleBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id_roles: Option<i32>,
    #[serde(default)]
    pub name_roles: Option<String>,
    #[serde(default)]
    pub keterangan: Option<String>,
}

async fn list_roles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let roles = roles_repo::list_roles(db).await?;
    Ok(HttpResponse::Ok().json(json!({ "roles": roles })))
}

async fn create_role(
    body: ValidatedJson<RoleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let name = non_empty(body.name_roles)
        .ok_or_else(|| AppError::missing_fields("Role name is required"))?;

    let db = require_db(&app_state)?;
    let role = roles_repo::create_role(db, name, Some(body.keterangan.unwrap_or_default())).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Role added successfully",
        "role": role,
    })))
}

async fn delete_role_by_body(
    body: ValidatedJson<RoleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id_roles)
        .ok_or_else(|| AppError::missing_fields("Role ID is required"))?;

    let db = require_db(&app_state)?;
    roles_repo::delete_role(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Role deleted successfully" })))
}

async fn get_role(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let role = roles_repo::find_role(db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::RoleNotFound, "Role not found"))?;

    Ok(HttpResponse::Ok().json(json!({ "role": role })))
}

async fn put_role(
    path: web::Path<i32>,
    body: ValidatedJson<RoleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(name_roles), Some(keterangan)) =
        (non_empty(body.name_roles), non_empty(body.keterangan))
    else {
        return Err(AppError::missing_fields(
            "name_roles and keterangan are required",
        ));
    };

    let db = require_db(&app_state)?;
    let role = roles_repo::update_role(
        db,
        path.into_inner(),
        RoleChanges {
            name_roles: Some(name_roles),
            keterangan: Some(keterangan),
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Role updated successfully",
        "role": role,
    })))
}

async fn patch_role(
    path: web::Path<i32>,
    body: ValidatedJson<RoleBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let changes = RoleChanges {
        name_roles: non_empty(body.name_roles),
        keterangan: non_empty(body.keterangan),
    };
    if changes.name_roles.is_none() && changes.keterangan.is_none() {
        return Err(AppError::missing_fields(
            "At least one field to update is required",
        ));
    }

    let db = require_db(&app_state)?;
    let role = roles_repo::update_role(db, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Role updated successfully",
        "role": role,
    })))
}

async fn delete_role(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    roles_repo::delete_role(db, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Role deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/roles")
            .route(web::get().to(list_roles))
            .route(web::post().to(create_role))
            .route(web::delete().to(delete_role_by_body)),
    )
    .service(
        web::resource("/roles/{id}")
            .route(web::get().to(get_role))
            .route(web::put().to(put_role))
            .route(web::patch().to(patch_role))
            .route(web::delete().to(delete_role)),
    );
}
