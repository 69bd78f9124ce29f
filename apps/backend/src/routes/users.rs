use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{non_empty, non_zero};
use crate::entities::{roles, users};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::users::{self as users_repo, UserChanges};
use crate::state::app_state::AppState;

/// A user row with its role embedded under `roles_table`.
#[derive(Debug, Serialize)]
pub struct UserWithRole {
    #[serde(flatten)]
    pub user: users::Model,
    pub roles_table: Option<roles::Model>,
}

impl From<(users::Model, Option<roles::Model>)> for UserWithRole {
    fn from((user, role): (users::Model, Option<roles::Model>)) -> Self {
        Self {
            user,
            roles_table: role,
        }
    }
}

/// Body of the collection-level PATCH and DELETE, which carry the id.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UserByIdBody {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub id: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub roles_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub roles_id: Option<i32>,
    /// Absent leaves the description alone; `null` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

fn user_id_required() -> AppError {
    AppError::missing_fields("User ID is required")
}

fn user_not_found() -> AppError {
    AppError::not_found(ErrorCode::UserNotFound, "User not found")
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let users: Vec<UserWithRole> = users_repo::list_users_with_roles(db)
        .await?
        .into_iter()
        .map(UserWithRole::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

async fn patch_user_by_body(
    body: ValidatedJson<UserByIdBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = non_zero(body.id).ok_or_else(user_id_required)?;

    let changes = UserChanges {
        name: None,
        roles_id: non_zero(body.roles_id),
        description: non_empty(body.description).map(Some),
    };

    let db = require_db(&app_state)?;
    users_repo::update_user(db, id, changes).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User updated successfully" })))
}

async fn delete_user_by_body(
    body: ValidatedJson<UserByIdBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = non_zero(body.into_inner().id).ok_or_else(user_id_required)?;

    let db = require_db(&app_state)?;
    users_repo::delete_user(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}

async fn get_user(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = users_repo::find_user_with_role(db, path.into_inner())
        .await?
        .map(UserWithRole::from)
        .ok_or_else(user_not_found)?;

    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Replace name, role and description.
async fn put_user(
    path: web::Path<i32>,
    body: ValidatedJson<UserUpdateBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(name), Some(roles_id)) = (non_empty(body.name), non_zero(body.roles_id)) else {
        return Err(AppError::missing_fields("Name and roles_id are required"));
    };

    let changes = UserChanges {
        name: Some(name),
        roles_id: Some(roles_id),
        description: Some(body.description.flatten().filter(|d| !d.is_empty())),
    };

    let db = require_db(&app_state)?;
    let user = users_repo::update_user(db, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User updated successfully",
        "user": user,
    })))
}

async fn patch_user(
    path: web::Path<i32>,
    body: ValidatedJson<UserUpdateBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let changes = UserChanges {
        name: non_empty(body.name),
        roles_id: non_zero(body.roles_id),
        description: body.description,
    };
    if changes.is_empty() {
        return Err(AppError::missing_fields(
            "At least one field to update is required",
        ));
    }

    let db = require_db(&app_state)?;
    let user = users_repo::update_user(db, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User updated successfully",
        "user": user,
    })))
}

async fn delete_user(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    users_repo::delete_user(db, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user")
            .route(web::get().to(list_users))
            .route(web::patch().to(patch_user_by_body))
            .route(web::delete().to(delete_user_by_body)),
    )
    .service(
        web::resource("/user/{id}")
            .route(web::get().to(get_user))
            .route(web::put().to(put_user))
            .route(web::patch().to(patch_user))
            .route(web::delete().to(delete_user)),
    );
}
