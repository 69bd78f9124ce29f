use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::{non_empty, non_zero};
use crate::entities::users;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::infra::db::require_db;
use crate::services::auth::{self as auth_service, Registration};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of an account; never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub nim: String,
    pub program_studi: String,
    pub roles_id: i32,
    pub description: Option<String>,
}

impl From<users::Model> for UserSummary {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            nim: user.nim,
            program_studi: user.program_studi,
            roles_id: user.roles_id,
            description: user.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserSummary,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nim: Option<String>,
    #[serde(default)]
    pub program_studi: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub roles_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(identifier), Some(password)) = (non_empty(body.identifier), non_empty(body.password))
    else {
        return Err(AppError::missing_fields("Missing credentials"));
    };

    let db = require_db(&app_state)?;
    let outcome = auth_service::login(db, &identifier, password, &app_state.security).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login success",
        token: outcome.token,
        user: outcome.user.into(),
    }))
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (
        Some(name),
        Some(email),
        Some(nim),
        Some(program_studi),
        Some(roles_id),
        Some(password),
    ) = (
        non_empty(body.name),
        non_empty(body.email),
        non_empty(body.nim),
        non_empty(body.program_studi),
        non_zero(body.roles_id),
        non_empty(body.password),
    )
    else {
        return Err(AppError::missing_fields(
            "Missing required fields: name, email, nim, program_studi, roles_id, password",
        ));
    };

    let db = require_db(&app_state)?;
    let user = auth_service::register(
        db,
        Registration {
            name,
            email,
            nim,
            program_studi,
            roles_id,
            description: non_empty(body.description),
            password,
        },
        &app_state.security,
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "User registered successfully",
        "user": UserSummary::from(user),
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/login").route(web::post().to(login)))
        .service(web::resource("/api/auth/register").route(web::post().to(register)));
}
