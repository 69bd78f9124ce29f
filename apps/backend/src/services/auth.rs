//! Login and self-registration.

use lazy_regex::regex_is_match;
use sea_orm::ConnectionTrait;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::entities::users;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::users::{self as users_repo, NewUser};
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: users::Model,
}

/// Registration data after required-field checks.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub nim: String,
    pub program_studi: String,
    pub roles_id: i32,
    pub description: Option<String>,
    pub password: String,
}

/// Claims carried by a login token.
pub fn login_claims(user: &users::Model) -> Map<String, Value> {
    let claims = json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "nim": user.nim,
        "roles_id": user.roles_id,
    });
    match claims {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email)
}

/// Verify `password` for the account matching `identifier` (name, email or
/// NIM) and mint a token for it.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identifier: &str,
    password: String,
    security_config: &SecurityConfig,
) -> Result<LoginOutcome, AppError> {
    let Some(user) = users_repo::find_by_identifier(conn, identifier).await? else {
        security::login_failed("unknown_identifier", identifier);
        return Err(AppError::not_found(ErrorCode::UserNotFound, "User not found"));
    };

    if !verify_password(password, user.password.clone()).await? {
        security::login_failed("invalid_password", identifier);
        return Err(AppError::unauthorized(
            ErrorCode::InvalidPassword,
            "Invalid password",
        ));
    }

    let token = mint_access_token(&login_claims(&user), security_config)?;
    info!(user_id = user.id, "User logged in");

    Ok(LoginOutcome { token, user })
}

/// Create an account with a bcrypt-hashed password.
///
/// Email and NIM are checked up front for a friendly 409; the unique
/// constraints still catch concurrent registrations.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration: Registration,
    security_config: &SecurityConfig,
) -> Result<users::Model, AppError> {
    if !is_valid_email(&registration.email) {
        return Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "Invalid email format",
        ));
    }

    if users_repo::email_exists(conn, &registration.email).await? {
        return Err(AppError::conflict(
            ErrorCode::EmailExists,
            "Email already exists",
        ));
    }
    if users_repo::nim_exists(conn, &registration.nim).await? {
        return Err(AppError::conflict(ErrorCode::NimExists, "NIM already exists"));
    }

    let password_hash = hash_password(registration.password, security_config.bcrypt_cost).await?;

    let user = users_repo::create_user(
        conn,
        NewUser {
            name: registration.name,
            email: registration.email,
            nim: registration.nim,
            password_hash,
            roles_id: registration.roles_id,
            program_studi: registration.program_studi,
            description: registration.description,
        },
    )
    .await?;

    info!(user_id = user.id, "User registered");
    Ok(user)
}
