use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};

use super::non_empty;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{AuthClaims, ValidatedJson};
use crate::infra::db::require_db;
use crate::repos::push_subscriptions::{self as subscriptions_repo, SubscriptionUpsert};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeBody {
    #[serde(default)]
    pub subscription: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UnsubscribeBody {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Pull the fields stored alongside the raw subscription object. Only the
/// endpoint is mandatory; browsers without payload support omit the keys.
fn to_upsert(subscription: Value, user_agent: Option<String>) -> Option<SubscriptionUpsert> {
    let endpoint = subscription
        .get("endpoint")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())?
        .to_string();
    let key = |name: &str| {
        subscription
            .get("keys")
            .and_then(|k| k.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Some(SubscriptionUpsert {
        endpoint,
        p256dh_key: key("p256dh"),
        auth_key: key("auth"),
        subscription,
        user_agent,
    })
}

async fn subscribe(
    req: HttpRequest,
    claims: AuthClaims,
    body: ValidatedJson<SubscribeBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let upsert = body
        .into_inner()
        .subscription
        .and_then(|s| to_upsert(s, user_agent))
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::BadRequest, "Missing or invalid subscription data")
        })?;
    let user_id = claims.user_id()?;

    let db = require_db(&app_state)?;
    let subscription = subscriptions_repo::upsert_subscription(db, user_id, upsert).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Subscription saved successfully",
        "subscription": subscription,
    })))
}

async fn list_subscriptions(
    claims: AuthClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let db = require_db(&app_state)?;
    let subscriptions = subscriptions_repo::list_for_user(db, user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": subscriptions.len(),
        "subscriptions": subscriptions,
    })))
}

async fn unsubscribe(
    claims: AuthClaims,
    body: ValidatedJson<UnsubscribeBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let endpoint = non_empty(body.into_inner().endpoint)
        .ok_or_else(|| AppError::missing_fields("Endpoint is required"))?;
    let user_id = claims.user_id()?;

    let db = require_db(&app_state)?;
    subscriptions_repo::delete_for_user(db, user_id, &endpoint).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Subscription deleted successfully",
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/auth/push/subscribe")
            .route(web::post().to(subscribe))
            .route(web::get().to(list_subscriptions))
            .route(web::delete().to(unsubscribe)),
    );
}
