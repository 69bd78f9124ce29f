use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::non_empty;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{AuthClaims, ValidatedJson};
use crate::push::{PushMessage, PushTarget};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SendPushBody {
    #[serde(default)]
    pub subscription: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

async fn usage() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Push notification API endpoint",
        "usage": "POST with subscription, title, message, and optional url, icon",
        "endpoints": {
            "send": "POST /api/push",
            "auth": {
                "send": "POST /api/auth/push",
                "subscribe": "POST /api/auth/push/subscribe",
                "getSubscriptions": "GET /api/auth/push/subscribe",
            },
        },
    }))
}

/// Deliver one notification to the subscription named in the body.
///
/// Serves both `POST /api/push` and `POST /api/auth/push`; the claims
/// argument is what makes the public path require a token.
async fn send_push(
    claims: AuthClaims,
    body: ValidatedJson<SendPushBody>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(subscription), Some(title), Some(message)) = (
        body.subscription.filter(|s| !s.is_null()),
        non_empty(body.title),
        non_empty(body.message),
    ) else {
        return Err(AppError::missing_fields(
            "Missing required fields: subscription, title, message",
        ));
    };

    let target = PushTarget::from_subscription(&subscription).map_err(|e| {
        warn!(error = %e, "Rejected push subscription");
        AppError::bad_request(ErrorCode::BadRequest, "Missing or invalid subscription data")
    })?;

    let Some(sender) = app_state.push.as_ref() else {
        return Err(AppError::internal(
            ErrorCode::PushNotConfigured,
            "Server configuration error: VAPID keys not set",
        ));
    };

    let notification = PushMessage::new(title, message, body.url, body.icon);
    sender.send(&target, &notification).await.map_err(|e| {
        warn!(error = %e, "Push delivery failed");
        AppError::internal(ErrorCode::PushDeliveryFailed, "Failed to send push notification")
    })?;

    info!(sender_id = ?claims.claims().subject_id(), "Push notification sent");
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/push")
            .route(web::get().to(usage))
            .route(web::post().to(send_push)),
    );
}

pub fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/push").route(web::post().to(send_push)));
}
