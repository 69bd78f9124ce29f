//! bcrypt hashing, run on the blocking pool so workers stay responsive.

use actix_web::web;
use tracing::{error, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

const PASSWORD_PROCESSING_FAILED: &str = "Password processing failed";

fn processing_failed(context: &'static str, e: impl std::fmt::Display) -> AppError {
    error!(error = %e, "{context}");
    AppError::internal(ErrorCode::Internal, PASSWORD_PROCESSING_FAILED)
}

pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| processing_failed("Password hashing task failed", e))?
        .map_err(|e| processing_failed("Password hashing failed", e))
}

/// Returns `false` for a mismatch and for stored hashes bcrypt cannot parse.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let result = web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| processing_failed("Password verification task failed", e))?;

    match result {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be verified");
            Ok(false)
        }
    }
}
