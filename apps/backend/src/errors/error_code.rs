//! Error codes for the SIMJUR backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in the `code` field of error responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No Authorization header supplied
    MissingAuthHeader,
    /// Token failed signature or expiry verification
    InvalidToken,
    /// Login password did not match
    InvalidPassword,

    // Request Validation
    /// Required fields absent from the body
    MissingFields,
    /// Invalid email address
    InvalidEmail,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Referenced row does not exist
    FkViolation,
    /// Role still referenced by users
    RoleInUse,

    // Resource Not Found
    UserNotFound,
    RoleNotFound,
    ModuleNotFound,
    AccessNotFound,
    TorNotFound,
    LpjNotFound,
    TransactionNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    EmailExists,
    NimExists,
    RoleNameExists,
    /// Unique constraint violation without a more specific mapping
    UniqueViolation,
    /// Generic conflict
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    /// Push delivery is not configured
    PushNotConfigured,
    /// Push service rejected or failed the delivery
    PushDeliveryFailed,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingAuthHeader => "MISSING_AUTH_HEADER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidPassword => "INVALID_PASSWORD",

            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::FkViolation => "FK_VIOLATION",
            Self::RoleInUse => "ROLE_IN_USE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::ModuleNotFound => "MODULE_NOT_FOUND",
            Self::AccessNotFound => "ACCESS_NOT_FOUND",
            Self::TorNotFound => "TOR_NOT_FOUND",
            Self::LpjNotFound => "LPJ_NOT_FOUND",
            Self::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::EmailExists => "EMAIL_EXISTS",
            Self::NimExists => "NIM_EXISTS",
            Self::RoleNameExists => "ROLE_NAME_EXISTS",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::PushNotConfigured => "PUSH_NOT_CONFIGURED",
            Self::PushDeliveryFailed => "PUSH_DELIVERY_FAILED",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
