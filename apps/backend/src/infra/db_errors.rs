//! SeaORM -> DomainError translation helpers.
//!
//! Repositories convert `sea_orm::DbErr` into `DomainError` here, and
//! handlers then map `DomainError` to `AppError` via `From`.

use sea_orm::{DbErr, RuntimeErr};
use sqlx::error::DatabaseError;
use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

// PostgreSQL SQLSTATE codes
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FK_VIOLATION: &str = "23503";
const PG_CHECK_VIOLATION: &str = "23514";

// SQLite extended result codes
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";
const SQLITE_CONSTRAINT_CHECK: &str = "275";

fn database_error(e: &DbErr) -> Option<&dyn DatabaseError> {
    match e {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db))) => Some(db.as_ref()),
        _ => None,
    }
}

/// Which unique column was hit. PostgreSQL reports the constraint name
/// (`user_list_email_key`), SQLite only the message
/// (`UNIQUE constraint failed: user_list.email`).
fn unique_conflict(target: &str) -> (ConflictKind, &'static str) {
    if target.contains("user_list_email") || target.contains("user_list.email") {
        (ConflictKind::UniqueEmail, "Email already exists")
    } else if target.contains("user_list_nim") || target.contains("user_list.nim") {
        (ConflictKind::UniqueNim, "NIM already exists")
    } else if target.contains("roles_table_name_roles") || target.contains("roles_table.name_roles")
    {
        (ConflictKind::UniqueRoleName, "Role name already exists")
    } else {
        (
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        )
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let db_error = database_error(&e);
    let code = db_error.and_then(|d| d.code()).map(|c| c.into_owned());
    let code = code.as_deref();
    let constraint = db_error.and_then(|d| d.constraint()).unwrap_or_default();

    if matches!(
        code,
        Some(PG_UNIQUE_VIOLATION | SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY)
    ) || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        let target = if constraint.is_empty() {
            error_msg.as_str()
        } else {
            constraint
        };
        let (kind, detail) = unique_conflict(target);
        return DomainError::conflict(kind, detail);
    }

    if matches!(code, Some(PG_FK_VIOLATION | SQLITE_CONSTRAINT_FOREIGNKEY))
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::ForeignKey,
            "Referenced record does not exist",
        );
    }

    if matches!(code, Some(PG_CHECK_VIOLATION | SQLITE_CONSTRAINT_CHECK))
        || error_msg.contains("CHECK constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
