use tracing::warn;

use crate::auth::gate::AuthErrorKind;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt. `identifier` is whatever the caller typed
/// (name, email or NIM) and is redacted before it reaches the log.
pub fn login_failed(reason: &str, identifier: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        identifier = %Redacted(identifier),
        reason,
        "Authentication failure"
    );
}

/// Log a request turned away by the token gate.
pub fn token_rejected(kind: AuthErrorKind, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        kind = ?kind,
        path,
        "Token rejected"
    );
}
