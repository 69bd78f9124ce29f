//! Task-local trace context for web requests.
//!
//! `RequestTrace` scopes each request future with its trace id so error
//! bodies, repositories and security logs can pick it up without threading
//! it through every signature.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current trace context.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
