//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error rendering and log statements read it
//! from anywhere below the handler without threading the id through calls.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Trace id for the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
