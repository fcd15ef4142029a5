use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;

/// Deadline applied to a single store call when none is configured.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a store call, abandoning it once `deadline` elapses.
///
/// The abandoned future is dropped, so no partial result is observed.
pub(crate) async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                deadline_ms = deadline.as_millis() as u64,
                "Store call exceeded its deadline"
            );
            Err(AppError::cancelled(operation))
        }
    }
}
