use crate::shared::application::errors::ApplicationError;
use std::future::Future;
use std::time::Duration;

const BACKOFF_STEP_MS: u64 = 2;

/// Run `op` again while it loses an optimistic-concurrency race, up to `max_attempts` runs.
///
/// Every attempt must reload the stream, so the closure is called anew each time.
/// Any other error is returned as is.
pub async fn retry_on_conflict<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, ApplicationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApplicationError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(error) if error.is_version_mismatch() && attempt < max_attempts => {
                tracing::debug!(attempt, %error, "version conflict, retrying");
                tokio::time::sleep(Duration::from_millis(BACKOFF_STEP_MS * attempt as u64)).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
