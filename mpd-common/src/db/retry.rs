//! Retry logic for transient database lock errors
//!
//! File databases shared by concurrent requests can report
//! "database is locked" while another writer holds the lock.

use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Default bound on total retry time
pub const DEFAULT_MAX_LOCK_WAIT_MS: u64 = 5000;

/// Retry a database operation with exponential backoff until max_wait_ms elapses.
///
/// **Backoff Strategy:**
/// - Initial delay: 10ms
/// - Max delay: 1000ms
/// - Multiplier: 2.0 (exponential)
///
/// Errors other than a lock error are returned immediately.
pub async fn retry_on_lock<F, Fut, T>(
    operation_name: &str,
    max_wait_ms: u64,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let start_time = Instant::now();
    let max_duration = Duration::from_millis(max_wait_ms);
    let mut attempt = 0u32;
    let mut backoff_ms = 10u64;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::debug!(
                        operation = operation_name,
                        attempt,
                        elapsed_ms = start_time.elapsed().as_millis() as u64,
                        "Database operation succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => {
                if !is_lock_error(&err) {
                    return Err(err);
                }

                let elapsed = start_time.elapsed();
                if elapsed >= max_duration {
                    tracing::error!(
                        operation = operation_name,
                        attempt,
                        elapsed_ms = elapsed.as_millis() as u64,
                        max_wait_ms,
                        "Database operation failed: max retry time exceeded"
                    );
                    return Err(Error::Internal(format!(
                        "Database locked after {} attempts ({} ms elapsed, max {} ms)",
                        attempt,
                        elapsed.as_millis(),
                        max_wait_ms
                    )));
                }

                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    backoff_ms,
                    "Database locked, retrying"
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(1000);
            }
        }
    }
}

fn is_lock_error(err: &Error) -> bool {
    match err {
        Error::Database(db_err) => db_err.to_string().contains("database is locked"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn lock_error() -> Error {
        Error::Database(sqlx::Error::Protocol("database is locked".to_string()))
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let result = retry_on_lock("test", 100, || async { Ok::<_, Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_retries_lock_error_then_succeeds() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let result = retry_on_lock("test", 1000, move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(lock_error())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_other_errors_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let result: Result<()> = retry_on_lock("test", 1000, move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::NotFound("gone".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_wait() {
        let result: Result<()> = retry_on_lock("test", 50, || async { Err(lock_error()) }).await;
        assert!(matches!(result, Err(Error::Internal(msg)) if msg.contains("Database locked")));
    }
}
