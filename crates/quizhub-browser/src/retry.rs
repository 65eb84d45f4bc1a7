//! Bounded retry combinator

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::BrowserError;

const MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY_MS: u64 = 500;

/// Errors that can say whether repeating the failed action may succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for BrowserError {
    fn is_retryable(&self) -> bool {
        BrowserError::is_retryable(self)
    }
}

/// Retry a fallible action up to three times with exponential back-off.
/// Non-retryable errors abort immediately.
pub async fn safe_retry<T, E, F, Fut>(what: &str, mut action: F) -> Result<T, E>
where
    E: Retryable + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match action().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS && e.is_retryable() => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt - 1));
                warn!(what, attempt, error = %e, "retrying after {delay:?}");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
