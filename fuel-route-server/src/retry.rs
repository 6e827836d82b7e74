//! Bounded retry for transient upstream failures.

use std::future::Future;

use tracing::warn;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Errors that may succeed if the request is simply repeated.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for reqwest::Error {
    fn is_transient(&self) -> bool {
        self.is_timeout()
    }
}

/// Run `op`, repeating it up to `max_retries` more times while it fails
/// with a transient error. The last error is returned once retries run out.
pub async fn retry_transient<T, E, F, Fut>(what: &str, max_retries: u32, mut op: F) -> Result<T, E>
where
    E: Transient + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < max_retries => {
                attempt += 1;
                warn!(
                    what,
                    attempt,
                    max_retries,
                    error = %e,
                    "transient upstream failure, retrying"
                );
            }
            result => return result,
        }
    }
}
