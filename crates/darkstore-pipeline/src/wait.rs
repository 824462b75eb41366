//! Polling-based synchronization with the page's asynchronous rendering.
//!
//! Every later pipeline stage gates on a wait before interacting with the
//! page. There are no unconditional sleeps here: a wait always names the
//! condition it is waiting for, polls it, and fails with a timeout naming
//! that condition.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::CrawlError;
use crate::source::ElementSource;

/// Deadlines and intervals for the pipeline's waits, sourced from
/// [`darkstore_core::AppConfig`].
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Wait for the entry-page sidebar (T1).
    pub sidebar_timeout: Duration,
    /// Wait for the address-suggestion panel (T2).
    pub suggest_timeout: Duration,
    /// Shorter wait for the panel after typing a city (T3).
    pub city_suggest_timeout: Duration,
    /// Wait for listing content after a navigation.
    pub page_timeout: Duration,
    pub poll_interval: Duration,
    /// Settle delay after typing into a debounced input, before the
    /// suggestion wait starts.
    pub typing_settle: Duration,
}

impl WaitPolicy {
    #[must_use]
    pub fn from_config(config: &darkstore_core::AppConfig) -> Self {
        Self {
            sidebar_timeout: Duration::from_secs(config.sidebar_timeout_secs),
            suggest_timeout: Duration::from_secs(config.suggest_timeout_secs),
            city_suggest_timeout: Duration::from_secs(config.city_suggest_timeout_secs),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            typing_settle: Duration::from_millis(config.typing_settle_ms),
        }
    }
}

/// Polls `predicate` until it returns `Ok(true)` or `timeout` elapses.
///
/// A predicate returning `Ok(false)` or `Err(_)` means "not yet" — lookup
/// errors during rendering are expected, never terminal. The predicate is
/// checked once immediately, then every `poll_interval`.
///
/// # Errors
///
/// - [`CrawlError::Timeout`] naming `what` once the deadline passes.
/// - [`CrawlError::Cancelled`] as soon as `cancel` fires, without waiting
///   out the remaining timeout.
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    poll_interval: Duration,
    cancel: &CancellationToken,
    mut predicate: F,
) -> Result<(), CrawlError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, CrawlError>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if cancel.is_cancelled() {
            return Err(CrawlError::Cancelled);
        }

        match predicate().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => {
                tracing::trace!(what, error = %e, "wait predicate not ready");
            }
        }

        if tokio::time::Instant::now() + poll_interval > deadline {
            return Err(CrawlError::Timeout {
                what: what.to_string(),
                waited_secs: timeout.as_secs(),
            });
        }

        tokio::select! {
            () = cancel.cancelled() => return Err(CrawlError::Cancelled),
            () = tokio::time::sleep(poll_interval) => {}
        }
    }
}

/// Waits until the element matched by `selector` exists and is visible.
///
/// # Errors
///
/// [`CrawlError::Timeout`] or [`CrawlError::Cancelled`], as [`wait_until`].
pub async fn wait_for_visible<S: ElementSource>(
    source: &S,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<(), CrawlError> {
    wait_until(selector, timeout, poll_interval, cancel, move || async move {
        let element = source.find(selector).await?;
        source.is_visible(&element).await
    })
    .await
}
