//! The capability boundary to the automation driver.
//!
//! The engine never talks to a concrete driver; it only requires this
//! narrow set of page operations. Any driver that can navigate, look up
//! elements, interact with them, and run a script is substitutable — the
//! CLI adapts the WebDriver client, tests substitute a scripted mock.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};

use crate::error::BrowserError;
use crate::naver::timing::POLL_INTERVAL;

/// Opaque reference to an element on the current page. Handles are only
/// meaningful until the next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(pub String);

#[async_trait]
pub trait Browser: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// First element matching the CSS selector, or [`BrowserError::NotFound`].
    async fn find(&self, selector: &str) -> Result<ElementHandle, BrowserError>;

    /// All elements matching the CSS selector, in document order. An empty
    /// match is an empty vec, not an error.
    async fn find_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError>;

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    async fn clear(&self, element: &ElementHandle) -> Result<(), BrowserError>;

    async fn type_text(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError>;

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;

    /// Whether the element is currently displayed and enabled.
    async fn is_interactable(&self, element: &ElementHandle) -> Result<bool, BrowserError>;

    async fn execute(&self, script: &str) -> Result<(), BrowserError>;

    /// Releases the underlying automation resource. Called exactly once per
    /// run by the controller.
    async fn close(&self) -> Result<(), BrowserError>;
}

/// Polls until the selector matches, or yields [`BrowserError::Timeout`]
/// once the deadline passes. Driver failures other than "not found"
/// propagate immediately.
pub async fn wait_present<B: Browser + ?Sized>(
    browser: &B,
    selector: &str,
    timeout: Duration,
) -> Result<ElementHandle, BrowserError> {
    let deadline = Instant::now() + timeout;
    loop {
        match browser.find(selector).await {
            Ok(element) => return Ok(element),
            Err(BrowserError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        if Instant::now() >= deadline {
            return Err(timeout_error(selector, timeout));
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Like [`wait_present`], but additionally requires the element to be
/// displayed and enabled before yielding it.
pub async fn wait_interactable<B: Browser + ?Sized>(
    browser: &B,
    selector: &str,
    timeout: Duration,
) -> Result<ElementHandle, BrowserError> {
    let deadline = Instant::now() + timeout;
    loop {
        match browser.find(selector).await {
            Ok(element) => {
                if browser.is_interactable(&element).await? {
                    return Ok(element);
                }
            }
            Err(BrowserError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        if Instant::now() >= deadline {
            return Err(timeout_error(selector, timeout));
        }
        sleep(POLL_INTERVAL).await;
    }
}

fn timeout_error(selector: &str, timeout: Duration) -> BrowserError {
    BrowserError::Timeout {
        selector: selector.to_string(),
        ms: timeout.as_millis() as u64,
    }
}
