//! Login sequencer.
//!
//! Drives the browser through the platform's credential form. Any failure in
//! the sequence is fatal for the run: the session state is undefined and the
//! caller must abort rather than reuse the browser.

use tokio::time::sleep;
use tracing::debug;

use crate::browser::{Browser, ElementHandle, wait_present};
use crate::error::{AuthError, BrowserError};
use crate::events::EventSink;
use crate::naver::{LOGIN_URL, selectors, timing};

/// Runs the full login sequence. On success the browser carries an
/// authenticated session cookie; on failure the diagnostic is truncated
/// before it is surfaced.
pub async fn login<B: Browser + ?Sized>(
    browser: &B,
    identifier: &str,
    secret: &str,
    events: &EventSink,
) -> Result<(), AuthError> {
    events.info("opening login page...");
    drive_login(browser, identifier, secret).await?;
    events.success("credentials submitted");
    Ok(())
}

async fn drive_login<B: Browser + ?Sized>(
    browser: &B,
    identifier: &str,
    secret: &str,
) -> Result<(), BrowserError> {
    browser.navigate(LOGIN_URL).await?;

    let id_field = wait_present(browser, selectors::LOGIN_ID, timing::LOGIN_FIELD_TIMEOUT).await?;
    type_slowly(browser, &id_field, identifier).await?;

    let pw_field = browser.find(selectors::LOGIN_PW).await?;
    type_slowly(browser, &pw_field, secret).await?;

    let submit = browser.find(selectors::LOGIN_SUBMIT).await?;
    browser.click(&submit).await?;
    debug!(target = "buddybot", "login submitted, settling");

    // No completion signal for the redirect; fixed settle.
    sleep(timing::LOGIN_SETTLE).await;
    Ok(())
}

/// Types one character at a time with a fixed inter-key delay. Paced input
/// keeps the final field value identical to a paste while looking less like
/// scripted entry.
async fn type_slowly<B: Browser + ?Sized>(
    browser: &B,
    element: &ElementHandle,
    text: &str,
) -> Result<(), BrowserError> {
    browser.click(element).await?;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        browser.type_text(element, ch.encode_utf8(&mut buf)).await?;
        sleep(timing::TYPE_DELAY).await;
    }
    Ok(())
}
