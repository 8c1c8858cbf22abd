//! Per-candidate request submission state machine.
//!
//! Page load -> eligibility check -> best-effort message/group -> confirm.
//! The eligibility probe is the gate: most candidates have already been
//! asked or disabled inbound requests, so missing the radio within its short
//! timeout is the routine outcome and maps to `Skipped`. Message and group
//! are best-effort sub-steps whose failure is logged and deliberately
//! dropped; only failures after the gate produce `Failed`.

use tokio::time::sleep;
use tracing::debug;

use crate::browser::{Browser, wait_interactable};
use crate::candidate::Candidate;
use crate::error::{BrowserError, truncate_diag};
use crate::events::EventSink;
use crate::naver::{self, selectors, timing};

/// Reason attached to every eligibility skip.
pub const SKIP_REASON: &str = "not eligible or already requested";

/// Terminal result for one candidate. A `Skipped` and a `Failed` both count
/// as "not succeeded" in the run summary; the reason is kept for the event
/// stream and for callers that care about the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    Skipped(String),
    Failed(String),
}

impl RequestOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, RequestOutcome::Success)
    }
}

pub async fn submit<B: Browser + ?Sized>(
    browser: &B,
    candidate: &Candidate,
    message: &str,
    events: &EventSink,
) -> RequestOutcome {
    events.info(format!("requesting mutual buddy: {candidate}"));

    if let Err(err) = open_form(browser, candidate).await {
        let reason = truncate_diag(&err.to_string());
        events.error(format!("[failed] {candidate}: {reason}"));
        return RequestOutcome::Failed(reason);
    }

    if let Err(err) = accept_eligibility(browser).await {
        debug!(target = "buddybot", error = %err, "eligibility radio unavailable");
        events.warning(format!(
            "[skipped] {candidate} does not accept mutual-buddy requests or was already asked"
        ));
        return RequestOutcome::Skipped(SKIP_REASON.to_string());
    }
    events.info("  - mutual-buddy radio selected");

    match set_message(browser, message).await {
        Ok(()) => events.info("  - request message filled in"),
        Err(err) => {
            debug!(target = "buddybot", error = %err, "message textarea unavailable");
            events.warning("  - message box not found, the platform default message will be used");
        }
    }

    match select_group(browser).await {
        Ok(true) => events.info("  - buddy group selected"),
        Ok(false) => {}
        Err(err) => {
            debug!(target = "buddybot", error = %err, "group selection skipped");
        }
    }

    if let Err(err) = confirm(browser).await {
        let reason = truncate_diag(&err.to_string());
        events.error(format!("[failed] {candidate}: {reason}"));
        return RequestOutcome::Failed(reason);
    }

    events.success(format!("[ok] mutual-buddy request sent to {candidate}"));
    RequestOutcome::Success
}

async fn open_form<B: Browser + ?Sized>(
    browser: &B,
    candidate: &Candidate,
) -> Result<(), BrowserError> {
    browser.navigate(&naver::buddy_form_url(candidate.id())).await?;
    sleep(timing::FORM_SETTLE).await;
    Ok(())
}

/// The gate: locate and activate the mutual-buddy radio within its short
/// timeout. Any miss here means the candidate is skipped.
async fn accept_eligibility<B: Browser + ?Sized>(browser: &B) -> Result<(), BrowserError> {
    let radio =
        wait_interactable(browser, selectors::MUTUAL_RADIO, timing::ELIGIBILITY_TIMEOUT).await?;
    browser.click(&radio).await?;
    sleep(timing::CONTROL_SETTLE).await;
    Ok(())
}

async fn set_message<B: Browser + ?Sized>(browser: &B, message: &str) -> Result<(), BrowserError> {
    let textarea = browser.find(selectors::MESSAGE_TEXTAREA).await?;
    browser.click(&textarea).await?;
    browser.clear(&textarea).await?;
    browser.type_text(&textarea, message).await?;
    sleep(timing::CONTROL_SETTLE).await;
    Ok(())
}

/// Picks the last group option in document order when the select offers any.
/// Heuristic inherited from the observed platform behavior: the most
/// recently created group appears to be appended last. Not a verified
/// contract.
async fn select_group<B: Browser + ?Sized>(browser: &B) -> Result<bool, BrowserError> {
    let options = browser.find_all(selectors::GROUP_OPTIONS).await?;
    match options.last() {
        Some(last) => {
            browser.click(last).await?;
            sleep(timing::CONTROL_SETTLE).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

async fn confirm<B: Browser + ?Sized>(browser: &B) -> Result<(), BrowserError> {
    let button = browser.find(selectors::CONFIRM_BUTTON).await?;
    browser.click(&button).await?;
    sleep(timing::CONFIRM_SETTLE).await;
    Ok(())
}
