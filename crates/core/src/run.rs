//! Run orchestration: login -> extraction -> filtered, limited, cancellable
//! submission loop. The browser is acquired here and released here, exactly
//! once, whatever the exit path.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::browser::Browser;
use crate::candidate::Candidate;
use crate::config::RunConfig;
use crate::error::LaunchError;
use crate::events::EventSink;
use crate::naver::timing;
use crate::{extract, session, submit};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Completed,
    Cancelled,
    AbortedLaunch,
    AbortedAuth,
    AbortedExtraction,
}

/// Final accounting for a run. `failed` counts skipped and failed candidates
/// together; the distinction lives in the per-candidate outcomes and the
/// event stream, not in the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub terminal: Terminal,
}

impl RunSummary {
    fn aborted(terminal: Terminal) -> Self {
        Self { attempted: 0, succeeded: 0, failed: 0, terminal }
    }
}

/// Cooperative stop request. Sampled between candidates only — the in-flight
/// submission always completes before the flag takes effect.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs one full automation pass. `launch` produces the browser so that a
/// launch failure is part of the summary rather than an error the caller
/// must also handle. Always returns a summary; never panics the run away.
pub async fn run<B, F, Fut>(
    config: &RunConfig,
    launch: F,
    events: &EventSink,
    cancel: &CancelFlag,
) -> RunSummary
where
    B: Browser,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<B, LaunchError>>,
{
    events.info("starting mutual-buddy automation");
    events.info(format!("account: {}", config.identifier));
    events.info(format!("keyword: {}", config.keyword));

    events.info("launching browser...");
    let browser = match launch().await {
        Ok(browser) => browser,
        Err(err) => {
            events.error(err.to_string());
            return RunSummary::aborted(Terminal::AbortedLaunch);
        }
    };

    // `drive` returns a summary on every path, so the close below runs on
    // every path too.
    let summary = drive(&browser, config, events, cancel).await;

    if let Err(err) = browser.close().await {
        warn!(target = "buddybot", error = %err, "browser close failed");
    }

    info!(
        target = "buddybot",
        terminal = ?summary.terminal,
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run finished"
    );
    summary
}

async fn drive<B: Browser>(
    browser: &B,
    config: &RunConfig,
    events: &EventSink,
    cancel: &CancelFlag,
) -> RunSummary {
    events.info("1. signing in");
    if let Err(err) = session::login(browser, &config.identifier, &config.secret, events).await {
        events.error(err.to_string());
        events.error("aborting: the session cannot be used");
        return RunSummary::aborted(Terminal::AbortedAuth);
    }

    events.info("2. extracting candidate blogs");
    let extracted = extract::extract(browser, &config.keyword, config.target, events).await;
    if extracted.is_empty() {
        events.warning("no candidates extracted, nothing to do");
        return RunSummary::aborted(Terminal::AbortedExtraction);
    }
    events.success(format!("extracted {} candidate(s)", extracted.len()));

    let queue: Vec<Candidate> = extracted
        .into_iter()
        .filter(|candidate| !config.exclusions.contains(candidate.id()))
        .take(config.target.as_usize())
        .collect();
    events.info(format!(
        "{} candidate(s) after exclusions and target limit",
        queue.len()
    ));

    events.info("3. sending mutual-buddy requests");
    let total = queue.len();
    let mut summary = RunSummary {
        attempted: 0,
        succeeded: 0,
        failed: 0,
        terminal: Terminal::Completed,
    };

    for (idx, candidate) in queue.iter().enumerate() {
        if cancel.is_set() {
            events.warning(format!(
                "stop requested, halting after {} candidate(s)",
                summary.attempted
            ));
            summary.terminal = Terminal::Cancelled;
            break;
        }

        events.info(format!("[{}/{}] processing...", idx + 1, total));
        let outcome = submit::submit(browser, candidate, &config.message, events).await;
        summary.attempted += 1;
        if outcome.succeeded() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }

        sleep(timing::REQUEST_SPACING).await;
    }

    events.info("mutual-buddy run finished");
    events.success(format!(
        "succeeded: {} / failed: {}",
        summary.succeeded, summary.failed
    ));
    summary
}
