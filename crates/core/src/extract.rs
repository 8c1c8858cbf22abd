//! Candidate discovery: search, incremental-load scrolling, anchor parsing.

use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::browser::Browser;
use crate::candidate::{Candidate, CandidateList};
use crate::config::TargetCount;
use crate::error::{BrowserError, truncate_diag};
use crate::events::EventSink;
use crate::naver::{self, BLOG_ID_PARAM, selectors, timing};

/// Searches for `keyword` and returns the deduplicated, first-seen-ordered
/// candidate list. Extraction is never fatal: zero anchors, anchors without
/// the identifier parameter, and driver failures all degrade to an empty
/// (or shorter) list, the last with an error event.
pub async fn extract<B: Browser + ?Sized>(
    browser: &B,
    keyword: &str,
    target: TargetCount,
    events: &EventSink,
) -> CandidateList {
    match drive_extract(browser, keyword, target, events).await {
        Ok(list) => list,
        Err(err) => {
            warn!(target = "buddybot", error = %err, "extraction failed");
            events.error(format!(
                "candidate extraction failed: {}",
                truncate_diag(&err.to_string())
            ));
            CandidateList::new()
        }
    }
}

async fn drive_extract<B: Browser + ?Sized>(
    browser: &B,
    keyword: &str,
    target: TargetCount,
    events: &EventSink,
) -> Result<CandidateList, BrowserError> {
    events.info("opening search results...");
    browser.navigate(&naver::search_url(keyword)).await?;
    sleep(timing::SEARCH_SETTLE).await;

    let cycles = target.scroll_cycles();
    events.info(format!("scrolling for results ({cycles} cycles)..."));
    for cycle in 0..cycles {
        browser.execute(naver::SCROLL_TO_BOTTOM).await?;
        sleep(timing::SCROLL_PAUSE).await;
        debug!(target = "buddybot", cycle = cycle + 1, total = cycles, "scroll cycle done");
    }
    sleep(timing::POST_SCROLL_SETTLE).await;

    let anchors = browser.find_all(selectors::PROFILE_ANCHOR).await?;
    events.info(format!("found {} profile element(s)", anchors.len()));

    let mut list = CandidateList::new();
    for anchor in &anchors {
        let Some(href) = browser.attribute(anchor, "href").await? else {
            continue;
        };
        // Anchors without the identifier parameter are not an error; the
        // markup mixes profile links with other link kinds.
        if let Some(id) = blog_id_from_href(&href) {
            list.push(Candidate::new(id));
        }
    }
    Ok(list)
}

fn blog_id_from_href(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == BLOG_ID_PARAM)
        .map(|(_, value)| value.into_owned())
}
