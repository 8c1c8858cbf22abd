//! Extraction behavior: dedup order, silent skips, scroll scaling, and the
//! never-fatal error policy.

mod common;

use buddybot::candidate::Candidate;
use buddybot::config::TargetCount;
use buddybot::events::EventSink;
use buddybot::extract::extract;
use common::MockBrowser;

fn href(id: &str) -> String {
    format!("https://m.blog.naver.com/FeedList.naver?blogId={id}&categoryNo=0")
}

#[tokio::test(start_paused = true)]
async fn duplicates_collapse_in_first_seen_order() {
    let browser = MockBrowser::new();
    {
        let mut state = browser.state();
        // 12 anchors, two of them repeats: 10 unique identifiers.
        for id in [
            "a1", "a2", "a3", "a1", "a4", "a5", "a6", "a7", "a2", "a8", "a9", "a10",
        ] {
            state.anchor_hrefs.push(href(id));
        }
    }
    let (events, _rx) = EventSink::channel();

    let list = extract(&browser, "추천", TargetCount::Thirty, &events).await;

    let ids: Vec<&str> = list.iter().map(Candidate::id).collect();
    assert_eq!(ids, ["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10"]);
}

#[tokio::test(start_paused = true)]
async fn anchors_without_the_identifier_are_silently_skipped() {
    let browser = MockBrowser::new();
    {
        let mut state = browser.state();
        state.anchor_hrefs.push(href("kept"));
        state
            .anchor_hrefs
            .push("https://m.blog.naver.com/PostView.naver?categoryNo=2".to_string());
        state.anchor_hrefs.push("::notaurl::".to_string());
    }
    let (events, _rx) = EventSink::channel();

    let list = extract(&browser, "k", TargetCount::Thirty, &events).await;

    let ids: Vec<&str> = list.iter().map(Candidate::id).collect();
    assert_eq!(ids, ["kept"]);
}

#[tokio::test(start_paused = true)]
async fn zero_anchors_is_an_empty_list_not_an_error() {
    let browser = MockBrowser::new();
    let (events, _rx) = EventSink::channel();

    let list = extract(&browser, "k", TargetCount::Thirty, &events).await;

    assert!(list.is_empty());
}

#[tokio::test(start_paused = true)]
async fn scroll_cycles_scale_with_the_target() {
    let (events, _rx) = EventSink::channel();

    let thirty = MockBrowser::new();
    extract(&thirty, "k", TargetCount::Thirty, &events).await;
    assert_eq!(thirty.state().scrolls, 15);

    let hundred = MockBrowser::new();
    extract(&hundred, "k", TargetCount::Hundred, &events).await;
    assert_eq!(hundred.state().scrolls, 20);
}

#[tokio::test(start_paused = true)]
async fn navigation_failure_degrades_to_empty_with_an_error_event() {
    let browser = MockBrowser::new();
    browser.state().fail_navigation_to = Some("SectionSearch".to_string());
    let (events, mut rx) = EventSink::channel();

    let list = extract(&browser, "k", TargetCount::Thirty, &events).await;

    assert!(list.is_empty());
    let mut saw_error = false;
    while let Ok(event) = rx.try_recv() {
        if event.severity == buddybot::Severity::Error {
            saw_error = true;
        }
    }
    assert!(saw_error, "extraction failure must surface as an error event");
}
