//! Scripted in-memory browser used by the engine tests.
//!
//! Serves three fake pages keyed off the last navigated URL: the login form,
//! the search results (anchors configured per test), and the request form
//! (eligibility, textarea presence, and confirm behavior configured per
//! blog id). Records every interaction so tests can assert on the exact
//! sequence the engine drove.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use buddybot::browser::{Browser, ElementHandle};
use buddybot::error::BrowserError;
use buddybot::naver::{LOGIN_URL, selectors};
use buddybot::run::CancelFlag;

#[derive(Default)]
pub struct State {
    pub current_url: String,
    pub visits: Vec<String>,
    pub close_calls: u32,
    pub scrolls: u32,
    pub clicks: Vec<String>,
    pub typed: HashMap<String, String>,

    /// hrefs the profile anchors on the search page expose.
    pub anchor_hrefs: Vec<String>,
    /// Blog ids whose form shows the mutual-buddy radio.
    pub eligible: HashSet<String>,
    pub has_textarea: bool,
    pub group_option_count: usize,
    /// Blog ids whose confirm click blows up.
    pub confirm_fail: HashSet<String>,

    /// Substring of a URL whose navigation should fail.
    pub fail_navigation_to: Option<String>,

    pub confirms: u32,
    /// Sets the flag once this many confirms have happened.
    pub cancel_after_confirms: Option<(u32, CancelFlag)>,
}

#[derive(Clone)]
pub struct MockBrowser {
    state: Arc<Mutex<State>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        let state = State {
            has_textarea: true,
            group_option_count: 2,
            ..State::default()
        };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Configures `count` eligible candidates named `blog0..blogN` and the
    /// matching search anchors.
    pub fn with_eligible_candidates(self, count: usize) -> Self {
        {
            let mut state = self.state();
            for i in 0..count {
                let id = format!("blog{i}");
                state
                    .anchor_hrefs
                    .push(format!("https://m.blog.naver.com/FeedList.naver?blogId={id}"));
                state.eligible.insert(id);
            }
        }
        self
    }

    /// Blog ids of every request form that was opened, in order.
    pub fn form_visits(&self) -> Vec<String> {
        self.state()
            .visits
            .iter()
            .filter(|url| url.contains("BuddyAddForm"))
            .filter_map(|url| blog_id_of(url))
            .collect()
    }

    fn page(&self) -> Page {
        let state = self.state();
        page_of(&state.current_url)
    }
}

enum Page {
    Login,
    Search,
    Form(String),
    Other,
}

fn page_of(url: &str) -> Page {
    if url == LOGIN_URL {
        Page::Login
    } else if url.contains("SectionSearch") {
        Page::Search
    } else if url.contains("BuddyAddForm") {
        match blog_id_of(url) {
            Some(id) => Page::Form(id),
            None => Page::Other,
        }
    } else {
        Page::Other
    }
}

fn blog_id_of(url: &str) -> Option<String> {
    url.split("blogId=").nth(1).map(|rest| {
        rest.split('&')
            .next()
            .unwrap_or(rest)
            .to_string()
    })
}

fn not_found(selector: &str) -> BrowserError {
    BrowserError::NotFound { selector: selector.to_string() }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state();
        if let Some(needle) = &state.fail_navigation_to {
            if url.contains(needle.as_str()) {
                return Err(BrowserError::Navigation {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                });
            }
        }
        state.current_url = url.to_string();
        state.visits.push(url.to_string());
        Ok(())
    }

    async fn find(&self, selector: &str) -> Result<ElementHandle, BrowserError> {
        let exists = match self.page() {
            Page::Login => matches!(
                selector,
                selectors::LOGIN_ID | selectors::LOGIN_PW | selectors::LOGIN_SUBMIT
            ),
            Page::Form(id) => match selector {
                selectors::MUTUAL_RADIO => self.state().eligible.contains(&id),
                selectors::MESSAGE_TEXTAREA => self.state().has_textarea,
                selectors::CONFIRM_BUTTON => true,
                _ => false,
            },
            Page::Search | Page::Other => false,
        };
        if exists {
            Ok(ElementHandle(selector.to_string()))
        } else {
            Err(not_found(selector))
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ElementHandle>, BrowserError> {
        let state = self.state();
        match selector {
            selectors::PROFILE_ANCHOR => Ok((0..state.anchor_hrefs.len())
                .map(|i| ElementHandle(format!("anchor#{i}")))
                .collect()),
            selectors::GROUP_OPTIONS => Ok((0..state.group_option_count)
                .map(|i| ElementHandle(format!("group-option#{i}")))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        let page = self.page();
        let mut state = self.state();
        state.clicks.push(element.0.clone());

        if element.0 == selectors::CONFIRM_BUTTON {
            if let Page::Form(id) = page {
                if state.confirm_fail.contains(&id) {
                    return Err(BrowserError::Driver("confirm click intercepted".to_string()));
                }
            }
            state.confirms += 1;
            if let Some((after, flag)) = &state.cancel_after_confirms {
                if state.confirms == *after {
                    flag.set();
                }
            }
        }
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        self.state().typed.remove(&element.0);
        Ok(())
    }

    async fn type_text(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError> {
        self.state()
            .typed
            .entry(element.0.clone())
            .or_default()
            .push_str(text);
        Ok(())
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        if name != "href" {
            return Ok(None);
        }
        let state = self.state();
        let href = element
            .0
            .strip_prefix("anchor#")
            .and_then(|i| i.parse::<usize>().ok())
            .and_then(|i| state.anchor_hrefs.get(i).cloned());
        Ok(href)
    }

    async fn is_interactable(&self, _element: &ElementHandle) -> Result<bool, BrowserError> {
        Ok(true)
    }

    async fn execute(&self, script: &str) -> Result<(), BrowserError> {
        if script.contains("scrollTo") {
            self.state().scrolls += 1;
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.state().close_calls += 1;
        Ok(())
    }
}
