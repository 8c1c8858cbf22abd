//! Platform bindings: URLs, selectors, scripts, and pacing constants.
//!
//! Everything tying the engine to Naver Blog's pages lives here so a markup
//! change is a one-file fix.

pub const LOGIN_URL: &str = "https://nid.naver.com/nidlogin.login";

const SEARCH_BASE: &str = "https://m.blog.naver.com/SectionSearch.naver";
const BUDDY_FORM_BASE: &str = "https://m.blog.naver.com/BuddyAddForm.naver";

/// Query parameter carrying the blog identifier in profile anchor hrefs.
pub const BLOG_ID_PARAM: &str = "blogId";

/// Mobile search results for `keyword`, relevance-ordered, all periods.
pub fn search_url(keyword: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("orderType", "sim")
        .append_pair("pageAccess", "trend")
        .append_pair("periodType", "all")
        .append_pair("searchValue", keyword)
        .finish();
    format!("{SEARCH_BASE}?{query}")
}

/// Mutual-buddy request form for one blog.
pub fn buddy_form_url(blog_id: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(BLOG_ID_PARAM, blog_id)
        .finish();
    format!("{BUDDY_FORM_BASE}?{query}")
}

pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

pub mod selectors {
    pub const LOGIN_ID: &str = "#id";
    pub const LOGIN_PW: &str = "#pw";
    pub const LOGIN_SUBMIT: &str = r"#log\.login";

    pub const PROFILE_ANCHOR: &str = "a.profile_area__riebt";

    pub const MUTUAL_RADIO: &str = "#bothBuddyRadio";
    pub const MESSAGE_TEXTAREA: &str =
        "#buddyAddForm > fieldset > div > div.set_detail_t1 > div.set_detail_t1 > div > textarea";
    pub const GROUP_OPTIONS: &str = "#buddyGroupSelect option";
    pub const CONFIRM_BUTTON: &str = "body > ui-view > div.head.type1 > a.btn_ok";
}

/// Every fixed pause and bounded wait the engine performs. Waits with a true
/// completion signal (element presence) poll up to their timeout; the settle
/// pauses cover page-side async rendering that exposes no signal.
pub mod timing {
    use std::time::Duration;

    /// How often bounded waits re-probe the page.
    pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

    /// Upper bound for the login identifier field to appear.
    pub const LOGIN_FIELD_TIMEOUT: Duration = Duration::from_secs(10);
    /// Redirect / session-cookie settle after submitting credentials.
    pub const LOGIN_SETTLE: Duration = Duration::from_secs(3);
    /// Inter-keystroke delay while typing credentials.
    pub const TYPE_DELAY: Duration = Duration::from_millis(40);

    /// Settle after opening the search results page.
    pub const SEARCH_SETTLE: Duration = Duration::from_secs(2);
    /// Pause per scroll cycle for lazy-loaded results to render.
    pub const SCROLL_PAUSE: Duration = Duration::from_millis(500);
    /// Final settle after the last scroll cycle.
    pub const POST_SCROLL_SETTLE: Duration = Duration::from_secs(1);

    /// Settle after opening a request form.
    pub const FORM_SETTLE: Duration = Duration::from_secs(2);
    /// Upper bound for the mutual-buddy radio to become interactable.
    /// Deliberately short: a missing radio is the common case (candidate
    /// ineligible or already asked) and must stay cheap.
    pub const ELIGIBILITY_TIMEOUT: Duration = Duration::from_secs(3);
    /// Settle after minor form interactions (radio, textarea, group).
    pub const CONTROL_SETTLE: Duration = Duration::from_millis(500);
    /// Settle after clicking confirm.
    pub const CONFIRM_SETTLE: Duration = Duration::from_secs(1);

    /// Spacing between candidates, rate-limiting the submission loop.
    pub const REQUEST_SPACING: Duration = Duration::from_secs(2);
}

/// Scroll cycles are a tunable upper bound, not a stopping condition: the
/// platform exposes no "no more results" signal.
pub const MIN_SCROLL_CYCLES: usize = 15;
/// Rough yield per scroll cycle used to scale the cycle count with the
/// requested candidate volume.
pub const CANDIDATES_PER_CYCLE: usize = 5;
