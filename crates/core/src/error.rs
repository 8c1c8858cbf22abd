use thiserror::Error;

/// Cap on diagnostic text surfaced to the event stream; driver errors can
/// embed whole DOM dumps.
pub const DIAG_LIMIT: usize = 100;

/// Failures crossing the [`crate::Browser`] boundary.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("element not found: {selector}")]
    NotFound { selector: String },

    #[error("timed out after {ms}ms waiting for {selector}")]
    Timeout { selector: String, ms: u64 },

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("driver error: {0}")]
    Driver(String),
}

/// The automation resource could not be created. Fatal to the run.
#[derive(Debug, Error)]
#[error("browser launch failed: {0}")]
pub struct LaunchError(String);

impl LaunchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The login sequence failed. Fatal to the run; the browser's state is
/// undefined afterwards and must not be reused.
#[derive(Debug, Error)]
#[error("login failed: {0}")]
pub struct AuthError(String);

impl From<BrowserError> for AuthError {
    fn from(err: BrowserError) -> Self {
        Self(truncate_diag(&err.to_string()))
    }
}

/// Truncates a diagnostic to [`DIAG_LIMIT`] characters on a char boundary.
pub fn truncate_diag(message: &str) -> String {
    match message.char_indices().nth(DIAG_LIMIT) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
