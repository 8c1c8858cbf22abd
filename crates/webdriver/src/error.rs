use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The remote end refused to create a session (driver missing, browser
    /// version mismatch, endpoint unreachable).
    #[error("webdriver session could not be created: {0}")]
    SessionCreate(String),

    /// W3C "no such element" for the given selector.
    #[error("no such element: {selector}")]
    NoSuchElement { selector: String },

    /// Any other W3C error payload, e.g. "stale element reference" or
    /// "javascript error".
    #[error("webdriver error [{code}]: {message}")]
    Wire { code: String, message: String },

    #[error("webdriver transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed webdriver response: {0}")]
    Malformed(String),
}

impl Error {
    pub(crate) fn from_wire(code: String, message: String) -> Self {
        Error::Wire { code, message }
    }

    /// Whether this is the W3C "no such element" / "stale element reference"
    /// family, i.e. the element is gone rather than the driver broken.
    pub fn is_element_missing(&self) -> bool {
        match self {
            Error::NoSuchElement { .. } => true,
            Error::Wire { code, .. } => {
                code == "no such element" || code == "stale element reference"
            }
            _ => false,
        }
    }
}
