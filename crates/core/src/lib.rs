// buddybot: mutual-buddy request automation engine for Naver Blog.
//
// The engine is driver-agnostic: everything is written against the narrow
// [`Browser`] capability trait, and the actual WebDriver client is adapted
// to it by the CLI crate. The run flow is login -> candidate extraction ->
// per-candidate request submission, orchestrated by [`run::run`].

pub mod browser;
pub mod candidate;
pub mod config;
pub mod error;
pub mod events;
pub mod extract;
pub mod naver;
pub mod run;
pub mod session;
pub mod submit;

pub use browser::{Browser, ElementHandle};
pub use candidate::{Candidate, CandidateList};
pub use config::{RunConfig, TargetCount};
pub use error::{AuthError, BrowserError, LaunchError};
pub use events::{EventSink, LogEvent, Severity};
pub use run::{CancelFlag, RunSummary, Terminal};
pub use submit::RequestOutcome;
