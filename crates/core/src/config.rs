//! Run configuration, built once from validated input and immutable for the
//! duration of a run.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::naver::{CANDIDATES_PER_CYCLE, MIN_SCROLL_CYCLES};

/// How many requests one run may send. Closed set by design: the platform
/// rate-limits aggressively, so arbitrary counts are not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCount {
    Thirty,
    Fifty,
    Hundred,
}

impl TargetCount {
    pub const fn as_usize(self) -> usize {
        match self {
            TargetCount::Thirty => 30,
            TargetCount::Fifty => 50,
            TargetCount::Hundred => 100,
        }
    }

    /// Incremental-load scroll cycles needed for this volume, never below
    /// the floor that keeps small targets supplied with results.
    pub fn scroll_cycles(self) -> usize {
        MIN_SCROLL_CYCLES.max(self.as_usize() / CANDIDATES_PER_CYCLE)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid target count {0:?}, expected one of 30, 50, 100")]
pub struct InvalidTargetCount(String);

impl FromStr for TargetCount {
    type Err = InvalidTargetCount;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "30" => Ok(TargetCount::Thirty),
            "50" => Ok(TargetCount::Fifty),
            "100" => Ok(TargetCount::Hundred),
            other => Err(InvalidTargetCount(other.to_string())),
        }
    }
}

impl fmt::Display for TargetCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Platform account identifier.
    pub identifier: String,
    /// Platform account password.
    pub secret: String,
    /// Search keyword used to discover candidates.
    pub keyword: String,
    /// Message attached to each request.
    pub message: String,
    pub target: TargetCount,
    /// Blog identifiers never to contact. Case-sensitive.
    pub exclusions: HashSet<String>,
}

/// Parses a newline-or-comma-delimited exclusion list into a set of
/// trimmed, non-empty identifiers.
pub fn parse_exclusions(input: &str) -> HashSet<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
