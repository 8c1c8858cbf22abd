//! Candidate identifiers and the dedup-ordered list they are collected into.

use std::collections::HashSet;
use std::fmt;

/// One discovered blog identifier, eligible (until proven otherwise) for a
/// mutual-buddy request. Equality is by identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered candidate collection. Insertion order is first-seen order during
/// extraction; duplicate identifiers are rejected on push.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    order: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the identifier was already seen. Returns whether the
    /// candidate was kept.
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if self.seen.insert(candidate.id().to_string()) {
            self.order.push(candidate);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.order.iter()
    }
}

impl IntoIterator for CandidateList {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl FromIterator<Candidate> for CandidateList {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut list = Self::new();
        for candidate in iter {
            list.push(candidate);
        }
        list
    }
}
