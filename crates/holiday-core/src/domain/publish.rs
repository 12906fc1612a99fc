//! Publish model: what the version-control step produced.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// First line of every data commit.
///
/// `[skip ci]` keeps CI from re-running the update job on its own commit.
pub const COMMIT_HEADER: &str = "Update data [skip ci]";

/// Stat-style report of staged changes (`git diff --stat --cached`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffSummary(String);

impl DiffSummary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Whitespace-only output counts as "nothing changed".
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header, blank line, then the diff verbatim.
    pub fn commit_message(&self) -> String {
        format!("{COMMIT_HEADER}\n\n{}", self.0)
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Release tag named after the civil date of the run, `YYYY.MM.DD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn for_date(date: NaiveDate) -> Self {
        Self(format!(
            "{:04}.{:02}.{:02}",
            date.year(),
            date.month(),
            date.day()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    /// Staged content matched HEAD; nothing was committed, tagged or pushed.
    UpToDate,
    Published { tag: TagName, diff: DiffSummary },
}
