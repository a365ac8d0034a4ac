//! Document identifier minting.
use std::sync::LazyLock;

use chrono::Utc;
use log::{debug, warn};
use regex::Regex;

static COUNTER_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"doc-\d+-(\d+)").unwrap());

/// The two kinds of user document the application creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Document,
    Note,
}

impl DocumentKind {
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::Document => "doc",
            DocumentKind::Note => "note",
        }
    }

    /// Sidebar name for the n-th created document of this kind.
    pub fn default_name(&self, counter: u64) -> String {
        match self {
            DocumentKind::Document => format!("New Document {}", counter),
            DocumentKind::Note => format!("New Note {}", counter),
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            DocumentKind::Document => "NEW DOCUMENT",
            DocumentKind::Note => "NEW NOTE",
        }
    }
}

/// Mints ids of the form `<kind>-<millis>-<counter>`.
///
/// The counter strictly increases for every id handed out, so ids stay unique
/// even when two are minted within the same millisecond.
#[derive(Debug, Default)]
pub struct IdentifierGenerator {
    counter: u64,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the generator from the ids of existing active records.
    pub fn recover_counter<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let counter = ids.into_iter().map(counter_suffix).max().unwrap_or(0);
        debug!("Recovered identifier counter: {}", counter);
        Self { counter }
    }

    /// Mints a fresh id, returning it with the counter value it carries.
    ///
    /// A counter recovered at `u64::MAX` restarts from 1; the millisecond
    /// part keeps the id fresh and the repository re-mints on collision.
    pub fn next(&mut self, kind: DocumentKind) -> (String, u64) {
        self.counter = self.counter.checked_add(1).unwrap_or_else(|| {
            warn!("Identifier counter exhausted, restarting from 1");
            1
        });
        let id = format!(
            "{}-{}-{}",
            kind.tag(),
            Utc::now().timestamp_millis(),
            self.counter
        );
        (id, self.counter)
    }
}

/// Numeric group after a `doc-<timestamp>-` prefix, or 0.
fn counter_suffix(id: &str) -> u64 {
    COUNTER_SUFFIX_RE
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
