//! Event segmentation.
//!
//! Splits one command that describes several events ("A 그리고 B. C") into
//! independent fragments, preserving left-to-right order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Default minimum: fragments with this many characters or fewer are dropped.
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 3;

/// Separators in application order. Each pass re-splits every fragment the
/// previous passes produced. When a pattern has a `keep` group, the cut ends
/// where that group starts, so the captured text stays with the next fragment.
static SEPARATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\s*그리고\s*").expect("Invalid regex: 그리고"),
        Regex::new(r"\s*또한\s*").expect("Invalid regex: 또한"),
        Regex::new(r"\s*그다음(?:에)?\s*").expect("Invalid regex: 그다음"),
        Regex::new(r"하고\s+").expect("Invalid regex: 하고"),
        Regex::new(r"\s*;\s*").expect("Invalid regex: semicolon"),
        Regex::new(r"[.!?]\s*(?P<keep>[가-힣])").expect("Invalid regex: sentence end"),
        Regex::new(r"\s*[\r\n]+\s*").expect("Invalid regex: line break"),
    ]
});

/// One segmented event: trimmed, longer than the minimum, terminated by
/// `.`, `!` or `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFragment(String);

impl EventFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EventFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits commands into event fragments.
#[derive(Debug, Clone)]
pub struct EventSegmenter {
    min_fragment_chars: usize,
}

impl Default for EventSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSegmenter {
    pub fn new() -> Self {
        Self::with_min_chars(DEFAULT_MIN_FRAGMENT_CHARS)
    }

    pub fn with_min_chars(min_fragment_chars: usize) -> Self {
        Self { min_fragment_chars }
    }

    pub fn segment(&self, text: &str) -> Vec<EventFragment> {
        let pieces = SEPARATORS
            .iter()
            .fold(vec![text.to_string()], |pieces, separator| {
                pieces
                    .iter()
                    .flat_map(|piece| split_on(separator, piece))
                    .collect()
            });

        let fragments: Vec<EventFragment> = pieces
            .into_iter()
            .filter_map(|piece| self.finish(&piece))
            .collect();

        debug!(count = fragments.len(), "segmented command");
        fragments
    }

    fn finish(&self, piece: &str) -> Option<EventFragment> {
        let trimmed = piece.trim();
        if trimmed.chars().count() <= self.min_fragment_chars {
            return None;
        }

        let mut text = trimmed.to_string();
        if !text.ends_with(['.', '!', '?']) {
            text.push('.');
        }
        Some(EventFragment(text))
    }
}

fn split_on(separator: &Regex, text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for caps in separator.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let cut_end = caps.name("keep").map_or(whole.end(), |keep| keep.start());
        // Sentence-final punctuation belongs to the fragment it ends.
        let cut_start = if caps.name("keep").is_some() {
            whole.start() + 1
        } else {
            whole.start()
        };

        pieces.push(text[start..cut_start].to_string());
        start = cut_end;
    }

    pieces.push(text[start..].to_string());
    pieces
}
