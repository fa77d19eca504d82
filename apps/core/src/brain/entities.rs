//! Student name extraction.
//!
//! Heuristic scans for 2–3 syllable Hangul tokens in name-like positions.
//! No NER model is involved: false positives such as `장난` in `장난을`
//! are expected, and callers treat the result as candidates only.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

use super::keywords::{ACTION_STEMS, NAME_STOPWORDS};

/// Token followed by a subject/object/dative particle or honorific.
static PARTICLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([가-힣]{2,3})(?:에게|한테|학생|이|가|를|을|와|과|님)")
        .expect("Invalid regex: particle-following name")
});

/// Token followed by a possessive or locative marker.
static POSSESSIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([가-힣]{2,3})(?:의|에서|에|과|와)")
        .expect("Invalid regex: possessive-following name")
});

/// "<name>에 대해" / "<name> 대해".
static ABOUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([가-힣]{2,3})(?:에)?\s?대해").expect("Invalid regex: contextual name")
});

/// "<name>가 장난..." and other reporting/behavior stems.
static ACTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let stems = ACTION_STEMS
        .iter()
        .map(|stem| regex::escape(stem))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b([가-힣]{{2,3}})(?:가|이)\s*(?:{stems})"))
        .expect("Invalid regex: action-following name")
});

/// Deduplicated candidate names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSet(Vec<String>);

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.0.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Extracts candidate student names from free text.
pub struct NameExtractor {
    stopwords: HashSet<&'static str>,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor {
    pub fn new() -> Self {
        Self {
            stopwords: NAME_STOPWORDS.iter().copied().collect(),
        }
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Union of the four scans, minus stop-words.
    pub fn extract(&self, text: &str) -> NameSet {
        let mut names = NameSet::new();

        for pattern in [
            &*PARTICLE_PATTERN,
            &*POSSESSIVE_PATTERN,
            &*ABOUT_PATTERN,
            &*ACTION_PATTERN,
        ] {
            for caps in pattern.captures_iter(text) {
                if let Some(token) = caps.get(1) {
                    let token = token.as_str();
                    if !self.is_stopword(token) {
                        names.insert(token);
                    }
                }
            }
        }

        debug!(count = names.len(), "extracted name candidates");
        names
    }
}
