//! Severity tagging for incident records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{contains_any, SEVERITY_HIGH, SEVERITY_MEDIUM};

/// Coarse urgency of an incident record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Keyword-tier severity classifier. High cues win over medium cues.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityClassifier;

impl SeverityClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Severity {
        let text = text.to_lowercase();

        if contains_any(&text, SEVERITY_HIGH) {
            Severity::High
        } else if contains_any(&text, SEVERITY_MEDIUM) {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}
