//! Interpretation - output structures of the command interpreter.
//!
//! Each [`ActionIntent`] maps onto one storage operation owned by the caller
//! (create-schedule, create-record, create-parent-communication).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::intent::Intent;
use super::severity::Severity;

/// Calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAction {
    pub title: String,
    pub date: NaiveDate,
}

/// Incident / behavior record for one event fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAction {
    /// Fragment cut to the configured length, `...` appended when cut
    pub title: String,
    /// Full fragment text
    pub description: String,
    pub date: NaiveDate,
    pub severity: Severity,
    /// Candidate student names found in the fragment
    pub names: Vec<String>,
    /// Roster ids for the names the roster knows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub student_ids: Vec<String>,
}

/// Log entry for a conversation that already happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationAction {
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub purpose: String,
    pub summary: String,
    pub date: NaiveDate,
}

/// One structured action derived from a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionIntent {
    Schedule(ScheduleAction),
    Record(RecordAction),
    ParentCommunication(CommunicationAction),
}

impl ActionIntent {
    pub fn intent(&self) -> Intent {
        match self {
            ActionIntent::Schedule(_) => Intent::Schedule,
            ActionIntent::Record(_) => Intent::Record,
            ActionIntent::ParentCommunication(_) => Intent::ParentCommunication,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            ActionIntent::Schedule(action) => action.date,
            ActionIntent::Record(action) => action.date,
            ActionIntent::ParentCommunication(action) => action.date,
        }
    }
}

/// Which path produced the actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    RuleBased,
    External,
}

/// Complete result for one command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    /// Original command
    pub command: String,

    /// Date relative expressions were resolved against
    pub anchor: NaiveDate,

    /// Classified intent of the command as a whole
    pub intent: Intent,

    /// Actions for the storage layer, in emission order
    pub actions: Vec<ActionIntent>,

    pub source: Source,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl Interpretation {
    /// True when nothing could be parsed; callers report this to the user.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {}, Actions: {}, Source: {:?}, Anchor: {}",
            self.intent,
            self.actions.len(),
            self.source,
            self.anchor
        )
    }
}
