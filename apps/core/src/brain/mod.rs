//! # Brain Module
//!
//! Rule-based interpreter for Korean teacher commands. Used when no
//! external interpretation strategy is configured, or when it fails.
//!
//! ## Components
//! - `intent`: Intent classification (schedule / record / parent communication)
//! - `temporal`: Relative and absolute date resolution
//! - `segmenter`: Splitting multi-event commands into fragments
//! - `entities`: Heuristic student name extraction
//! - `severity`: Incident severity tagging
//! - `keywords`: Named keyword sets shared by the classifiers
//! - `interpretation`: Output data structures
//! - `interpreter`: Main orchestrator

pub mod entities;
pub mod intent;
pub mod interpretation;
pub mod interpreter;
pub mod keywords;
pub mod segmenter;
pub mod severity;
pub mod temporal;

pub use entities::{NameExtractor, NameSet};
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use interpretation::{
    ActionIntent, CommunicationAction, Interpretation, RecordAction, ScheduleAction, Source,
};
pub use interpreter::{CommandInterpreter, ExternalInterpreter};
pub use segmenter::{EventFragment, EventSegmenter};
pub use severity::{Severity, SeverityClassifier};
pub use temporal::TemporalResolver;
