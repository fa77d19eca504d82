//! Interpreter configuration.
//!
//! Defaults match the behavior the storage layer expects; every field can be
//! overridden through `CLASSNOTE_*` environment variables (a `.env` file is
//! loaded by the binary before [`InterpreterConfig::from_env`] runs).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::brain::segmenter::DEFAULT_MIN_FRAGMENT_CHARS;
use crate::error::AppError;

pub const ENV_TITLE_MAX_CHARS: &str = "CLASSNOTE_TITLE_MAX_CHARS";
pub const ENV_MIN_FRAGMENT_CHARS: &str = "CLASSNOTE_MIN_FRAGMENT_CHARS";
pub const ENV_DEFAULT_STUDENT: &str = "CLASSNOTE_DEFAULT_STUDENT";
pub const ENV_DEFAULT_SCHEDULE_TITLE: &str = "CLASSNOTE_DEFAULT_SCHEDULE_TITLE";
pub const ENV_TODAY: &str = "CLASSNOTE_TODAY";
pub const ENV_ROSTER: &str = "CLASSNOTE_ROSTER";

/// Settings for [`CommandInterpreter`](crate::brain::CommandInterpreter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Record titles longer than this are cut and suffixed with `...`.
    #[validate(range(min = 1))]
    pub title_max_chars: usize,
    /// Fragments with this many characters or fewer are dropped.
    pub min_fragment_chars: usize,
    /// Student name used when none could be extracted.
    #[validate(length(min = 1))]
    pub default_student_name: String,
    /// Title used when a schedule command has nothing before its keyword.
    #[validate(length(min = 1))]
    pub default_schedule_title: String,
    /// Fixed anchor date; `None` means the local clock.
    pub today: Option<NaiveDate>,
    /// JSON roster file used to attach student ids.
    pub roster_path: Option<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 20,
            min_fragment_chars: DEFAULT_MIN_FRAGMENT_CHARS,
            default_student_name: "미지정".to_string(),
            default_schedule_title: "새 일정".to_string(),
            today: None,
            roster_path: None,
        }
    }
}

impl InterpreterConfig {
    /// Defaults overridden by whatever `CLASSNOTE_*` variables are set.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(value) = read_var(ENV_TITLE_MAX_CHARS) {
            config.title_max_chars = parse_var(ENV_TITLE_MAX_CHARS, &value)?;
        }
        if let Some(value) = read_var(ENV_MIN_FRAGMENT_CHARS) {
            config.min_fragment_chars = parse_var(ENV_MIN_FRAGMENT_CHARS, &value)?;
        }
        if let Some(value) = read_var(ENV_DEFAULT_STUDENT) {
            config.default_student_name = value;
        }
        if let Some(value) = read_var(ENV_DEFAULT_SCHEDULE_TITLE) {
            config.default_schedule_title = value;
        }
        if let Some(value) = read_var(ENV_TODAY) {
            let today = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
                AppError::Config(format!("{} must be YYYY-MM-DD, got '{}': {}", ENV_TODAY, value, e))
            })?;
            config.today = Some(today);
        }
        if let Some(value) = read_var(ENV_ROSTER) {
            config.roster_path = Some(PathBuf::from(value));
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, value, e)))
}
