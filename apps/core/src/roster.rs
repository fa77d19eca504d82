//! Student roster lookup.
//!
//! The interpreter only produces candidate names. A roster supplied by the
//! caller maps those names to the opaque student ids the storage layer uses.
//!
//! Roster files are a JSON array:
//!
//! ```json
//! [{ "id": "s-001", "name": "김철수" }, { "id": "s-002", "name": "박영희" }]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AppError;

/// A known student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Opaque identifier owned by the storage layer.
    pub id: String,
    /// Display name as written in commands.
    pub name: String,
}

/// Name → id index over the caller's students.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    by_name: HashMap<String, String>,
}

impl Roster {
    /// Builds a roster. When two students share a name the first one wins.
    pub fn new(students: impl IntoIterator<Item = Student>) -> Self {
        let mut by_name = HashMap::new();
        for student in students {
            let name = student.name.trim().to_string();
            if by_name.contains_key(&name) {
                warn!("Duplicate roster name '{}', keeping the first id", name);
                continue;
            }
            by_name.insert(name, student.id);
        }
        Self { by_name }
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let students: Vec<Student> = serde_json::from_str(json)?;
        Ok(Self::new(students))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let roster = Self::from_json(&content)?;
        info!("Loaded {} students from {:?}", roster.len(), path);
        Ok(roster)
    }

    pub fn student_id(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn student(id: &str, name: &str) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_lookup() {
        let roster = Roster::new(vec![student("s-1", "김철수"), student("s-2", "박영희")]);
        assert_eq!(roster.student_id("김철수"), Some("s-1"));
        assert_eq!(roster.student_id("이민호"), None);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let roster = Roster::new(vec![student("s-1", "김철수"), student("s-9", "김철수 ")]);
        assert_eq!(roster.student_id("김철수"), Some("s-1"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"[{{"id":"s-1","name":"김철수"}}]"#).expect("Failed to write roster");

        let roster = Roster::load(file.path()).expect("Failed to load roster");
        assert_eq!(roster.student_id("김철수"), Some("s-1"));
    }

    #[test]
    fn test_load_errors() {
        let err = Roster::from_json("{not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));

        let err = Roster::load(Path::new("/nonexistent/roster.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
