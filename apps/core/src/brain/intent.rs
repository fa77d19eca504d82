//! Intent classification for teacher commands.
//!
//! Decides whether a command is a calendar entry, an incident record, a
//! parent-communication note, or nothing we understand. Pure keyword and
//! regex matching, first matching branch wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::keywords::{
    contains_any, matched, CONSULTATION_KEYWORDS, FUTURE_INDICATORS, PAST_INDICATORS,
    RECORD_KEYWORDS, SCHEDULE_KEYWORDS,
};

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Calendar entry
    Schedule,
    /// Incident / behavior record
    Record,
    /// Log of a conversation with a parent
    ParentCommunication,
    /// Nothing recognised
    Unclassified,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Schedule => "schedule",
            Intent::Record => "record",
            Intent::ParentCommunication => "parent_communication",
            Intent::Unclassified => "unclassified",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// Whether the consultation branch made the decision
    pub consultation: bool,
    /// Keywords and patterns that drove the decision
    pub matched_keywords: Vec<String>,
}

impl IntentResult {
    fn new(intent: Intent, consultation: bool, matched_keywords: Vec<String>) -> Self {
        Self {
            intent,
            consultation,
            matched_keywords,
        }
    }
}

// Date-shaped text also signals a consultation that is still ahead.
// NOTE: expect() is acceptable here: constant patterns, exercised by tests.
static FUTURE_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"[0-9]{1,2}/[0-9]{1,2}").expect("Invalid regex: slash date"),
        Regex::new(r"[0-9]{1,2}월\s*[0-9]{1,2}일").expect("Invalid regex: month day"),
        Regex::new(r"[월화수목금토일]요일").expect("Invalid regex: weekday"),
    ]
});

/// Intent classifier using keyword sets
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify the intent of a command
    pub fn classify(&self, text: &str) -> IntentResult {
        let text = text.trim();

        if contains_any(text, CONSULTATION_KEYWORDS) {
            return self.classify_consultation(text);
        }

        let schedule_hits = matched(text, SCHEDULE_KEYWORDS);
        if !schedule_hits.is_empty() {
            return IntentResult::new(Intent::Schedule, false, into_strings(schedule_hits));
        }

        let record_hits = matched(text, RECORD_KEYWORDS);
        if !record_hits.is_empty() {
            return IntentResult::new(Intent::Record, false, into_strings(record_hits));
        }

        IntentResult::new(Intent::Unclassified, false, vec![])
    }

    /// "상담" is used both for appointments ahead and conversations already
    /// held. Future cues without past cues mean a calendar entry; anything
    /// else is logged as a parent communication.
    fn classify_consultation(&self, text: &str) -> IntentResult {
        let mut future: Vec<String> = into_strings(matched(text, FUTURE_INDICATORS));
        for pattern in FUTURE_DATE_PATTERNS.iter() {
            if let Some(m) = pattern.find(text) {
                future.push(m.as_str().to_string());
            }
        }
        let past = into_strings(matched(text, PAST_INDICATORS));

        if !future.is_empty() && past.is_empty() {
            IntentResult::new(Intent::Schedule, true, future)
        } else {
            IntentResult::new(Intent::ParentCommunication, true, past)
        }
    }
}

fn into_strings(keywords: Vec<&str>) -> Vec<String> {
    keywords.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_consultation_is_schedule() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("내일 오후 2시에 학부모 상담 일정 추가해줘");
        assert_eq!(result.intent, Intent::Schedule);
        assert!(result.consultation);

        let result = classifier.classify("5/20 민수 어머니 상담");
        assert_eq!(result.intent, Intent::Schedule);

        let result = classifier.classify("금요일 학부모 면담 잡기");
        assert_eq!(result.intent, Intent::Schedule);
    }

    #[test]
    fn test_past_consultation_is_communication() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("김루피가 이빙봉 놀려서 지도하고 학부모 상담 진행함");
        assert_eq!(result.intent, Intent::ParentCommunication);
        assert!(result.matched_keywords.contains(&"진행".to_string()));

        // Future and past cues together: past wins.
        let result = classifier.classify("내일 다시 연락하기로 하고 상담 완료");
        assert_eq!(result.intent, Intent::ParentCommunication);
    }

    #[test]
    fn test_consultation_without_cues_is_communication() {
        let classifier = IntentClassifier::new();
        let result = classifier.classify("학부모 상담");
        assert_eq!(result.intent, Intent::ParentCommunication);
    }

    #[test]
    fn test_generic_schedule() {
        let classifier = IntentClassifier::new();

        for text in ["교무 회의", "체육대회 일정", "병원 약속", "주간 스케줄 확인"] {
            let result = classifier.classify(text);
            assert_eq!(result.intent, Intent::Schedule, "Expected Schedule for '{}'", text);
            assert!(!result.consultation);
        }
    }

    #[test]
    fn test_record() {
        let classifier = IntentClassifier::new();

        for text in [
            "복도에서 사건 기록",
            "김철수가 수업 중 떠들었다",
            "생활지도 필요",
            "박영희가 숙제를 안 냈다",
        ] {
            let result = classifier.classify(text);
            assert_eq!(result.intent, Intent::Record, "Expected Record for '{}'", text);
        }
    }

    #[test]
    fn test_unclassified() {
        let classifier = IntentClassifier::new();

        for text in ["", "   ", "안녕하세요", "hello"] {
            let result = classifier.classify(text);
            assert_eq!(result.intent, Intent::Unclassified, "Expected Unclassified for '{}'", text);
            assert!(result.matched_keywords.is_empty());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Intent::ParentCommunication.to_string(), "parent_communication");
        assert_eq!(
            serde_json::to_string(&Intent::Unclassified).unwrap(),
            "\"unclassified\""
        );
    }
}
