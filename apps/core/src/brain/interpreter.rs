//! Command Interpreter - main orchestrator for the brain module.
//!
//! Runs intent classification first, then the stages that branch needs:
//! temporal resolution, event segmentation, name extraction and severity
//! tagging. Produces the [`ActionIntent`]s the storage layer persists.
//!
//! An optional [`ExternalInterpreter`] is tried first when one is supplied;
//! the rule-based pipeline is the fallback.

use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::entities::NameExtractor;
use super::intent::{Intent, IntentClassifier};
use super::interpretation::{
    ActionIntent, CommunicationAction, Interpretation, RecordAction, ScheduleAction, Source,
};
use super::keywords::SCHEDULE_KEYWORDS;
use super::segmenter::EventSegmenter;
use super::severity::SeverityClassifier;
use super::temporal::TemporalResolver;
use crate::config::InterpreterConfig;
use crate::error::AppError;
use crate::roster::Roster;

/// Strategy that interprets a command some other way (e.g. a hosted model).
pub trait ExternalInterpreter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn interpret(&self, command: &str, anchor: NaiveDate) -> Result<Vec<ActionIntent>, AppError>;
}

/// Turns teacher commands into structured actions.
pub struct CommandInterpreter {
    intent_classifier: IntentClassifier,
    temporal_resolver: TemporalResolver,
    segmenter: EventSegmenter,
    name_extractor: NameExtractor,
    severity_classifier: SeverityClassifier,
    config: InterpreterConfig,
    roster: Option<Roster>,
    external: Option<Box<dyn ExternalInterpreter>>,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    /// Create an interpreter with default settings
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            temporal_resolver: TemporalResolver::new(),
            segmenter: EventSegmenter::with_min_chars(config.min_fragment_chars),
            name_extractor: NameExtractor::new(),
            severity_classifier: SeverityClassifier::new(),
            config,
            roster: None,
            external: None,
        }
    }

    /// Attach the caller's roster so actions carry student ids.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Try `external` before the rule-based pipeline.
    pub fn with_external(mut self, external: Box<dyn ExternalInterpreter>) -> Self {
        self.external = Some(external);
        self
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interpret one command against `anchor` ("today").
    pub fn interpret(&self, command: &str, anchor: NaiveDate) -> Interpretation {
        let start = Instant::now();

        let (intent, mut actions, source) = match self.try_external(command, anchor) {
            Some(actions) => {
                let intent = actions
                    .first()
                    .map(ActionIntent::intent)
                    .unwrap_or(Intent::Unclassified);
                (intent, actions, Source::External)
            }
            None => {
                let (intent, actions) = self.rule_based(command, anchor);
                (intent, actions, Source::RuleBased)
            }
        };

        self.attach_student_ids(&mut actions);

        let interpretation = Interpretation {
            command: command.to_string(),
            anchor,
            intent,
            actions,
            source,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!("{}", interpretation.summary());
        interpretation
    }

    fn try_external(&self, command: &str, anchor: NaiveDate) -> Option<Vec<ActionIntent>> {
        let external = self.external.as_ref()?;
        match external.interpret(command, anchor) {
            Ok(actions) => Some(actions),
            Err(e) => {
                warn!(
                    "External interpreter '{}' failed, using rule-based fallback: {}",
                    external.name(),
                    e
                );
                None
            }
        }
    }

    /// The deterministic pipeline on its own.
    pub fn rule_based(&self, command: &str, anchor: NaiveDate) -> (Intent, Vec<ActionIntent>) {
        let result = self.intent_classifier.classify(command);
        debug!(
            intent = %result.intent,
            consultation = result.consultation,
            matched = ?result.matched_keywords,
            "classified command"
        );

        let actions = match (result.intent, result.consultation) {
            (Intent::Schedule, true) => vec![self.consultation_schedule(command, anchor)],
            (Intent::Schedule, false) => vec![self.generic_schedule(command, anchor)],
            (Intent::ParentCommunication, _) => vec![self.communication(command, anchor)],
            (Intent::Record, _) => self.records(command, anchor),
            (Intent::Unclassified, _) => vec![],
        };

        (result.intent, actions)
    }

    fn consultation_schedule(&self, command: &str, anchor: NaiveDate) -> ActionIntent {
        let names = self.name_extractor.extract(command);
        let title = match names.first() {
            Some(name) => format!("{} 학부모 상담", name),
            None => "학부모 상담".to_string(),
        };

        ActionIntent::Schedule(ScheduleAction {
            title,
            date: self.temporal_resolver.resolve(command, anchor),
        })
    }

    /// Title is whatever precedes the earliest schedule keyword in the text.
    /// The date is the anchor: this path does not resolve date expressions.
    fn generic_schedule(&self, command: &str, anchor: NaiveDate) -> ActionIntent {
        let command = command.trim();
        let title = SCHEDULE_KEYWORDS
            .iter()
            .filter_map(|keyword| command.find(keyword))
            .min()
            .map(|idx| command[..idx].trim())
            .filter(|title| !title.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_schedule_title.clone());

        ActionIntent::Schedule(ScheduleAction {
            title,
            date: anchor,
        })
    }

    fn communication(&self, command: &str, anchor: NaiveDate) -> ActionIntent {
        let names = self.name_extractor.extract(command);
        let student_name = names
            .first()
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_student_name.clone());

        ActionIntent::ParentCommunication(CommunicationAction {
            student_name,
            student_id: None,
            purpose: command.to_string(),
            summary: command.to_string(),
            date: self.temporal_resolver.resolve(command, anchor),
        })
    }

    /// One record per fragment. A fragment's own date expression wins over
    /// the command-level date.
    fn records(&self, command: &str, anchor: NaiveDate) -> Vec<ActionIntent> {
        let command_date = self.temporal_resolver.resolve(command, anchor);

        self.segmenter
            .segment(command)
            .into_iter()
            .map(|fragment| {
                let text = fragment.as_str();
                let date = self
                    .temporal_resolver
                    .find(text, anchor)
                    .unwrap_or(command_date);

                ActionIntent::Record(RecordAction {
                    title: truncate_title(text, self.config.title_max_chars),
                    description: text.to_string(),
                    date,
                    severity: self.severity_classifier.classify(text),
                    names: self.name_extractor.extract(text).into_vec(),
                    student_ids: vec![],
                })
            })
            .collect()
    }

    fn attach_student_ids(&self, actions: &mut [ActionIntent]) {
        let Some(roster) = &self.roster else {
            return;
        };

        for action in actions.iter_mut() {
            match action {
                ActionIntent::Record(record) => {
                    record.student_ids = record
                        .names
                        .iter()
                        .filter_map(|name| roster.student_id(name))
                        .map(str::to_string)
                        .collect();
                }
                ActionIntent::ParentCommunication(communication) => {
                    if communication.student_id.is_none() {
                        communication.student_id = roster
                            .student_id(&communication.student_name)
                            .map(str::to_string);
                    }
                }
                ActionIntent::Schedule(_) => {}
            }
        }
    }
}

fn truncate_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::severity::Severity;
    use crate::roster::Student;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("짧은 제목.", 20), "짧은 제목.");
        assert_eq!(truncate_title("가나다라마바사", 3), "가나다...");
        assert_eq!(truncate_title("가나다", 3), "가나다");
    }

    #[test]
    fn test_generic_schedule_title() {
        let interpreter = CommandInterpreter::new();

        let (intent, actions) = interpreter.rule_based("다음 주 교무 회의", anchor());
        assert_eq!(intent, Intent::Schedule);
        assert_eq!(
            actions,
            vec![ActionIntent::Schedule(ScheduleAction {
                title: "다음 주 교무".to_string(),
                date: anchor(),
            })]
        );

        let (_, actions) = interpreter.rule_based("회의", anchor());
        match &actions[0] {
            ActionIntent::Schedule(s) => assert_eq!(s.title, "새 일정"),
            other => panic!("Expected schedule, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_schedule_title_cuts_at_earliest_keyword() {
        let interpreter = CommandInterpreter::new();

        let (_, actions) = interpreter.rule_based("회의 일정 잡기", anchor());
        match &actions[0] {
            ActionIntent::Schedule(s) => assert_eq!(s.title, "새 일정"),
            other => panic!("Expected schedule, got {:?}", other),
        }

        let (_, actions) = interpreter.rule_based("학년 회의 일정 공유", anchor());
        match &actions[0] {
            ActionIntent::Schedule(s) => assert_eq!(s.title, "학년"),
            other => panic!("Expected schedule, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_schedule_ignores_dates() {
        let interpreter = CommandInterpreter::new();
        let (_, actions) = interpreter.rule_based("내일 체육대회 일정", anchor());
        assert_eq!(actions[0].date(), anchor());
    }

    #[test]
    fn test_consultation_schedule_title_and_date() {
        let interpreter = CommandInterpreter::new();
        let (_, actions) = interpreter.rule_based("내일 김철수 학부모 상담 예정", anchor());
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            ActionIntent::Schedule(s) => {
                assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 5, 16).unwrap());
                assert!(s.title.ends_with("학부모 상담"));
            }
            other => panic!("Expected schedule, got {:?}", other),
        }
    }

    #[test]
    fn test_communication_default_student() {
        let interpreter = CommandInterpreter::new();
        let (_, actions) = interpreter.rule_based("어제 학부모 상담 완료", anchor());
        match &actions[0] {
            ActionIntent::ParentCommunication(c) => {
                assert_eq!(c.student_name, "미지정");
                assert_eq!(c.purpose, "어제 학부모 상담 완료");
                assert_eq!(c.summary, c.purpose);
                assert_eq!(c.date, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
            }
            other => panic!("Expected communication, got {:?}", other),
        }
    }

    #[test]
    fn test_record_fragment_date_and_severity() {
        let interpreter = CommandInterpreter::new();
        let (_, actions) =
            interpreter.rule_based("어제 김철수가 친구를 가격함. 오늘 박영희가 지각함", anchor());
        assert_eq!(actions.len(), 2);

        match (&actions[0], &actions[1]) {
            (ActionIntent::Record(first), ActionIntent::Record(second)) => {
                assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
                assert_eq!(first.severity, Severity::High);
                assert!(first.names.contains(&"김철수".to_string()));
                assert_eq!(second.date, anchor());
                assert_eq!(second.severity, Severity::Low);
            }
            other => panic!("Expected two records, got {:?}", other),
        }
    }

    #[test]
    fn test_record_title_truncated() {
        let interpreter = CommandInterpreter::new();
        let (_, actions) = interpreter.rule_based(
            "점심시간에 운동장에서 공놀이를 하다가 유리창을 깨뜨리는 사건 발생",
            anchor(),
        );
        match &actions[0] {
            ActionIntent::Record(r) => {
                assert!(r.title.ends_with("..."));
                assert_eq!(r.title.chars().count(), 23);
                assert!(r.description.ends_with('.'));
            }
            other => panic!("Expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_roster_ids_attached() {
        let roster = Roster::new(vec![Student {
            id: "s-7".to_string(),
            name: "김철수".to_string(),
        }]);
        let interpreter = CommandInterpreter::new().with_roster(roster);

        let result = interpreter.interpret("김철수가 수업 중 떠들었다", anchor());
        match &result.actions[0] {
            ActionIntent::Record(r) => assert_eq!(r.student_ids, vec!["s-7".to_string()]),
            other => panic!("Expected record, got {:?}", other),
        }

        let result = interpreter.interpret("김철수에 대해 학부모 상담 완료", anchor());
        match &result.actions[0] {
            ActionIntent::ParentCommunication(c) => {
                assert_eq!(c.student_name, "김철수");
                assert_eq!(c.student_id.as_deref(), Some("s-7"));
            }
            other => panic!("Expected communication, got {:?}", other),
        }
    }

    #[test]
    fn test_unclassified_is_empty() {
        let interpreter = CommandInterpreter::new();
        let result = interpreter.interpret("안녕하세요", anchor());
        assert!(result.is_empty());
        assert_eq!(result.intent, Intent::Unclassified);
        assert_eq!(result.source, Source::RuleBased);
    }
}
