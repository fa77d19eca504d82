//! Keyword sets shared by the classifiers.
//!
//! Every cue the interpreter reacts to lives here under a name, so the
//! matching code and the tests can enumerate them independently.

/// Either of these routes a command into the consultation branch.
pub const CONSULTATION_KEYWORDS: &[&str] = &["상담", "학부모"];

/// Cues that a consultation is yet to happen.
pub const FUTURE_INDICATORS: &[&str] = &[
    "예정",
    "계획",
    "할 예정",
    "예약",
    "일정",
    "내일",
    "다음",
];

/// Cues that a consultation already took place.
///
/// Known quirk: `진행` alone counts as past, so "상담 진행 예정" lands on
/// the communication log even though it talks about the future.
pub const PAST_INDICATORS: &[&str] = &[
    "했음",
    "완료",
    "진행했음",
    "이야기했음",
    "약속했음",
    "진행",
    "했습니다",
    "했다",
    "하였",
    "나눴",
    "통화했",
    "통화함",
    "면담함",
    "상담함",
    "전달했",
    "전달함",
];

/// Generic scheduling cues, tried in this order when deriving a title.
pub const SCHEDULE_KEYWORDS: &[&str] = &["일정", "스케줄", "약속", "회의"];

/// Incident cues. The first four are explicit record words, the rest are
/// behavior verbs and nouns that describe an incident on their own.
pub const RECORD_KEYWORDS: &[&str] = &[
    "기록",
    "사건",
    "문제",
    "생활지도",
    "떠들",
    "장난",
    "싸움",
    "싸웠",
    "때렸",
    "지각",
    "결석",
    "숙제",
    "욕설",
    "놀렸",
    "울었",
    "폭력",
];

/// High severity cues.
pub const SEVERITY_HIGH: &[&str] = &["폭력", "위험", "심각", "가격", "잡아당기"];

/// Medium severity cues.
pub const SEVERITY_MEDIUM: &[&str] = &["주의", "문제", "생활지도"];

/// Common nouns that look like names next to a particle.
pub const NAME_STOPWORDS: &[&str] = &[
    "이야기",
    "문제",
    "상황",
    "경우",
    "때문",
    "관련",
    "발생",
    "처리",
];

/// Reporting and behavior stems that follow `<name>가` / `<name>이`.
///
/// Longer stems come first so the alternation prefers them.
pub const ACTION_STEMS: &[&str] = &[
    "했다",
    "말했",
    "있다",
    "소리",
    "화가",
    "장난",
    "때렸",
    "싸웠",
    "울었",
    "놀렸",
    "떠들",
    "했",
];

/// Returns every member of `set` that occurs in `text`, in set order.
pub fn matched(text: &str, set: &[&'static str]) -> Vec<&'static str> {
    set.iter().copied().filter(|kw| text.contains(kw)).collect()
}

/// True when any member of `set` occurs in `text`.
pub fn contains_any(text: &str, set: &[&str]) -> bool {
    set.iter().any(|kw| text.contains(kw))
}
