//! Temporal resolution of Korean date expressions.
//!
//! Turns `5/3`, `5/3~5/7`, `내일`, `지난 금요일`, `다음 월요일` or `3월 14일`
//! into a calendar date relative to a caller-supplied anchor ("today").
//! Resolution is total: anything unrecognised resolves to the anchor.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

// NOTE: expect() is acceptable here: the patterns are constant and covered by tests.
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})/([0-9]{1,2})\s*[~\-]\s*[0-9]{1,2}/[0-9]{1,2}")
        .expect("Invalid regex: date range")
});

static SLASH_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})/([0-9]{1,2})").expect("Invalid regex: slash date")
});

// A bare weekday syllable must not run into another Hangul syllable:
// "다음 수업" and "지난 일주일" are not weekdays.
static LAST_WEEKDAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"지난\s*(월|화|수|목|금|토|일)(?:요일|[^가-힣]|$)")
        .expect("Invalid regex: last weekday")
});

static NEXT_WEEKDAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"다음\s*(월|화|수|목|금|토|일)(?:요일|[^가-힣]|$)")
        .expect("Invalid regex: next weekday")
});

static MONTH_DAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})월\s*([0-9]{1,2})일").expect("Invalid regex: month day prose")
});

/// Relative day keywords and their offset from the anchor, checked in order.
const RELATIVE_DAYS: &[(&str, i64)] = &[("오늘", 0), ("어제", -1), ("내일", 1)];

/// Resolves date expressions against an anchor date.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalResolver;

impl TemporalResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the first date expression in `text`, falling back to `anchor`.
    pub fn resolve(&self, text: &str, anchor: NaiveDate) -> NaiveDate {
        self.find(text, anchor).unwrap_or(anchor)
    }

    /// Like [`resolve`](Self::resolve), but `None` when no rule matched.
    ///
    /// Rules are tried in a fixed order and the first hit wins:
    /// range, `M/D`, relative days, `지난 <요일>`, `다음 <요일>`, `M월 D일`.
    /// A month/day pair that is not a real date does not count as a hit.
    pub fn find(&self, text: &str, anchor: NaiveDate) -> Option<NaiveDate> {
        if let Some(date) = RANGE_PATTERN
            .captures(text)
            .and_then(|caps| month_day(&caps, anchor))
        {
            debug!(%date, "resolved date range start");
            return Some(date);
        }

        if let Some(date) = SLASH_DATE_PATTERN
            .captures(text)
            .and_then(|caps| month_day(&caps, anchor))
        {
            debug!(%date, "resolved slash date");
            return Some(date);
        }

        for (keyword, offset) in RELATIVE_DAYS {
            if text.contains(keyword) {
                if let Some(date) = shift(anchor, *offset) {
                    debug!(%date, keyword, "resolved relative day");
                    return Some(date);
                }
            }
        }

        if let Some(date) = LAST_WEEKDAY_PATTERN
            .captures(text)
            .and_then(|caps| weekday_token(&caps))
            .and_then(|target| last_weekday(anchor, target))
        {
            debug!(%date, "resolved last weekday");
            return Some(date);
        }

        if let Some(date) = NEXT_WEEKDAY_PATTERN
            .captures(text)
            .and_then(|caps| weekday_token(&caps))
            .and_then(|target| next_weekday(anchor, target))
        {
            debug!(%date, "resolved next weekday");
            return Some(date);
        }

        if let Some(date) = MONTH_DAY_PATTERN
            .captures(text)
            .and_then(|caps| month_day(&caps, anchor))
        {
            debug!(%date, "resolved month/day prose");
            return Some(date);
        }

        None
    }
}

/// Builds a date in the anchor's year from capture groups 1 (month) and 2 (day).
fn month_day(caps: &Captures<'_>, anchor: NaiveDate) -> Option<NaiveDate> {
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(anchor.year(), month, day)
}

fn weekday_token(caps: &Captures<'_>) -> Option<Weekday> {
    match caps.get(1)?.as_str() {
        "월" => Some(Weekday::Mon),
        "화" => Some(Weekday::Tue),
        "수" => Some(Weekday::Wed),
        "목" => Some(Weekday::Thu),
        "금" => Some(Weekday::Fri),
        "토" => Some(Weekday::Sat),
        "일" => Some(Weekday::Sun),
        _ => None,
    }
}

fn shift(anchor: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        anchor.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        anchor.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Most recent `target` strictly before `anchor`.
///
/// A naive offset of zero or less rolls back a further week, so
/// "지난 월요일" said on a Monday means seven days ago.
fn last_weekday(anchor: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut offset = i64::from(anchor.weekday().num_days_from_sunday())
        - i64::from(target.num_days_from_sunday());
    if offset <= 0 {
        offset += 7;
    }
    shift(anchor, -offset)
}

/// Nearest `target` strictly after `anchor`.
fn next_weekday(anchor: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut offset = i64::from(target.num_days_from_sunday())
        - i64::from(anchor.weekday().num_days_from_sunday());
    if offset <= 0 {
        offset += 7;
    }
    shift(anchor, offset)
}
