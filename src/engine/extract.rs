//! Text extractors: turn a raw answer into typed record values.

use regex::Regex;
use std::sync::OnceLock;

/// Parsed `H[:MM] - H[:MM]` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
    pub duration: i64,
}

fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only: `\d` would also accept full-width digits.
    RE.get_or_init(|| {
        Regex::new(r"([0-9]{1,2}):?([0-9]{2})?\s*[-~〜]\s*([0-9]{1,2}):?([0-9]{2})?")
            .expect("time range pattern is valid")
    })
}

/// Extract a time range from free text.
///
/// Minutes default to `00`, both ends are zero-padded to `HH:MM` and the
/// duration is `end - start` in minutes, negative when the end comes first.
/// Returns `None` when nothing in the input looks like a range.
pub fn parse_time_range(input: &str) -> Option<TimeRange> {
    let caps = time_range_regex().captures(input)?;

    let start_h: i64 = caps.get(1)?.as_str().parse().ok()?;
    let start_m: i64 = caps.get(2).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let end_h: i64 = caps.get(3)?.as_str().parse().ok()?;
    let end_m: i64 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse()).ok()?;

    Some(TimeRange {
        start: format!("{:02}:{:02}", start_h, start_m),
        end: format!("{:02}:{:02}", end_h, end_m),
        duration: (end_h * 60 + end_m) - (start_h * 60 + start_m),
    })
}

/// Passthrough extractor.
pub fn passthrough(input: &str) -> String {
    input.trim().to_string()
}
