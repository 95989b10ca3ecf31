//! Text formatting shared by the results, thread and chat views.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Medium date and time, e.g. `Jan 5, 2024, 3:04:05 PM`.
const DATE_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `"1 email"`, `"3 emails"`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Summary line for a finished lookup.
#[must_use]
pub fn summary_line(count: usize) -> String {
    if count == 0 {
        "No matching results found.".to_string()
    } else {
        pluralize(count, "matching result")
    }
}

/// Score pill text, rounded to a whole percentage.
#[must_use]
pub fn score_label(score: f64) -> String {
    // Adding zero turns a negative zero into a positive one.
    format!("score: {:.0}%", score.round() + 0.0)
}

/// Keeps the first `max_words` words, appending `…` when anything was cut.
#[must_use]
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(max_words).collect();
    let mut truncated = kept.join(" ");
    if words.next().is_some() {
        truncated.push('…');
    }
    truncated
}

/// Splits text into paragraphs on blank lines, each a list of its lines.
#[must_use]
pub fn paragraphs(text: &str) -> Vec<Vec<String>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end().to_string());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Formats an email date for display.
///
/// Absent or blank dates read `No date`; values that do not parse are shown
/// verbatim. Naive timestamps are taken as local time.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "No date".to_string();
    };
    parse_date(raw).map_or_else(|| raw.to_string(), |date| date.format(DATE_FORMAT).to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Local).naive_local());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
