//! Date extraction for receipts.

use chrono::{Days, NaiveDate};

use super::patterns::NUMERIC_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Numeric date extractor (month/day/year).
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    /// Only the first date-shaped match on a line is considered; if it is
    /// out of range the line yields nothing.
    fn extract(&self, line: &str) -> Option<Self::Output> {
        let caps = NUMERIC_DATE.captures(line)?;
        let full_match = caps.get(0)?;

        parse_numeric_date(&caps[1], &caps[2], &caps[3]).map(|date| {
            ExtractionMatch::new(date, full_match.as_str())
                .with_position(full_match.start(), full_match.end())
        })
    }

    fn extract_all(&self, line: &str) -> Vec<Self::Output> {
        NUMERIC_DATE
            .captures_iter(line)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                parse_numeric_date(&caps[1], &caps[2], &caps[3]).map(|date| {
                    ExtractionMatch::new(date, full_match.as_str())
                        .with_position(full_match.start(), full_match.end())
                })
            })
            .collect()
    }
}

/// Find the receipt date: the first line whose date-shaped text parses.
///
/// A line with an out-of-range date (e.g. `13/45/2024`) is skipped and the
/// scan continues with the next line.
pub fn extract_receipt_date(lines: &[&str]) -> Option<ExtractionMatch<NaiveDate>> {
    let extractor = DateExtractor::new();

    lines
        .iter()
        .enumerate()
        .find_map(|(idx, line)| extractor.extract(line).map(|m| m.on_line(idx)))
}

/// Build a calendar date from month, day and year digits.
///
/// Month must be 1-12 and day 1-31. A day past the end of the month rolls
/// over into the next one, so `02/30/2024` is 2024-03-01.
pub fn parse_numeric_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year = parse_year(year)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Two-digit years 00-49 are 20xx and 50-99 are 19xx; longer years are
/// taken literally.
fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        Some(if year < 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}
