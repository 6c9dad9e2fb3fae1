use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::merge::TaggedRow;
use crate::catalog::EventQuery;
use crate::domain::Legality;

/// Non-alphabetic characters that count as performance annotations when they
/// trail a time value.
const NOTE_SYMBOLS: &[char] = &['*', '+', '#'];

/// A row with every field parsed into its target type. Fields that failed to
/// parse are `None`; the row itself survives unless it lost both its dates.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub rank: Option<u32>,
    pub time: Option<f64>,
    pub wind: Option<String>,
    pub name: String,
    pub country: String,
    pub dob: Option<NaiveDate>,
    pub position: Option<String>,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub legal: Legality,
    pub note: Option<String>,
}

/// Splits annotation characters off the end of a raw time cell. The source
/// tacks markers like "A" (altitude), "h" (hand timing), "*", "+" or "#"
/// straight onto the number.
fn split_note(raw: &str) -> (&str, Option<String>) {
    let numeric =
        raw.trim_end_matches(|c: char| c.is_ascii_alphabetic() || NOTE_SYMBOLS.contains(&c));
    let note = &raw[numeric.len()..];
    if note.is_empty() {
        (numeric, None)
    } else {
        (numeric, Some(note.to_string()))
    }
}

/// Parses a time cell into seconds. Clock-notation events publish m:ss.ss
/// and need the minutes folded in; everything else is already a plain
/// number. An unparseable cell yields `None`, never an error.
fn parse_time(raw: &str, clock_format: bool) -> (Option<f64>, Option<String>) {
    let (numeric, note) = split_note(raw);

    let seconds = if clock_format && numeric.contains(':') {
        let mut parts = numeric.splitn(2, ':');
        let minutes = parts.next().and_then(|m| m.parse::<f64>().ok());
        let rest = parts.next().and_then(|s| s.parse::<f64>().ok());
        match (minutes, rest) {
            (Some(minutes), Some(rest)) => Some(minutes * 60.0 + rest),
            _ => None,
        }
    } else {
        numeric.parse::<f64>().ok()
    };

    if seconds.is_none() {
        debug!("Unparseable time cell {:?}; field left empty", raw);
    }
    (seconds, note)
}

fn parse_rank(raw: &str) -> Option<u32> {
    raw.trim_end_matches('.').parse().ok()
}

/// Parses a `day.month.year` cell, accepting both two and four digit years.
/// The two-digit form is tried first: `%Y` also accepts short years (as tiny
/// first-century dates), so the order matters. `%y` cannot swallow a
/// four-digit year because the two surplus digits fail the parse. The source
/// writes `00.00.` when only the year of a date is known; that placeholder is
/// rewritten to January 1st before parsing.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let repaired = match raw.strip_prefix("00.00.") {
        Some(year) => format!("01.01.{year}"),
        None => raw.to_string(),
    };
    NaiveDate::parse_from_str(&repaired, "%d.%m.%y")
        .or_else(|_| NaiveDate::parse_from_str(&repaired, "%d.%m.%Y"))
        .ok()
}

/// A birth year in or after the processing year means the two-digit year
/// wrapped into the wrong century during parsing; shift it back 100 years.
fn correct_century(dob: NaiveDate, current_year: i32) -> NaiveDate {
    if dob.year() >= current_year {
        dob.with_year(dob.year() - 100).unwrap_or(dob)
    } else {
        dob
    }
}

/// Parses every cell of the merged row stream into typed fields. Rows that
/// end up with neither a birth date nor a race date cannot support identity
/// reconciliation or competition grouping and are dropped; all other parse
/// failures null the field and keep the row.
pub fn normalize(rows: Vec<TaggedRow>, query: &EventQuery, current_year: i32) -> Vec<NormalizedRow> {
    let clock_format = query.uses_clock_format();
    let mut out = Vec::with_capacity(rows.len());

    for tagged in rows {
        let row = tagged.row;
        let (time, note) = match row.time.as_deref() {
            Some(raw) => parse_time(raw, clock_format),
            None => (None, None),
        };
        let dob = row
            .dob
            .as_deref()
            .and_then(parse_date)
            .map(|d| correct_century(d, current_year));
        let date = row.date.as_deref().and_then(parse_date);

        if dob.is_none() && date.is_none() {
            debug!(
                "Dropping row for {:?}: neither birth date nor race date parsed",
                row.name
            );
            continue;
        }

        out.push(NormalizedRow {
            rank: row.rank.as_deref().and_then(parse_rank),
            time,
            wind: row.wind,
            name: row.name,
            country: row.country.unwrap_or_default(),
            dob,
            position: row.position,
            city: row.city.unwrap_or_default(),
            date,
            legal: tagged.legal,
            note,
        });
    }

    out
}
