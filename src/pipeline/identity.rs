use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::normalize::NormalizedRow;

/// Rewrites every row's birth date to the most frequent non-null birth date
/// observed for that athlete name across the whole set. Count ties break
/// toward the earliest date so the vote is deterministic. Names with no
/// non-null birth date anywhere keep `None`. Re-applying the vote to its own
/// output changes nothing.
///
/// Identity is keyed on name alone, as the source publishes it. Two distinct
/// athletes sharing a name within one event would be merged; the source
/// offers no stronger key to join on.
pub fn reconcile_dobs(rows: Vec<NormalizedRow>) -> Vec<NormalizedRow> {
    let mut votes: HashMap<&str, HashMap<NaiveDate, usize>> = HashMap::new();
    for row in &rows {
        if let Some(dob) = row.dob {
            *votes
                .entry(row.name.as_str())
                .or_default()
                .entry(dob)
                .or_insert(0) += 1;
        }
    }

    let modes: HashMap<String, NaiveDate> = votes
        .into_iter()
        .filter_map(|(name, counts)| {
            counts
                .into_iter()
                .max_by_key(|&(date, count)| (count, Reverse(date)))
                .map(|(date, _)| (name.to_string(), date))
        })
        .collect();

    rows.into_iter()
        .map(|mut row| {
            if let Some(mode) = modes.get(&row.name) {
                row.dob = Some(*mode);
            }
            row
        })
        .collect()
}

/// Completed years between birth and race day, one less if the birthday had
/// not yet come around that year. Needs both dates.
pub fn age_at_race(date: Option<NaiveDate>, dob: Option<NaiveDate>) -> Option<i32> {
    let (date, dob) = (date?, dob?);
    let mut age = date.year() - dob.year();
    if (date.month(), date.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    Some(age)
}
