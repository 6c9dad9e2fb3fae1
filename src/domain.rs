use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Gender;

/// Wind-legality tag for a mark. Illegal (wind-aided) marks are kept for
/// all-conditions comparison but excluded from the official ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Legality {
    Legal,
    Illegal,
}

impl Legality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Legality::Legal => "Legal",
            Legality::Illegal => "Illegal",
        }
    }
}

/// Track events are time-based (lower is better); field events are
/// distance/height-based (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discipline {
    Track,
    Field,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Track => "Track",
            Discipline::Field => "Field",
        }
    }
}

/// One fully normalized athlete performance. Every record carries the same
/// 17 fields regardless of which columns the raw source table exposed; the
/// canonical column order lives in [`crate::pipeline::schema`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Official rank as published by the source. Always `None` for illegal
    /// marks.
    pub rank: Option<u32>,
    /// Performance in seconds for track events, metres (or points) for field
    /// events. `None` when the raw cell did not parse.
    pub time: Option<f64>,
    /// Raw wind reading. `None` for non-wind events and for rows whose table
    /// carried no wind column; rendered as "N/A" on export.
    pub wind: Option<String>,
    pub name: String,
    pub country: String,
    /// Date of birth after mode reconciliation across same-named rows.
    pub dob: Option<NaiveDate>,
    pub position_in_race: Option<String>,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub legal: Legality,
    /// Performance annotation stripped off the raw time cell (altitude,
    /// hand timing, and similar markers).
    pub note: Option<String>,
    pub sex: Gender,
    pub event: String,
    /// Rank across the merged legal + illegal set, ignoring eligibility.
    /// Always populated.
    pub all_conditions_rank: u32,
    pub age_at_race: Option<i32>,
    /// SHA-1 hex digest identifying the meet; `None` only when the race date
    /// itself failed to parse.
    pub competition_id: Option<String>,
    pub discipline: Discipline,
}

/// Finalized, immutable output of one pipeline run for one
/// (gender, event) query.
pub type ResultSet = Vec<ResultRecord>;
