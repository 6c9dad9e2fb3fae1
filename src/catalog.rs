use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::Discipline;
use crate::error::{Result, ScraperError};

/// The fixed event catalogue covered by a full scrape run. Codes double as
/// default page-name stems on the site.
pub const EVENT_CATALOGUE: [&str; 19] = [
    "200", "100m", "400", "long", "trip", "110h", "400h", "pole", "shot", "disc", "jave", "hamm",
    "deca", "60m", "300", "800", "5000", "10000", "1500",
];

/// Event codes whose times are published in m:ss.ss clock notation.
pub const CLOCK_FORMAT_EVENTS: [&str; 4] = ["800", "1500", "5000", "10000"];

const LEGAL_SUFFIX: &str = "ok";
const ILLEGAL_SUFFIX: &str = "no";

/// Page-name stems that deviate from the default convention, keyed per
/// gender. The genders are not symmetric: women hurdle the 100 m distance and
/// contest the heptathlon, so those catalogue codes map onto different page
/// stems. Adding an irregular event is a data change here, not a code change.
static PAGE_STEM_OVERRIDES: Lazy<HashMap<(Gender, &'static str), &'static str>> = Lazy::new(|| {
    HashMap::from([
        ((Gender::Female, "110h"), "100h"),
        ((Gender::Female, "deca"), "hept"),
    ])
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Initial used by the site's page naming convention.
    pub fn initial(&self) -> char {
        match self {
            Gender::Male => 'm',
            Gender::Female => 'w',
        }
    }

    /// Short label for log lines ("no data for men's 110h").
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "men",
            Gender::Female => "women",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Gender> {
        match value.to_ascii_lowercase().as_str() {
            "m" | "men" | "male" => Some(Gender::Male),
            "w" | "women" | "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// One unit of pipeline work: a single event scraped for a single gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventQuery {
    pub gender: Gender,
    pub event: &'static str,
}

impl EventQuery {
    pub fn new(gender: Gender, event: &'static str) -> Self {
        Self { gender, event }
    }

    /// Page name (without extension) for one wind-legality variant of this
    /// query. Irregular codes come from the override table; everything else
    /// follows the `{initial}_{code}{suffix}` convention. The fallback
    /// convention accepts any code, so resolution itself cannot fail;
    /// unknown codes are rejected earlier, when user input is resolved
    /// against the catalogue.
    pub fn page_name(&self, legal: bool) -> String {
        let stem = PAGE_STEM_OVERRIDES
            .get(&(self.gender, self.event))
            .copied()
            .unwrap_or(self.event);
        let suffix = if legal { LEGAL_SUFFIX } else { ILLEGAL_SUFFIX };
        format!("{}_{}{}", self.gender.initial(), stem, suffix)
    }

    /// Whether this event's times are published in clock notation and need
    /// conversion to seconds.
    pub fn uses_clock_format(&self) -> bool {
        CLOCK_FORMAT_EVENTS.contains(&self.event)
    }

    /// Track events carry a distance digit in their code; everything else is
    /// a field event.
    pub fn discipline(&self) -> Discipline {
        if self.event.chars().any(|c| c.is_ascii_digit()) {
            Discipline::Track
        } else {
            Discipline::Field
        }
    }

    /// Log-friendly description, e.g. "women's 110h".
    pub fn describe(&self) -> String {
        format!("{}'s {}", self.gender.label(), self.event)
    }
}

/// Resolves a user-supplied event code against the catalogue.
pub fn resolve_event_code(code: &str) -> Result<&'static str> {
    EVENT_CATALOGUE
        .iter()
        .copied()
        .find(|known| *known == code)
        .ok_or_else(|| ScraperError::UnknownEvent(code.to_string()))
}

/// Cross product of the catalogue and both genders, in deterministic order:
/// catalogue order, men before women within each event.
pub fn all_queries() -> Vec<EventQuery> {
    EVENT_CATALOGUE
        .iter()
        .flat_map(|event| {
            Gender::ALL
                .iter()
                .map(move |gender| EventQuery::new(*gender, event))
        })
        .collect()
}
