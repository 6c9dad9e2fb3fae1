use tracing::debug;

use super::table::{TableRow, TableShape, TypedTable};
use crate::domain::Legality;

/// A table row tagged with the legality of the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRow {
    pub row: TableRow,
    pub legal: Legality,
}

/// Combines the legal-conditions table with its illegal-conditions variant
/// into one row stream, legal rows first. Wind-affected events publish both
/// variants and both must be present for the event to count as covered; a
/// missing or empty illegal table makes the whole event unusable, not half
/// usable. Events without a wind column have no illegal variant and pass
/// through on the legal table alone.
pub fn merge(legal: TypedTable, illegal: Option<TypedTable>) -> Option<Vec<TaggedRow>> {
    if legal.rows.is_empty() {
        debug!("Legal table has no rows; skipping event");
        return None;
    }

    let mut rows: Vec<TaggedRow> = legal
        .rows
        .into_iter()
        .map(|row| TaggedRow {
            row,
            legal: Legality::Legal,
        })
        .collect();

    if legal.shape == TableShape::HasWind {
        let illegal = match illegal {
            Some(table) if !table.rows.is_empty() => table,
            _ => {
                debug!("Wind-affected event is missing its illegal-conditions table; skipping event");
                return None;
            }
        };
        rows.extend(illegal.rows.into_iter().map(|row| TaggedRow {
            row,
            legal: Legality::Illegal,
        }));
    }

    Some(rows)
}
