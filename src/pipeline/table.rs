use tracing::debug;

use super::tokenize::RawTable;

/// Wind-column decision inferred from the widest row of a table. Modeled as
/// an explicit tag (rather than a sliced column list) so downstream stages
/// can match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    HasWind,
    NoWind,
}

/// Token count of a table that reports wind readings: marker, rank, time,
/// wind, name, country, dob, position, city, date.
pub const WIND_TABLE_WIDTH: usize = 10;

const NO_WIND_WIDTH: usize = 9;

/// One result row with cells assigned positionally. Cells are still raw
/// strings; empty and absent cells are both `None`. The leading marker token
/// every indented source line produces is already discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub rank: Option<String>,
    pub time: Option<String>,
    pub wind: Option<String>,
    pub name: String,
    pub country: Option<String>,
    pub dob: Option<String>,
    pub position: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedTable {
    pub shape: TableShape,
    pub rows: Vec<TableRow>,
}

fn cell(tokens: &[String], idx: usize) -> Option<String> {
    tokens
        .get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Assigns column meanings to token rows based on the table's width. A width
/// of exactly [`WIND_TABLE_WIDTH`] means a wind column sits between time and
/// name; any other width means no wind column. Rows shorter than the width
/// keep their tokens in place and read `None` for the missing trailing
/// cells: positional assignment first, padding after. Short rows are never
/// re-aligned by guessing which cell is absent. Rows without a name cell are
/// not results and are dropped here.
pub fn assemble(raw: RawTable) -> TypedTable {
    let shape = if raw.width == WIND_TABLE_WIDTH {
        TableShape::HasWind
    } else {
        TableShape::NoWind
    };
    let column_count = match shape {
        TableShape::HasWind => WIND_TABLE_WIDTH,
        TableShape::NoWind => NO_WIND_WIDTH,
    };

    let mut rows = Vec::with_capacity(raw.rows.len());
    for tokens in &raw.rows {
        if tokens.len() > column_count {
            debug!(
                "Row has {} tokens but the table has {} columns; surplus tokens discarded",
                tokens.len(),
                column_count
            );
        }

        // Position 0 is the marker column; data starts at 1.
        let (wind, name_idx) = match shape {
            TableShape::HasWind => (cell(tokens, 3), 4),
            TableShape::NoWind => (None, 3),
        };
        let name = match cell(tokens, name_idx) {
            Some(name) => name,
            None => {
                debug!("Dropping unparseable row without a name cell: {:?}", tokens);
                continue;
            }
        };

        rows.push(TableRow {
            rank: cell(tokens, 1),
            time: cell(tokens, 2),
            wind,
            name,
            country: cell(tokens, name_idx + 1),
            dob: cell(tokens, name_idx + 2),
            position: cell(tokens, name_idx + 3),
            city: cell(tokens, name_idx + 4),
            date: cell(tokens, name_idx + 5),
        });
    }

    TypedTable { shape, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tokenize::tokenize;

    #[test]
    fn width_ten_maps_the_wind_column() {
        let raw = tokenize("   1    9.58   +0.9   Usain Bolt   JAM   21.08.86   1   Berlin   16.08.2009");
        let table = assemble(raw);
        assert_eq!(table.shape, TableShape::HasWind);
        let row = &table.rows[0];
        assert_eq!(row.rank.as_deref(), Some("1"));
        assert_eq!(row.time.as_deref(), Some("9.58"));
        assert_eq!(row.wind.as_deref(), Some("+0.9"));
        assert_eq!(row.name, "Usain Bolt");
        assert_eq!(row.country.as_deref(), Some("JAM"));
        assert_eq!(row.dob.as_deref(), Some("21.08.86"));
        assert_eq!(row.position.as_deref(), Some("1"));
        assert_eq!(row.city.as_deref(), Some("Berlin"));
        assert_eq!(row.date.as_deref(), Some("16.08.2009"));
    }

    #[test]
    fn width_nine_has_no_wind_column() {
        let raw = tokenize("   1   7.40   Jackie Joyner-Kersee   USA   03.03.62   1   Seoul   29.09.1988");
        let table = assemble(raw);
        assert_eq!(table.shape, TableShape::NoWind);
        let row = &table.rows[0];
        assert_eq!(row.wind, None);
        assert_eq!(row.name, "Jackie Joyner-Kersee");
        assert_eq!(row.city.as_deref(), Some("Seoul"));
        assert_eq!(row.date.as_deref(), Some("29.09.1988"));
    }

    #[test]
    fn short_rows_pad_after_positional_assignment() {
        // Second row is missing its wind reading: everything after the time
        // shifts one column left and the date cell ends up empty. The row is
        // kept as-is; no re-alignment is attempted.
        let text = "   1   10.03   2.0   Athlete One   USA   01.01.90   1   Rome   01.06.2010\n   2   10.05   Athlete Two   USA   02.02.91   2   Rome   01.06.2010";
        let table = assemble(tokenize(text));
        assert_eq!(table.shape, TableShape::HasWind);
        let short = &table.rows[1];
        assert_eq!(short.wind.as_deref(), Some("Athlete Two"));
        assert_eq!(short.name, "USA");
        assert_eq!(short.date, None);
    }

    #[test]
    fn rows_without_a_name_cell_are_dropped() {
        let text = "World Championships\n   1   10.03   Athlete One   USA   01.01.90   1   Rome   01.06.2010";
        let table = assemble(tokenize(text));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Athlete One");
    }

    #[test]
    fn empty_marker_and_cells_become_none() {
        let raw = tokenize("   1   10.03   Athlete One   USA   01.01.90   1   Rome   01.06.2010");
        let table = assemble(raw);
        // Marker token is not represented at all; other cells are present.
        assert_eq!(table.rows[0].rank.as_deref(), Some("1"));
    }
}
