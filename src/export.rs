use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::ResultSet;
use crate::error::Result;
use crate::pipeline::schema;

/// Writes result sets as a single CSV file: one canonical header row, then
/// one row per record, sets in the order given. Every row carries the full
/// 17-column schema so downstream tabular loads can trust positions.
pub fn write_csv(path: &Path, sets: &[ResultSet]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(schema::COLUMNS)?;

    let mut rows = 0usize;
    for set in sets {
        for record in set {
            writer.write_record(schema::to_row(record))?;
            rows += 1;
        }
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", rows, path.display());
    Ok(())
}

/// Writes result sets as newline-delimited JSON, one record per line.
pub fn write_jsonl(path: &Path, sets: &[ResultSet]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    let mut rows = 0usize;
    for set in sets {
        for record in set {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
            rows += 1;
        }
    }
    writer.flush()?;

    info!("Wrote {} records to {}", rows, path.display());
    Ok(())
}
