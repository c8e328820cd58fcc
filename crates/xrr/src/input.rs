//! CSV dataset readers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;
use xrr_core::{Annotation, Observation};

/// A CSV file's header and data rows.
pub(crate) struct Table {
    pub headers: csv::StringRecord,
    pub records: Vec<csv::StringRecord>,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .clone();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), rows = records.len(), "read table");
        Ok(Self { headers, records })
    }

    /// Index of a named header column.
    pub fn column(&self, name: &str) -> Result<usize> {
        match self.headers.iter().position(|h| h == name) {
            Some(i) => Ok(i),
            None => bail!(
                "Column '{}' not found in header (available: {})",
                name,
                self.headers.iter().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// Reads an `item,annotation` dataset. Columns past the second are ignored.
pub(crate) fn read_observations(path: &Path) -> Result<Vec<Observation<String, Annotation>>> {
    let table = Table::read(path)?;
    table
        .records
        .iter()
        .map(|record| {
            if record.len() < 2 {
                bail!(
                    "{}: line {}: expected `item,annotation` columns, found {}",
                    path.display(),
                    line_of(record),
                    record.len()
                );
            }
            Ok(Observation::new(record[0].to_string(), parse_annotation(&record[1])))
        })
        .collect()
}

pub(crate) fn parse_annotation(raw: &str) -> Annotation {
    match raw.parse() {
        Ok(annotation) => annotation,
        Err(never) => match never {},
    }
}
