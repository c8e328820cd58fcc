use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use xrr_core::{Observation, ordered_pairs, partition_by};

use crate::Mood;

const ITEM_COLUMN: usize = 0;
const PLATFORM_COLUMN: usize = 1;
const RATER_COLUMN: usize = 2;

#[derive(Debug, Error)]
pub enum IRepError {
    #[error("Failed to read IRep dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse IRep CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    MissingColumns {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: invalid value '{value}'")]
    InvalidField {
        line: u64,
        column: usize,
        value: String,
    },
}

/// One rater's judgment of one item on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IRepEntry {
    pub item_id: i64,
    pub platform: String,
    pub rater: i64,
    /// Moods the rater marked as present.
    pub moods: BTreeSet<Mood>,
}

impl IRepEntry {
    fn from_record(record: &csv::StringRecord) -> Result<Self, IRepError> {
        let line = record.position().map_or(0, |p| p.line());
        let expected = Mood::COLUMN_OFFSET + Mood::ALL.len();
        if record.len() < expected {
            return Err(IRepError::MissingColumns {
                line,
                expected,
                found: record.len(),
            });
        }

        let integer = |column: usize| -> Result<i64, IRepError> {
            let raw = &record[column];
            raw.trim().parse().map_err(|_| IRepError::InvalidField {
                line,
                column,
                value: raw.to_string(),
            })
        };

        Ok(Self {
            item_id: integer(ITEM_COLUMN)?,
            platform: record[PLATFORM_COLUMN].to_string(),
            rater: integer(RATER_COLUMN)?,
            moods: Mood::ALL
                .into_iter()
                .filter(|m| record[m.column()].trim() == "1")
                .collect(),
        })
    }
}

/// The parsed IRep dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IRepDataset {
    entries: Vec<IRepEntry>,
}

impl IRepDataset {
    pub fn new(entries: Vec<IRepEntry>) -> Self {
        Self { entries }
    }

    /// Parses CSV text. The first row is a header and is skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IRepError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let entries = csv
            .records()
            .map(|record| IRepEntry::from_record(&record?))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(entries = entries.len(), "loaded IRep dataset");
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IRepError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn entries(&self) -> &[IRepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct platforms in order of first appearance.
    pub fn platforms(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .map(|e| e.platform.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Every ordered pair of distinct platforms.
    pub fn platform_pairs(&self) -> Vec<(String, String)> {
        let platforms: Vec<String> = self.platforms().into_iter().map(String::from).collect();
        ordered_pairs(&platforms)
    }

    /// Raw dataset of one platform for one mood: item → whether the mood was
    /// marked, one observation per rating.
    pub fn observations_for(&self, mood: Mood, platform: &str) -> Vec<Observation<i64, bool>> {
        self.entries
            .iter()
            .filter(|e| e.platform == platform)
            .map(|e| Observation::new(e.item_id, e.moods.contains(&mood)))
            .collect()
    }

    /// [`observations_for`](Self::observations_for) for every platform at once.
    pub fn mood_partitions(&self, mood: Mood) -> BTreeMap<String, Vec<Observation<i64, bool>>> {
        partition_by(
            &self.entries,
            |e| e.platform.clone(),
            |e| Some(Observation::new(e.item_id, e.moods.contains(&mood))),
        )
    }
}
