//! # xrr-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the core data structures and contracts for `xrr`.
//! It contains only data types, Serde definitions, and `SCHEMA_VERSION`.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: The primary contract is the JSON shape of
//! [`XrrReceipt`], not Rust struct literals. Removed or renamed fields bump
//! `SCHEMA_VERSION`.
//!
//! ## What belongs here
//! * Observation and annotation value types
//! * Selector enums shared by the engine, settings, and CLI
//! * Receipt rows and stable error codes
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Metric computation

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The current schema version for all receipt types.
pub const SCHEMA_VERSION: u32 = 1;

/// One rating event: a rater assigned `annotation` to `item`.
///
/// A raw dataset is an ordered sequence of these. Identical observations are
/// distinct rating events and are counted separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation<I, A> {
    pub item: I,
    pub annotation: A,
}

impl<I, A> Observation<I, A> {
    pub fn new(item: I, annotation: A) -> Self {
        Self { item, annotation }
    }
}

impl<I, A> From<(I, A)> for Observation<I, A> {
    fn from((item, annotation): (I, A)) -> Self {
        Self { item, annotation }
    }
}

// -----------------------------------------------------------------------------
// Dynamic annotation values
// -----------------------------------------------------------------------------

/// An annotation value whose concrete type is only known at runtime, e.g. a
/// label read from a CSV column.
///
/// Floats compare by their bit pattern after folding `-0.0` into `0.0` and all
/// NaNs into one NaN, which gives `Annotation` total `Eq`, `Ord`, and `Hash`
/// so it can key count maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Annotation {
    fn rank(&self) -> u8 {
        match self {
            Annotation::Bool(_) => 0,
            Annotation::Int(_) => 1,
            Annotation::Float(_) => 2,
            Annotation::Text(_) => 3,
        }
    }

    /// Numeric view of the value, if it has one. Text is not parsed here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Annotation::Int(v) => Some(*v as f64),
            Annotation::Float(v) => Some(*v),
            Annotation::Bool(_) | Annotation::Text(_) => None,
        }
    }
}

fn canonical_float(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Annotation {}

impl PartialOrd for Annotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Annotation {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Annotation::Bool(a), Annotation::Bool(b)) => a.cmp(b),
            (Annotation::Int(a), Annotation::Int(b)) => a.cmp(b),
            (Annotation::Float(a), Annotation::Float(b)) => {
                canonical_float(*a).total_cmp(&canonical_float(*b))
            }
            (Annotation::Text(a), Annotation::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Annotation::Bool(v) => v.hash(state),
            Annotation::Int(v) => v.hash(state),
            Annotation::Float(v) => canonical_float(*v).to_bits().hash(state),
            Annotation::Text(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Bool(v) => write!(f, "{v}"),
            Annotation::Int(v) => write!(f, "{v}"),
            Annotation::Float(v) => write!(f, "{v}"),
            Annotation::Text(v) => f.write_str(v),
        }
    }
}

/// Parses a label the way it would be read from a text column: `true`/`false`,
/// then integers, then finite floats; anything else stays text.
impl FromStr for Annotation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Ok(Annotation::Bool(true));
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Ok(Annotation::Bool(false));
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(Annotation::Int(v));
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Annotation::Float(v)),
            _ => Ok(Annotation::Text(trimmed.to_string())),
        }
    }
}

macro_rules! annotation_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Annotation {
                fn from(value: $t) -> Self {
                    Annotation::Int(i64::from(value))
                }
            }
        )*
    };
}

annotation_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Annotation {
    fn from(value: bool) -> Self {
        Annotation::Bool(value)
    }
}

impl From<f32> for Annotation {
    fn from(value: f32) -> Self {
        Annotation::Float(f64::from(value))
    }
}

impl From<f64> for Annotation {
    fn from(value: f64) -> Self {
        Annotation::Float(value)
    }
}

impl From<&str> for Annotation {
    fn from(value: &str) -> Self {
        Annotation::Text(value.to_string())
    }
}

impl From<String> for Annotation {
    fn from(value: String) -> Self {
        Annotation::Text(value)
    }
}

// -----------------------------------------------------------------------------
// Selector enums shared with settings and CLI
// -----------------------------------------------------------------------------

/// Which built-in distance function compares two annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DistanceKind {
    /// 0 when labels are equal, 1 otherwise (categorical labels).
    #[default]
    Nominal,
    /// Squared difference of the numeric values (ordinal/interval scales).
    IntervalSquared,
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceKind::Nominal => write!(f, "nominal"),
            DistanceKind::IntervalSquared => write!(f, "interval-squared"),
        }
    }
}

/// Which xRR metric variant computes the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Scores only the items both datasets annotated.
    #[default]
    WithMissingData,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::WithMissingData => write!(f, "with-missing-data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Markdown table.
    #[default]
    Md,
    /// Tab-separated values (good for piping to other tools).
    Tsv,
    /// CSV with a header row.
    Csv,
    /// A single pretty-printed JSON receipt.
    Json,
}

// -----------------------------------------------------------------------------
// Error classification
// -----------------------------------------------------------------------------

/// Stable codes for conditions under which a comparison has no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The two datasets share no items.
    NoOverlappingItems,
    /// Expected disagreement is zero, so the ratio is undefined.
    NoExpectedDisagreement,
    /// Disagreement sums overflowed to a non-finite value.
    NonFiniteScore,
    /// The distance function was given a value outside its domain.
    InvalidDistanceDomain,
    /// A summary dataset violated its count invariant.
    DataIntegrity,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NoOverlappingItems => write!(f, "no_overlapping_items"),
            ErrorCode::NoExpectedDisagreement => write!(f, "no_expected_disagreement"),
            ErrorCode::NonFiniteScore => write!(f, "non_finite_score"),
            ErrorCode::InvalidDistanceDomain => write!(f, "invalid_distance_domain"),
            ErrorCode::DataIntegrity => write!(f, "data_integrity"),
        }
    }
}

/// A classified, serializable failure attached to a report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: ErrorCode,
    pub message: String,
}

impl Failure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

// -----------------------------------------------------------------------------
// Receipts
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "xrr".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One compared pair of datasets within a labelled batch.
///
/// Exactly one of `score` and `failure` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRow {
    pub label: String,
    pub x: String,
    pub y: String,
    pub overlapping_items: usize,
    pub total_x: u64,
    pub total_y: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XrrReceipt {
    pub schema_version: u32,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,
    pub distance: DistanceKind,
    pub metric: MetricKind,
    pub rows: Vec<ScoreRow>,
}
