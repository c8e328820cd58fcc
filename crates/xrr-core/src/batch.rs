//! Batch driver: one raw dataset per partition value, scored pairwise.
//!
//! The driver never decides which pairs matter or whether a degenerate pair
//! should abort the batch. Every supplied pair gets its own outcome.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use tracing::{debug, warn};
use xrr_distance::DistanceFunction;
use xrr_metric::{XrrError, XrrMetric, XrrScore};
use xrr_summary::{SummaryDataset, to_summary};
use xrr_types::{
    DistanceKind, MetricKind, Observation, SCHEMA_VERSION, ScoreRow, ToolInfo, XrrReceipt,
};

use crate::error::Classify;

/// The result of comparing partition `x` against partition `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome<K> {
    pub x: K,
    pub y: K,
    pub result: Result<XrrScore, XrrError>,
}

/// Splits `records` into one raw dataset per key.
///
/// Records for which `observe` returns `None` are skipped; their key is not
/// created either. Observation order within a partition follows `records`.
pub fn partition_by<R, K, I, A>(
    records: &[R],
    key: impl Fn(&R) -> K,
    observe: impl Fn(&R) -> Option<Observation<I, A>>,
) -> BTreeMap<K, Vec<Observation<I, A>>>
where
    K: Ord,
{
    let mut partitions: BTreeMap<K, Vec<Observation<I, A>>> = BTreeMap::new();
    for record in records {
        if let Some(obs) = observe(record) {
            partitions.entry(key(record)).or_default().push(obs);
        }
    }
    partitions
}

/// Every ordered pair of distinct keys, in key order.
pub fn ordered_pairs<K: Clone>(keys: &[K]) -> Vec<(K, K)> {
    let mut pairs = Vec::with_capacity(keys.len() * keys.len().saturating_sub(1));
    for (i, x) in keys.iter().enumerate() {
        for (j, y) in keys.iter().enumerate() {
            if i != j {
                pairs.push((x.clone(), y.clone()));
            }
        }
    }
    pairs
}

/// Scores every requested pair of partitions.
///
/// Each partition is summarized once. A pair naming a key with no partition
/// is scored against an empty dataset.
pub fn score_pairs<K, I, A, D>(
    partitions: &BTreeMap<K, Vec<Observation<I, A>>>,
    pairs: &[(K, K)],
    distance: &D,
    metric: MetricKind,
) -> Vec<PairOutcome<K>>
where
    K: Ord + Clone + fmt::Debug + Send + Sync,
    I: Ord + Clone + Send + Sync,
    A: Ord + Clone + Send + Sync,
    D: DistanceFunction<A> + ?Sized,
{
    let summaries: BTreeMap<&K, SummaryDataset<I, A>> = partitions
        .par_iter()
        .map(|(key, raw)| (key, to_summary(raw)))
        .collect();
    let empty = SummaryDataset::default();
    debug!(
        partitions = summaries.len(),
        pairs = pairs.len(),
        "scoring partition pairs"
    );

    pairs
        .par_iter()
        .map(|(x, y)| {
            let sx = summaries.get(x).unwrap_or(&empty);
            let sy = summaries.get(y).unwrap_or(&empty);
            let result = metric.compute(sx, sy, distance);
            if let Err(err) = &result {
                warn!(x = ?x, y = ?y, code = %err.error_code(), "pair has no score: {err}");
            }
            PairOutcome {
                x: x.clone(),
                y: y.clone(),
                result,
            }
        })
        .collect()
}

/// Report rows for one labelled batch of outcomes.
pub fn score_rows<K: fmt::Display>(label: &str, outcomes: &[PairOutcome<K>]) -> Vec<ScoreRow> {
    outcomes
        .iter()
        .map(|outcome| {
            let mut row = ScoreRow {
                label: label.to_string(),
                x: outcome.x.to_string(),
                y: outcome.y.to_string(),
                overlapping_items: 0,
                total_x: 0,
                total_y: 0,
                observed: None,
                expected: None,
                score: None,
                failure: None,
            };
            match &outcome.result {
                Ok(s) => {
                    row.overlapping_items = s.overlapping_items;
                    row.total_x = s.total_x;
                    row.total_y = s.total_y;
                    row.observed = Some(s.observed);
                    row.expected = Some(s.expected);
                    row.score = Some(s.score);
                }
                Err(err) => row.failure = Some(err.to_failure()),
            }
            row
        })
        .collect()
}

/// Wraps report rows in a versioned receipt.
pub fn build_receipt(rows: Vec<ScoreRow>, distance: DistanceKind, metric: MetricKind) -> XrrReceipt {
    XrrReceipt {
        schema_version: SCHEMA_VERSION,
        generated_at_ms: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis(),
        tool: ToolInfo::current(),
        distance,
        metric,
        rows,
    }
}
