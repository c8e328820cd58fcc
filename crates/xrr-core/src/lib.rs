//! # xrr-core
//!
//! This crate is the **primary library interface** for `xrr`.
//! It ties the dataset adapter, distance functions, and metric engine together
//! and provides the batch driver used by the CLI.
//!
//! If you are embedding `xrr` into another Rust application, depend on this
//! crate. Avoid depending on `xrr-summary` or `xrr-metric` directly unless
//! necessary.
//!
//! ## Example
//!
//! ```rust
//! use xrr_core::{MetricKind, Nominal, Observation, compute_xrr_from_raw};
//!
//! let x: Vec<Observation<u32, &str>> = vec![(1, "A").into(), (1, "A").into(), (2, "B").into()];
//! let y: Vec<Observation<u32, &str>> = vec![(1, "A").into(), (2, "A").into(), (2, "B").into()];
//!
//! let score = compute_xrr_from_raw(&x, &y, &Nominal, MetricKind::WithMissingData).unwrap();
//! assert!(score.score <= 1.0);
//! ```

pub mod batch;
pub mod error;

use tracing::debug;

// Re-export crates and the types most callers need
pub use xrr_distance as distance;
pub use xrr_metric as metric;
pub use xrr_summary as summary;
pub use xrr_types as types;

pub use batch::{PairOutcome, build_receipt, ordered_pairs, partition_by, score_pairs, score_rows};
pub use error::Classify;
pub use xrr_distance::{DistanceError, DistanceFunction, IntervalSquared, Nominal, from_fn};
pub use xrr_metric::{WithMissingData, XrrError, XrrMetric, XrrScore, compute_xrr};
pub use xrr_summary::{SummaryDataset, SummaryError, to_summary};
pub use xrr_types::{Annotation, DistanceKind, MetricKind, Observation};

/// Scores two summary datasets with the chosen metric.
pub fn compute_xrr_with_summaries<I, A, D>(
    x: &SummaryDataset<I, A>,
    y: &SummaryDataset<I, A>,
    distance: &D,
    metric: MetricKind,
) -> Result<XrrScore, XrrError>
where
    I: Ord + Sync,
    A: Ord + Sync,
    D: DistanceFunction<A> + ?Sized,
{
    metric.compute(x, y, distance)
}

/// Scores two raw datasets: both are summarized, then scored.
pub fn compute_xrr_from_raw<I, A, D>(
    raw_x: &[Observation<I, A>],
    raw_y: &[Observation<I, A>],
    distance: &D,
    metric: MetricKind,
) -> Result<XrrScore, XrrError>
where
    I: Ord + Clone + Send + Sync,
    A: Ord + Clone + Send + Sync,
    D: DistanceFunction<A> + ?Sized,
{
    debug!(raw_x = raw_x.len(), raw_y = raw_y.len(), "summarizing raw datasets");
    let (x, y) = rayon::join(|| to_summary(raw_x), || to_summary(raw_y));
    compute_xrr_with_summaries(&x, &y, distance, metric)
}
