//! # xrr-metric
//!
//! **Tier 2 (Metric Engine)**
//!
//! Computes the cross-replication reliability score of two summary datasets:
//!
//! ```text
//! xRR = 1 - observed_disagreement / expected_disagreement
//! ```
//!
//! Observed disagreement compares the annotations two datasets gave the *same*
//! item. Expected disagreement compares every annotation of one dataset with
//! every annotation of the other, regardless of item. Only items present in
//! both datasets take part in either term.
//!
//! Undefined results (no shared items, zero expected disagreement) are
//! reported as [`XrrError`] variants, never as NaN or infinity.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;
use xrr_distance::{DistanceError, DistanceFunction};
use xrr_summary::{AnnotationCounts, SummaryDataset};
pub use xrr_types::MetricKind;

/// Reductions over fewer elements than this stay on the calling thread.
pub const PARALLEL_ITEM_THRESHOLD: usize = 256;

/// Why a pair of datasets has no score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum XrrError {
    #[error("undefined metric: no overlapping items")]
    NoOverlappingItems,

    #[error("undefined metric: no expected disagreement")]
    NoExpectedDisagreement,

    #[error("undefined metric: non-finite disagreement (observed {observed}, expected {expected})")]
    NonFinite { observed: f64, expected: f64 },

    #[error("distance function failed: {0}")]
    Distance(#[from] DistanceError),
}

/// A computed score with the quantities it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrrScore {
    pub score: f64,
    pub observed: f64,
    pub expected: f64,
    /// Items present in both datasets.
    pub overlapping_items: usize,
    /// Annotations in X restricted to the overlapping items.
    pub total_x: u64,
    /// Annotations in Y restricted to the overlapping items.
    pub total_y: u64,
}

/// An xRR metric variant.
pub trait XrrMetric {
    fn compute<I, A, D>(
        &self,
        x: &SummaryDataset<I, A>,
        y: &SummaryDataset<I, A>,
        distance: &D,
    ) -> Result<XrrScore, XrrError>
    where
        I: Ord + Sync,
        A: Ord + Sync,
        D: DistanceFunction<A> + ?Sized;
}

/// xRR over the items both datasets annotated; items present on one side only
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithMissingData;

impl XrrMetric for WithMissingData {
    fn compute<I, A, D>(
        &self,
        x: &SummaryDataset<I, A>,
        y: &SummaryDataset<I, A>,
        distance: &D,
    ) -> Result<XrrScore, XrrError>
    where
        I: Ord + Sync,
        A: Ord + Sync,
        D: DistanceFunction<A> + ?Sized,
    {
        let matched: Vec<(&AnnotationCounts<A>, &AnnotationCounts<A>)> = x
            .iter()
            .filter_map(|(item, cx)| y.get(item).map(|cy| (cx, cy)))
            .collect();
        if matched.is_empty() {
            return Err(XrrError::NoOverlappingItems);
        }

        let total_x: u64 = matched.iter().map(|(cx, _)| cx.total()).sum();
        let total_y: u64 = matched.iter().map(|(_, cy)| cy.total()).sum();
        debug!(
            overlapping = matched.len(),
            dropped_x = x.len() - matched.len(),
            dropped_y = y.len() - matched.len(),
            total_x,
            total_y,
            "intersected datasets"
        );

        let observed_sum = sum_over(&matched, |&(cx, cy)| {
            marginal_observed_disagreement(cx, cy, distance)
        })?;
        let observed = observed_sum / (total_x + total_y) as f64;

        let expected_sum = expected_disagreement_sum(&matched, distance)?;
        let expected = expected_sum / (total_x as f64 * total_y as f64);

        if !observed.is_finite() || !expected.is_finite() {
            return Err(XrrError::NonFinite { observed, expected });
        }
        if expected == 0.0 {
            return Err(XrrError::NoExpectedDisagreement);
        }

        Ok(XrrScore {
            score: 1.0 - observed / expected,
            observed,
            expected,
            overlapping_items: matched.len(),
            total_x,
            total_y,
        })
    }
}

impl XrrMetric for MetricKind {
    fn compute<I, A, D>(
        &self,
        x: &SummaryDataset<I, A>,
        y: &SummaryDataset<I, A>,
        distance: &D,
    ) -> Result<XrrScore, XrrError>
    where
        I: Ord + Sync,
        A: Ord + Sync,
        D: DistanceFunction<A> + ?Sized,
    {
        match self {
            MetricKind::WithMissingData => WithMissingData.compute(x, y, distance),
        }
    }
}

/// The xRR score of `x` against `y` with the with-missing-data metric.
pub fn compute_xrr<I, A, D>(
    x: &SummaryDataset<I, A>,
    y: &SummaryDataset<I, A>,
    distance: &D,
) -> Result<f64, XrrError>
where
    I: Ord + Sync,
    A: Ord + Sync,
    D: DistanceFunction<A> + ?Sized,
{
    WithMissingData.compute(x, y, distance).map(|s| s.score)
}

// -------------------------
// Reductions
// -------------------------

fn sum_over<T, F>(items: &[T], f: F) -> Result<f64, DistanceError>
where
    T: Sync,
    F: Fn(&T) -> Result<f64, DistanceError> + Sync + Send,
{
    if items.len() < PARALLEL_ITEM_THRESHOLD {
        items.iter().map(f).sum()
    } else {
        items
            .par_iter()
            .map(f)
            .try_reduce(|| 0.0, |a, b| Ok(a + b))
    }
}

/// `Σ d(a, b) · count_x(a) · count_y(b)` over every annotation pair.
fn weighted_distance_sum<'a, A, D>(
    xs: impl Iterator<Item = (&'a A, u64)>,
    ys: &[(&'a A, u64)],
    distance: &D,
) -> Result<f64, DistanceError>
where
    A: 'a,
    D: DistanceFunction<A> + ?Sized,
{
    let mut sum = 0.0;
    for (a, count_a) in xs {
        for (b, count_b) in ys {
            sum += distance.distance(a, b)? * count_a as f64 * *count_b as f64;
        }
    }
    Ok(sum)
}

/// One item's contribution to observed disagreement.
fn marginal_observed_disagreement<A, D>(
    cx: &AnnotationCounts<A>,
    cy: &AnnotationCounts<A>,
    distance: &D,
) -> Result<f64, DistanceError>
where
    A: Ord,
    D: DistanceFunction<A> + ?Sized,
{
    let ys: Vec<(&A, u64)> = cy.iter().collect();
    let sum = weighted_distance_sum(cx.iter(), &ys, distance)?;
    let nx = cx.total() as f64;
    let ny = cy.total() as f64;
    Ok(sum * (nx + ny) / (nx * ny))
}

/// Sum over all item pairs `(i, j)` of the weighted distance between `X[i]` and
/// `Y[j]`. The double sum factorizes over the marginal annotation counts, so it
/// is evaluated once per distinct annotation pair.
fn expected_disagreement_sum<A, D>(
    matched: &[(&AnnotationCounts<A>, &AnnotationCounts<A>)],
    distance: &D,
) -> Result<f64, DistanceError>
where
    A: Ord + Sync,
    D: DistanceFunction<A> + ?Sized,
{
    let mut marginal_x: BTreeMap<&A, u64> = BTreeMap::new();
    let mut marginal_y: BTreeMap<&A, u64> = BTreeMap::new();
    for (cx, cy) in matched {
        for (a, count) in cx.iter() {
            *marginal_x.entry(a).or_insert(0) += count;
        }
        for (b, count) in cy.iter() {
            *marginal_y.entry(b).or_insert(0) += count;
        }
    }

    let xs: Vec<(&A, u64)> = marginal_x.into_iter().collect();
    let ys: Vec<(&A, u64)> = marginal_y.into_iter().collect();
    sum_over(&xs, |&(a, count_a)| {
        weighted_distance_sum(std::iter::once((a, count_a)), &ys, distance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrr_distance::{IntervalSquared, Nominal};

    const TOLERANCE: f64 = 1e-4;
    const XRR_RESULT: f64 = 0.1818182;

    type Summary = SummaryDataset<u32, &'static str>;

    fn dataset(rows: &[(u32, u64, u64)]) -> Summary {
        SummaryDataset::from_counts(
            rows.iter()
                .map(|&(item, a, b)| (item, vec![("A", a), ("B", b)])),
        )
        .unwrap()
    }

    fn data_x() -> Summary {
        dataset(&[(1, 0, 2), (2, 0, 3), (3, 2, 0), (4, 3, 0), (5, 1, 1)])
    }

    fn data_x_with_extra_items() -> Summary {
        dataset(&[
            (1, 0, 2),
            (2, 0, 3),
            (3, 2, 0),
            (4, 3, 0),
            (5, 1, 1),
            (6, 3, 0),
            (7, 2, 1),
        ])
    }

    fn data_y() -> Summary {
        dataset(&[(1, 0, 2), (2, 1, 1), (3, 1, 1), (4, 1, 1), (5, 2, 0)])
    }

    #[test]
    fn with_missing_data_computes_reference_result() {
        let score = compute_xrr(&data_x(), &data_y(), &Nominal).unwrap();
        assert!((score - XRR_RESULT).abs() < TOLERANCE, "score = {score}");
    }

    #[test]
    fn with_missing_data_ignores_extra_items() {
        let score = compute_xrr(&data_x_with_extra_items(), &data_y(), &Nominal).unwrap();
        assert!((score - XRR_RESULT).abs() < TOLERANCE, "score = {score}");
    }

    #[test]
    fn breakdown_reports_intermediate_quantities() {
        let s = WithMissingData
            .compute(&data_x_with_extra_items(), &data_y(), &Nominal)
            .unwrap();
        assert_eq!(s.overlapping_items, 5);
        assert_eq!(s.total_x, 12);
        assert_eq!(s.total_y, 10);
        assert!((s.observed - 9.0 / 22.0).abs() < 1e-12);
        assert!((s.expected - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unanimous_single_item_is_degenerate() {
        let x = dataset(&[(1, 3, 0)]);
        let y = dataset(&[(1, 2, 0)]);
        assert_eq!(
            compute_xrr(&x, &y, &Nominal),
            Err(XrrError::NoExpectedDisagreement)
        );
    }

    #[test]
    fn disjoint_datasets_have_no_overlap() {
        let x = dataset(&[(1, 1, 1)]);
        let y = dataset(&[(2, 1, 1)]);
        assert_eq!(
            compute_xrr(&x, &y, &Nominal),
            Err(XrrError::NoOverlappingItems)
        );
        assert_eq!(
            compute_xrr(&Summary::default(), &Summary::default(), &Nominal),
            Err(XrrError::NoOverlappingItems)
        );
    }

    #[test]
    fn non_numeric_labels_fail_interval_distance() {
        let err = compute_xrr(&data_x(), &data_y(), &IntervalSquared).unwrap_err();
        assert!(matches!(err, XrrError::Distance(DistanceError::NonNumeric { .. })));
    }

    #[test]
    fn negative_closure_distance_is_an_error() {
        let negative = xrr_distance::from_fn(|a: &&str, b: &&str| if a == b { 0.0 } else { -1.0 });
        let err = compute_xrr(&data_x(), &data_y(), &negative).unwrap_err();
        assert!(matches!(err, XrrError::Distance(DistanceError::Negative { .. })));
    }

    #[test]
    fn metric_kind_dispatches_to_with_missing_data() {
        let by_kind = MetricKind::WithMissingData
            .compute(&data_x(), &data_y(), &Nominal)
            .unwrap();
        let direct = WithMissingData.compute(&data_x(), &data_y(), &Nominal).unwrap();
        assert_eq!(by_kind, direct);
    }

    #[test]
    fn perfect_replication_scores_one() {
        let x = dataset(&[(1, 2, 0), (2, 0, 3)]);
        let y = dataset(&[(1, 1, 0), (2, 0, 1)]);
        assert_eq!(compute_xrr(&x, &y, &Nominal).unwrap(), 1.0);
    }
}
