//! # xrr-summary
//!
//! **Tier 1 (Dataset Adapter)**
//!
//! Converts a raw dataset (one [`Observation`] per rating event) into a
//! [`SummaryDataset`]: for every item, the multiset of annotations it received,
//! stored as annotation → count.
//!
//! ## Invariants
//! * Every stored count is at least 1.
//! * Every stored item has at least one annotation.
//! * A summary is immutable once built.
//!
//! Grouping and counting commute, so [`to_summary`] folds large inputs in
//! parallel and merges the partial maps by pointwise addition. The result does
//! not depend on how the input was partitioned or ordered.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use thiserror::Error;
pub use xrr_types::Observation;

/// Raw datasets shorter than this are summarized on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 4_096;

/// Violations of the summary invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("item {item} has no annotations")]
    EmptyItem { item: String },
}

type CountMap<I, A> = BTreeMap<I, BTreeMap<A, u64>>;

/// The annotations one item received, with their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationCounts<A> {
    counts: BTreeMap<A, u64>,
    total: u64,
}

impl<A: Ord> AnnotationCounts<A> {
    fn from_map(counts: BTreeMap<A, u64>) -> Self {
        let total = counts.values().sum();
        Self { counts, total }
    }

    /// Number of annotations the item received (sum of all counts).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for one annotation value; `0` if it never occurred.
    pub fn get(&self, annotation: &A) -> u64 {
        self.counts.get(annotation).copied().unwrap_or(0)
    }

    /// Number of distinct annotation values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, u64)> + '_ {
        self.counts.iter().map(|(a, c)| (a, *c))
    }
}

/// Item → annotation multiset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDataset<I, A> {
    items: BTreeMap<I, AnnotationCounts<A>>,
}

impl<I, A> Default for SummaryDataset<I, A> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<I: Ord, A: Ord> SummaryDataset<I, A> {
    /// Builds a summary from counts that already satisfy the invariants.
    fn from_count_map(map: CountMap<I, A>) -> Self {
        Self {
            items: map
                .into_iter()
                .map(|(item, counts)| (item, AnnotationCounts::from_map(counts)))
                .collect(),
        }
    }

    /// Builds a summary from pre-aggregated counts.
    ///
    /// Zero counts carry no observations and are dropped. Repeated items or
    /// annotations are summed. An item left with no annotations is a
    /// data-integrity violation and is rejected.
    pub fn from_counts<II, CI>(items: II) -> Result<Self, SummaryError>
    where
        I: fmt::Debug,
        II: IntoIterator<Item = (I, CI)>,
        CI: IntoIterator<Item = (A, u64)>,
    {
        let mut map: CountMap<I, A> = BTreeMap::new();
        for (item, counts) in items {
            let entry = map.entry(item).or_default();
            for (annotation, count) in counts {
                if count > 0 {
                    *entry.entry(annotation).or_insert(0) += count;
                }
            }
        }

        if let Some(item) = map.iter().find(|(_, c)| c.is_empty()).map(|(i, _)| i) {
            return Err(SummaryError::EmptyItem {
                item: format!("{item:?}"),
            });
        }

        Ok(Self::from_count_map(map))
    }

    /// Sequential summary of an observation stream.
    pub fn from_observations<T>(observations: T) -> Self
    where
        T: IntoIterator<Item = Observation<I, A>>,
    {
        let mut map: CountMap<I, A> = BTreeMap::new();
        for obs in observations {
            record(&mut map, obs.item, obs.annotation, 1);
        }
        Self::from_count_map(map)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_item(&self, item: &I) -> bool {
        self.items.contains_key(item)
    }

    pub fn get(&self, item: &I) -> Option<&AnnotationCounts<A>> {
        self.items.get(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &AnnotationCounts<A>)> + '_ {
        self.items.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = &I> + '_ {
        self.items.keys()
    }

    /// Sum of all counts across all items.
    pub fn total_annotations(&self) -> u64 {
        self.items.values().map(AnnotationCounts::total).sum()
    }

    /// Keeps only the items accepted by `keep`.
    pub fn retain_items(mut self, mut keep: impl FnMut(&I) -> bool) -> Self {
        self.items.retain(|item, _| keep(item));
        self
    }

    /// Pointwise addition of two summaries.
    pub fn merge(self, other: Self) -> Self {
        let (mut base, extra) = if self.items.len() >= other.items.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (item, counts) in extra.items {
            match base.items.get_mut(&item) {
                Some(existing) => {
                    for (annotation, count) in counts.counts {
                        *existing.counts.entry(annotation).or_insert(0) += count;
                    }
                    existing.total += counts.total;
                }
                None => {
                    base.items.insert(item, counts);
                }
            }
        }
        base
    }
}

fn record<I: Ord, A: Ord>(map: &mut CountMap<I, A>, item: I, annotation: A, count: u64) {
    *map.entry(item).or_default().entry(annotation).or_insert(0) += count;
}

fn merge_count_maps<I: Ord, A: Ord>(
    mut left: CountMap<I, A>,
    right: CountMap<I, A>,
) -> CountMap<I, A> {
    for (item, counts) in right {
        let entry = left.entry(item).or_default();
        for (annotation, count) in counts {
            *entry.entry(annotation).or_insert(0) += count;
        }
    }
    left
}

/// Summarizes a raw dataset, in parallel once it is large enough.
pub fn to_summary<I, A>(raw: &[Observation<I, A>]) -> SummaryDataset<I, A>
where
    I: Ord + Clone + Send + Sync,
    A: Ord + Clone + Send + Sync,
{
    if raw.len() < PARALLEL_THRESHOLD {
        SummaryDataset::from_observations(raw.iter().cloned())
    } else {
        to_summary_parallel(raw)
    }
}

/// Summarizes a raw dataset with a rayon fold/reduce regardless of its size.
pub fn to_summary_parallel<I, A>(raw: &[Observation<I, A>]) -> SummaryDataset<I, A>
where
    I: Ord + Clone + Send + Sync,
    A: Ord + Clone + Send + Sync,
{
    let map = raw
        .par_iter()
        .fold(BTreeMap::new, |mut acc: CountMap<I, A>, obs| {
            record(&mut acc, obs.item.clone(), obs.annotation.clone(), 1);
            acc
        })
        .reduce(BTreeMap::new, merge_count_maps);
    SummaryDataset::from_count_map(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(u32, &'static str)]) -> Vec<Observation<u32, &'static str>> {
        pairs.iter().copied().map(Observation::from).collect()
    }

    #[test]
    fn duplicates_are_counted_not_deduplicated() {
        let summary = to_summary(&raw(&[(1, "B"), (1, "B"), (1, "A")]));
        let counts = summary.get(&1).unwrap();
        assert_eq!(counts.get(&"B"), 2);
        assert_eq!(counts.get(&"A"), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn single_observation_yields_total_one() {
        let summary = to_summary(&raw(&[(7, "x")]));
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get(&7).unwrap().total(), 1);
    }

    #[test]
    fn empty_raw_dataset_is_empty_summary() {
        let summary = to_summary::<u32, &str>(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total_annotations(), 0);
    }

    #[test]
    fn from_counts_drops_zero_counts() {
        let summary =
            SummaryDataset::from_counts([(1, vec![("A", 0), ("B", 2)])]).unwrap();
        let counts = summary.get(&1).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&"A"), 0);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn from_counts_rejects_item_without_annotations() {
        let err = SummaryDataset::from_counts([
            (1, vec![("A", 1)]),
            (2, vec![("A", 0), ("B", 0)]),
        ])
        .unwrap_err();
        assert_eq!(err, SummaryError::EmptyItem { item: "2".into() });
    }

    #[test]
    fn from_counts_sums_repeated_keys() {
        let summary =
            SummaryDataset::from_counts([(1, vec![("A", 1)]), (1, vec![("A", 2), ("B", 1)])])
                .unwrap();
        assert_eq!(summary.get(&1).unwrap().get(&"A"), 3);
        assert_eq!(summary.total_annotations(), 4);
    }

    #[test]
    fn merge_adds_pointwise() {
        let left = to_summary(&raw(&[(1, "A"), (2, "B")]));
        let right = to_summary(&raw(&[(1, "A"), (3, "C")]));
        let merged = left.merge(right);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(&1).unwrap().get(&"A"), 2);
        assert_eq!(merged.get(&1).unwrap().total(), 2);
        assert_eq!(merged.total_annotations(), 4);
    }

    #[test]
    fn retain_items_filters_keys() {
        let summary = to_summary(&raw(&[(1, "A"), (2, "B"), (3, "C")]));
        let kept = summary.retain_items(|item| *item != 2);
        assert_eq!(kept.items().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let data = raw(&[(1, "A"), (2, "B"), (1, "A"), (3, "C"), (2, "A")]);
        assert_eq!(to_summary_parallel(&data), SummaryDataset::from_observations(data.clone()));
    }
}
