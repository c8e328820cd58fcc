//! Scenario-style tests for the public facade.

use xrr_core::{MetricKind, Nominal, Observation, XrrError, compute_xrr_from_raw};

type Raw = Vec<Observation<&'static str, &'static str>>;

fn ratings(pairs: &[(&'static str, &'static str)]) -> Raw {
    pairs.iter().copied().map(Observation::from).collect()
}

#[test]
fn given_identical_replications_when_scored_then_score_is_one() {
    // Given two replications with the same majority-free labels
    let x = ratings(&[("q1", "yes"), ("q1", "yes"), ("q2", "no")]);
    let y = ratings(&[("q1", "yes"), ("q2", "no"), ("q2", "no")]);

    // When
    let s = compute_xrr_from_raw(&x, &y, &Nominal, MetricKind::WithMissingData).unwrap();

    // Then
    assert_eq!(s.score, 1.0);
    assert_eq!(s.observed, 0.0);
}

#[test]
fn given_no_shared_items_when_scored_then_overlap_error() {
    // Given
    let x = ratings(&[("q1", "yes")]);
    let y = ratings(&[("q2", "yes")]);

    // When
    let err = compute_xrr_from_raw(&x, &y, &Nominal, MetricKind::WithMissingData).unwrap_err();

    // Then
    assert_eq!(err, XrrError::NoOverlappingItems);
}

#[test]
fn given_everyone_agrees_on_one_label_when_scored_then_expected_disagreement_error() {
    // Given
    let x = ratings(&[("q1", "yes"), ("q2", "yes")]);
    let y = ratings(&[("q1", "yes"), ("q2", "yes"), ("q3", "no")]);

    // When
    let err = compute_xrr_from_raw(&x, &y, &Nominal, MetricKind::WithMissingData).unwrap_err();

    // Then
    assert_eq!(err, XrrError::NoExpectedDisagreement);
}

#[test]
fn given_opposite_replications_when_scored_then_score_is_negative() {
    // Given
    let x = ratings(&[("q1", "yes"), ("q2", "no")]);
    let y = ratings(&[("q1", "no"), ("q2", "yes")]);

    // When
    let s = compute_xrr_from_raw(&x, &y, &Nominal, MetricKind::WithMissingData).unwrap();

    // Then
    assert!(s.score < 0.0, "score = {}", s.score);
}
