#![no_main]

use libfuzzer_sys::fuzz_target;
use xrr_distance::{IntervalSquared, Nominal};
use xrr_metric::{XrrError, compute_xrr};
use xrr_summary::{Observation, to_summary};

const MAX_INPUT_SIZE: usize = 4 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_SIZE {
        return;
    }

    // The first byte splits the remaining byte pairs between X and Y.
    let rest = &data[1..];
    let split = (usize::from(data[0]) * rest.len() / 255) & !1;
    let (left, right) = rest.split_at(split.min(rest.len()));
    let observe = |bytes: &[u8]| -> Vec<Observation<u8, i32>> {
        bytes
            .chunks_exact(2)
            .map(|c| Observation::new(c[0] % 16, i32::from(c[1] % 6)))
            .collect()
    };
    let x = to_summary(&observe(left));
    let y = to_summary(&observe(right));

    for result in [
        compute_xrr(&x, &y, &Nominal),
        compute_xrr(&x, &y, &IntervalSquared),
    ] {
        match result {
            Ok(score) => {
                assert!(score.is_finite());
                assert!(score <= 1.0 + 1e-9);
            }
            Err(XrrError::NoOverlappingItems | XrrError::NoExpectedDisagreement) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let forward = compute_xrr(&x, &y, &Nominal);
    let backward = compute_xrr(&y, &x, &Nominal);
    match (forward, backward) {
        (Ok(a), Ok(b)) => assert!((a - b).abs() < 1e-9),
        (a, b) => assert_eq!(a.is_ok(), b.is_ok()),
    }
});
