#![no_main]

use libfuzzer_sys::fuzz_target;
use xrr_summary::{Observation, SummaryDataset, to_summary, to_summary_parallel};

const MAX_INPUT_SIZE: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }

    // Byte pairs: item id, annotation label.
    let raw: Vec<Observation<u8, u8>> = data
        .chunks_exact(2)
        .map(|c| Observation::new(c[0] % 32, c[1] % 8))
        .collect();

    let summary = to_summary(&raw);
    assert_eq!(summary.total_annotations(), raw.len() as u64);
    for (_, counts) in summary.iter() {
        assert!(counts.total() >= 1);
        assert!(counts.iter().all(|(_, c)| c >= 1));
    }

    assert_eq!(summary, to_summary_parallel(&raw));

    let mut reversed = raw.clone();
    reversed.reverse();
    assert_eq!(summary, SummaryDataset::from_observations(reversed));
});
