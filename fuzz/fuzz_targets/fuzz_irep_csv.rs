#![no_main]

use libfuzzer_sys::fuzz_target;
use xrr_irep::{IRepDataset, Mood};

const MAX_INPUT_SIZE: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }

    // Errors are fine; panics are not.
    let Ok(dataset) = IRepDataset::from_reader(data) else {
        return;
    };

    let platforms = dataset.platforms();
    let n = platforms.len();
    assert_eq!(dataset.platform_pairs().len(), n * n.saturating_sub(1));

    let parts = dataset.mood_partitions(Mood::Love);
    let total: usize = parts.values().map(Vec::len).sum();
    assert_eq!(total, dataset.len());
});
