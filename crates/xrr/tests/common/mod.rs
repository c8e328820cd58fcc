//! Shared fixtures for xrr CLI tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Per-item `(A count, B count)` of the reference X dataset, including two
/// items Y never saw.
pub const REFERENCE_X: [(u32, usize, usize); 7] = [
    (1, 0, 2),
    (2, 0, 3),
    (3, 2, 0),
    (4, 3, 0),
    (5, 1, 1),
    (6, 3, 0),
    (7, 2, 1),
];

pub const REFERENCE_Y: [(u32, usize, usize); 5] =
    [(1, 0, 2), (2, 1, 1), (3, 1, 1), (4, 1, 1), (5, 2, 0)];

/// A command with a clean working directory and default logging.
pub fn xrr_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_xrr"));
    cmd.current_dir(cwd).env_remove("XRR_LOG");
    cmd
}

pub fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// `item,annotation` CSV with one row per rating.
pub fn counts_csv(rows: &[(u32, usize, usize)]) -> String {
    let mut out = String::from("item,annotation\n");
    for &(item, a, b) in rows {
        for _ in 0..a {
            out.push_str(&format!("{item},A\n"));
        }
        for _ in 0..b {
            out.push_str(&format!("{item},B\n"));
        }
    }
    out
}

/// The reference X and Y datasets written into `dir`.
pub fn reference_files(dir: &TempDir) -> (PathBuf, PathBuf) {
    (
        write(dir, "x.csv", &counts_csv(&REFERENCE_X)),
        write(dir, "y.csv", &counts_csv(&REFERENCE_Y)),
    )
}

pub const MOODS: [&str; 32] = [
    "AMUSEMENT",
    "ANGER",
    "AWE",
    "BOREDOM",
    "CONCENTRATION",
    "CONFUSION",
    "CONTEMPLATION",
    "CONTEMPT",
    "CONTENTMENT",
    "DESIRE",
    "DISAPPOINTMENT",
    "DISGUST",
    "DISTRESS",
    "DOUBT",
    "ECSTASY",
    "ELATION",
    "EMBARRASSMENT",
    "OTHER",
    "FEAR",
    "INTEREST",
    "LOVE",
    "NEUTRAL",
    "PAIN",
    "PRIDE",
    "REALIZATION",
    "RELIEF",
    "SADNESS",
    "SHAME",
    "SURPRISE",
    "SYMPATHY",
    "TRIUMPH",
    "UNSURE",
];

/// IRep CSV; each row is `(item, platform, rater, marked moods)`.
pub fn irep_csv(rows: &[(u32, &str, u32, &[&str])]) -> String {
    let mut out = format!("id,platform,rater,{}\n", MOODS.join(","));
    for (item, platform, rater, marked) in rows {
        let flags: Vec<&str> = MOODS
            .iter()
            .map(|m| if marked.contains(m) { "1" } else { "0" })
            .collect();
        out.push_str(&format!("{item},{platform},{rater},{}\n", flags.join(",")));
    }
    out
}
