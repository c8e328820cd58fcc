//! E2E tests for `xrr irep`.

mod common;

use common::{irep_csv, write, xrr_cmd};
use predicates::prelude::*;
use tempfile::tempdir;

fn dataset() -> String {
    irep_csv(&[
        (1, "youtube", 1, &["LOVE", "AWE"]),
        (1, "youtube", 2, &["LOVE"]),
        (2, "youtube", 1, &[]),
        (3, "youtube", 2, &["SADNESS"]),
        (1, "vimeo", 3, &["LOVE"]),
        (2, "vimeo", 3, &["AWE"]),
        (3, "vimeo", 4, &[]),
        (1, "tiktok", 5, &["LOVE"]),
        (2, "tiktok", 5, &[]),
        (3, "tiktok", 6, &["SADNESS", "LOVE"]),
    ])
}

#[test]
fn default_moods_cover_every_platform_pair() {
    let dir = tempdir().unwrap();
    let input = write(&dir, "irep.csv", &dataset());
    let output = xrr_cmd(dir.path())
        .args(["--format", "json", "irep"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json["rows"].as_array().unwrap();
    // 5 default moods x 6 ordered pairs of 3 platforms
    assert_eq!(rows.len(), 30);
    assert_eq!(rows[0]["label"], "CONTEMPLATION");
    assert_eq!(rows[0]["x"], "youtube");
    assert_eq!(rows[0]["y"], "vimeo");
    // Nobody marked contemplation, so there is nothing to disagree about.
    assert_eq!(rows[0]["failure"]["code"], "no_expected_disagreement");
}

#[test]
fn mood_flag_selects_moods() {
    let dir = tempdir().unwrap();
    let input = write(&dir, "irep.csv", &dataset());
    xrr_cmd(dir.path())
        .args(["irep", "--mood", "love", "--mood", "AWE"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("|LOVE|youtube|vimeo|3|"))
        .stdout(predicate::str::contains("|AWE|tiktok|youtube|3|"))
        .stdout(predicate::str::contains("SADNESS").not());
}

#[test]
fn moods_from_settings_file() {
    let dir = tempdir().unwrap();
    let input = write(&dir, "irep.csv", &dataset());
    let config = write(&dir, "custom.toml", "moods = [\"SADNESS\"]\nformat = \"tsv\"\n");
    let output = xrr_cmd(dir.path())
        .arg("irep")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 7);
    assert!(stdout.lines().skip(1).all(|l| l.starts_with("SADNESS\t")));
}

#[test]
fn unknown_mood_is_rejected_by_the_parser() {
    let dir = tempdir().unwrap();
    let input = write(&dir, "irep.csv", &dataset());
    xrr_cmd(dir.path())
        .args(["irep", "--mood", "joy"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mood 'joy'"));
}

#[test]
fn truncated_row_fails() {
    let dir = tempdir().unwrap();
    let input = write(&dir, "irep.csv", "id,platform,rater\n1,youtube,1\n");
    xrr_cmd(dir.path())
        .arg("irep")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 35 columns, found 3"));
}
