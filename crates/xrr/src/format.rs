//! Report rendering: Markdown, TSV, CSV and JSON.

use anyhow::Result;
use xrr_types::{ReportFormat, ScoreRow, XrrReceipt};

const OK_STATUS: &str = "ok";
const MISSING: &str = "-";

pub(crate) fn render(receipt: &XrrReceipt, format: ReportFormat, decimals: u32) -> Result<String> {
    match format {
        ReportFormat::Md => Ok(render_md(&receipt.rows, decimals)),
        ReportFormat::Tsv => Ok(render_tsv(&receipt.rows, decimals)),
        ReportFormat::Csv => render_csv(&receipt.rows, decimals),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(receipt)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn number(value: Option<f64>, decimals: u32) -> String {
    match value {
        Some(v) => format!("{v:.prec$}", prec = decimals as usize),
        None => MISSING.to_string(),
    }
}

fn status(row: &ScoreRow) -> String {
    match &row.failure {
        Some(failure) => failure.code.to_string(),
        None => OK_STATUS.to_string(),
    }
}

fn escape_md(value: &str) -> String {
    value.replace('\\', "\\\\").replace('|', "\\|")
}

fn render_md(rows: &[ScoreRow], decimals: u32) -> String {
    let mut s = String::new();
    s.push_str("|Label|X|Y|Items|Observed|Expected|xRR|Status|\n");
    s.push_str("|---|---|---|---:|---:|---:|---:|---|\n");
    for r in rows {
        s.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{}|{}|\n",
            escape_md(&r.label),
            escape_md(&r.x),
            escape_md(&r.y),
            r.overlapping_items,
            number(r.observed, decimals),
            number(r.expected, decimals),
            number(r.score, decimals),
            status(r)
        ));
    }
    s
}

fn render_tsv(rows: &[ScoreRow], decimals: u32) -> String {
    let mut s = String::new();
    s.push_str("Label\tX\tY\tItems\tObserved\tExpected\tXrr\tStatus\n");
    for r in rows {
        s.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            r.label,
            r.x,
            r.y,
            r.overlapping_items,
            number(r.observed, decimals),
            number(r.expected, decimals),
            number(r.score, decimals),
            status(r)
        ));
    }
    s
}

fn render_csv(rows: &[ScoreRow], decimals: u32) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    wtr.write_record([
        "label",
        "x",
        "y",
        "overlapping_items",
        "total_x",
        "total_y",
        "observed",
        "expected",
        "xrr",
        "status",
        "message",
    ])?;
    for r in rows {
        wtr.write_record([
            r.label.clone(),
            r.x.clone(),
            r.y.clone(),
            r.overlapping_items.to_string(),
            r.total_x.to_string(),
            r.total_y.to_string(),
            number(r.observed, decimals),
            number(r.expected, decimals),
            number(r.score, decimals),
            status(r),
            r.failure
                .as_ref()
                .map(|f| f.message.clone())
                .unwrap_or_default(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrr_types::{DistanceKind, ErrorCode, Failure, MetricKind, SCHEMA_VERSION, ToolInfo};

    fn row(score: Option<f64>, failure: Option<Failure>) -> ScoreRow {
        ScoreRow {
            label: "LOVE".into(),
            x: "youtube".into(),
            y: "vimeo".into(),
            overlapping_items: 5,
            total_x: 12,
            total_y: 10,
            observed: score.map(|_| 9.0 / 22.0),
            expected: score.map(|_| 0.5),
            score,
            failure,
        }
    }

    fn receipt() -> XrrReceipt {
        XrrReceipt {
            schema_version: SCHEMA_VERSION,
            generated_at_ms: 0,
            tool: ToolInfo::current(),
            distance: DistanceKind::Nominal,
            metric: MetricKind::WithMissingData,
            rows: vec![
                row(Some(0.18181818), None),
                row(
                    None,
                    Some(Failure::new(
                        ErrorCode::NoExpectedDisagreement,
                        "undefined metric: no expected disagreement",
                    )),
                ),
            ],
        }
    }

    #[test]
    fn markdown_rounds_scores_and_marks_failures() {
        let md = render(&receipt(), ReportFormat::Md, 4).unwrap();
        assert!(md.contains("|LOVE|youtube|vimeo|5|0.4091|0.5000|0.1818|ok|"), "{md}");
        assert!(md.contains("|-|-|-|no_expected_disagreement|"), "{md}");
    }

    #[test]
    fn markdown_escapes_pipes_in_user_cells() {
        let mut receipt = receipt();
        receipt.rows[0].x = "a|b".into();
        receipt.rows[0].y = r"c\d".into();
        let md = render(&receipt, ReportFormat::Md, 4).unwrap();
        assert!(md.contains(r"|LOVE|a\|b|c\\d|5|"), "{md}");
        assert_eq!(escape_md("plain"), "plain");
    }

    #[test]
    fn tsv_has_one_line_per_row_plus_header() {
        let tsv = render(&receipt(), ReportFormat::Tsv, 2).unwrap();
        assert_eq!(tsv.lines().count(), 3);
        assert!(tsv.lines().nth(1).unwrap().ends_with("0.18\tok"));
    }

    #[test]
    fn csv_includes_failure_message() {
        let csv = render(&receipt(), ReportFormat::Csv, 4).unwrap();
        let last = csv.lines().last().unwrap();
        assert!(last.ends_with("no_expected_disagreement,undefined metric: no expected disagreement"));
    }

    #[test]
    fn json_is_the_full_receipt() {
        let json = render(&receipt(), ReportFormat::Json, 4).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["rows"][1]["failure"]["code"], "no_expected_disagreement");
        assert!(value["rows"][1].get("score").is_none());
    }
}
