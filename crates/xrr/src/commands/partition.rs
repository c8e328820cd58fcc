use anyhow::{Context, Result, bail};
use tracing::info;
use xrr_core::{Observation, build_receipt, ordered_pairs, partition_by, score_pairs, score_rows};
use xrr_settings::XrrSettings;
use xrr_types::XrrReceipt;

use crate::cli::PartitionArgs;
use crate::input::{Table, parse_annotation};

/// Parses `X:Y` pair selectors.
fn parse_pair(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((x, y)) if !x.is_empty() && !y.is_empty() => Ok((x.to_string(), y.to_string())),
        _ => bail!("Invalid pair '{raw}': expected `X:Y`"),
    }
}

pub(crate) fn handle(args: &PartitionArgs, settings: &XrrSettings) -> Result<XrrReceipt> {
    let table = Table::read(&args.input)?;
    let item_col = table.column(&args.item)?;
    let partition_col = table.column(&args.partition)?;
    let annotation_col = table.column(&args.annotation)?;

    let partitions = partition_by(
        &table.records,
        |r| r.get(partition_col).unwrap_or_default().to_string(),
        |r| {
            let item = r.get(item_col)?;
            let label = r.get(annotation_col).filter(|a| !a.is_empty())?;
            Some(Observation::new(item.to_string(), parse_annotation(label)))
        },
    );

    let pairs = if args.pairs.is_empty() {
        let keys: Vec<String> = partitions.keys().cloned().collect();
        ordered_pairs(&keys)
    } else {
        args.pairs
            .iter()
            .map(|p| parse_pair(p))
            .collect::<Result<Vec<_>>>()
            .context("Failed to parse --pair")?
    };
    info!(
        partitions = partitions.len(),
        pairs = pairs.len(),
        "scoring partition pairs"
    );

    let outcomes = score_pairs(&partitions, &pairs, &settings.distance, settings.metric);
    let rows = score_rows(&args.label, &outcomes);
    Ok(build_receipt(rows, settings.distance, settings.metric))
}

#[cfg(test)]
mod tests {
    use super::parse_pair;

    #[test]
    fn pair_selector_splits_on_first_colon() {
        assert_eq!(
            parse_pair("us:in").unwrap(),
            ("us".to_string(), "in".to_string())
        );
        assert_eq!(parse_pair("a:b:c").unwrap().1, "b:c");
    }

    #[test]
    fn malformed_pair_selector_is_rejected() {
        for raw in ["us", ":in", "us:", ""] {
            assert!(parse_pair(raw).is_err(), "{raw}");
        }
    }
}
