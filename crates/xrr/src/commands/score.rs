use std::path::Path;

use anyhow::Result;
use tracing::info;
use xrr_core::{PairOutcome, build_receipt, compute_xrr_from_raw, score_rows};
use xrr_settings::XrrSettings;
use xrr_types::XrrReceipt;

use crate::cli::ScoreArgs;
use crate::input::read_observations;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn handle(args: &ScoreArgs, settings: &XrrSettings) -> Result<XrrReceipt> {
    let raw_x = read_observations(&args.x)?;
    let raw_y = read_observations(&args.y)?;
    info!(x = raw_x.len(), y = raw_y.len(), "scoring two datasets");

    let outcome = PairOutcome {
        x: display_name(&args.x),
        y: display_name(&args.y),
        result: compute_xrr_from_raw(&raw_x, &raw_y, &settings.distance, settings.metric),
    };
    let rows = score_rows(&args.label, &[outcome]);
    Ok(build_receipt(rows, settings.distance, settings.metric))
}
