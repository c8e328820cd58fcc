use anyhow::{Context, Result};
use tracing::info;
use xrr_core::{build_receipt, score_pairs, score_rows};
use xrr_irep::{IRepDataset, Mood};
use xrr_settings::XrrSettings;
use xrr_types::XrrReceipt;

use crate::cli::IrepArgs;

/// Moods from the command line, else from settings.
fn selected_moods(args: &IrepArgs, settings: &XrrSettings) -> Result<Vec<Mood>> {
    if !args.moods.is_empty() {
        return Ok(args.moods.clone());
    }
    settings
        .moods
        .iter()
        .map(|m| m.parse::<Mood>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid mood in settings")
}

pub(crate) fn handle(args: &IrepArgs, settings: &XrrSettings) -> Result<XrrReceipt> {
    let dataset = IRepDataset::from_path(&args.input)
        .with_context(|| format!("Failed to load IRep dataset {}", args.input.display()))?;
    let moods = selected_moods(args, settings)?;
    let pairs = dataset.platform_pairs();
    info!(
        entries = dataset.len(),
        platforms = dataset.platforms().len(),
        moods = moods.len(),
        "scoring IRep moods"
    );

    let mut rows = Vec::with_capacity(moods.len() * pairs.len());
    for mood in moods {
        let partitions = dataset.mood_partitions(mood);
        let outcomes = score_pairs(&partitions, &pairs, &settings.distance, settings.metric);
        rows.extend(score_rows(mood.as_str(), &outcomes));
    }
    Ok(build_receipt(rows, settings.distance, settings.metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(moods: Vec<Mood>) -> IrepArgs {
        IrepArgs {
            input: "irep.csv".into(),
            moods,
        }
    }

    #[test]
    fn default_moods_come_from_settings() {
        let moods = selected_moods(&args(vec![]), &XrrSettings::default()).unwrap();
        assert_eq!(
            moods,
            vec![
                Mood::Contemplation,
                Mood::Love,
                Mood::Awe,
                Mood::Sadness,
                Mood::Contentment
            ]
        );
    }

    #[test]
    fn command_line_moods_win() {
        let moods = selected_moods(&args(vec![Mood::Pain]), &XrrSettings::default()).unwrap();
        assert_eq!(moods, vec![Mood::Pain]);
    }

    #[test]
    fn unknown_configured_mood_is_an_error() {
        let settings = XrrSettings {
            moods: vec!["JOY".into()],
            ..XrrSettings::default()
        };
        let err = selected_moods(&args(vec![]), &settings).unwrap_err();
        assert!(format!("{err:#}").contains("unknown mood 'JOY'"));
    }
}
