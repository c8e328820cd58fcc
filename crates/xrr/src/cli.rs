use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use xrr_irep::Mood;
use xrr_types::{DistanceKind, MetricKind, ReportFormat};

/// `xrr`: cross-replication reliability of two annotation datasets.
///
/// Scores report how well a replication of a labelling experiment agrees with
/// the original, corrected for chance. Degenerate comparisons are reported as
/// rows with an error code instead of failing the run.
#[derive(Parser, Debug)]
#[command(name = "xrr", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command. Flags override the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Distance between two annotations.
    #[arg(long, value_enum, global = true)]
    pub distance: Option<DistanceKind>,

    /// Metric variant.
    #[arg(long, value_enum, global = true)]
    pub metric: Option<MetricKind>,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    pub format: Option<ReportFormat>,

    /// Decimal places for scores in text formats.
    #[arg(long, global = true)]
    pub decimals: Option<u32>,

    /// Worker threads for parallel reductions.
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Settings file (TOML). Defaults to `xrr.toml` in the working directory when present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log more (repeatable). `XRR_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Score two datasets, each a CSV of `item,annotation` rows with a header.
    Score(ScoreArgs),

    /// Split one CSV by a column and score every ordered pair of its values.
    Partition(PartitionArgs),

    /// Score moods of the IRep dataset across every ordered platform pair.
    Irep(IrepArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Dataset X.
    pub x: PathBuf,

    /// Dataset Y.
    pub y: PathBuf,

    /// Label for the report row.
    #[arg(long, default_value = "xrr")]
    pub label: String,
}

#[derive(Args, Debug, Clone)]
pub struct PartitionArgs {
    /// CSV file with a header row.
    pub input: PathBuf,

    /// Column holding the item identifier.
    #[arg(long, value_name = "COLUMN")]
    pub item: String,

    /// Column whose values split the rows into datasets.
    #[arg(long, value_name = "COLUMN")]
    pub partition: String,

    /// Column holding the annotation. Rows with an empty value are skipped.
    #[arg(long, value_name = "COLUMN")]
    pub annotation: String,

    /// Only score these pairs (`X:Y`, repeatable). Defaults to every ordered pair.
    #[arg(long = "pair", value_name = "X:Y")]
    pub pairs: Vec<String>,

    /// Label for the report rows.
    #[arg(long, default_value = "partition")]
    pub label: String,
}

#[derive(Args, Debug, Clone)]
pub struct IrepArgs {
    /// IRep dataset CSV.
    pub input: PathBuf,

    /// Moods to score (repeatable). Defaults to the configured moods.
    #[arg(long = "mood", value_name = "MOOD")]
    pub moods: Vec<Mood>,
}
