//! # xrr-irep
//!
//! **Tier 4 (Dataset Loader)**
//!
//! Loads the IRep emotion-rating dataset and cuts it into the per-platform raw
//! datasets the batch driver scores.
//!
//! ## What belongs here
//! * The [`Mood`] vocabulary and its CSV column layout
//! * CSV parsing into [`IRepEntry`] rows
//! * Subset selection by mood and platform
//!
//! ## Example
//! ```ignore
//! use xrr_irep::{IRepDataset, Mood};
//!
//! let dataset = IRepDataset::from_path("irep.csv")?;
//! let parts = dataset.mood_partitions(Mood::Love);
//! let pairs = dataset.platform_pairs();
//! ```

mod dataset;
mod mood;

pub use dataset::{IRepDataset, IRepEntry, IRepError};
pub use mood::{Mood, UnknownMood};
