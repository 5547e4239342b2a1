//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - carried through the screening pipeline in-memory
//! - written as CSV with the exact on-disk header names
//! - formatted for terminal and PDF output

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One row of smartwatch data for a single date.
///
/// The serde field names match the CSV schema exactly; `data::sample` relies
/// on this to emit files that `io::ingest` accepts verbatim. The date is kept
/// as an opaque label: charts plot rows in file order and use the label only
/// for axis ticks, so nothing downstream needs a parsed calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Steps")]
    pub steps: u32,

    #[serde(rename = "Heart Rate (bpm)")]
    pub heart_rate: f64,

    #[serde(rename = "Calories Burned")]
    pub calories: f64,

    #[serde(rename = "Sleep Duration (hours)")]
    pub sleep_hours: f64,
}

/// Summary stats about the records actually ingested.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub first_date: String,
    pub last_date: String,
    pub steps_min: u32,
    pub steps_max: u32,
    pub heart_rate_min: f64,
    pub heart_rate_max: f64,
    pub calories_min: f64,
    pub calories_max: f64,
    pub sleep_min: f64,
    pub sleep_max: f64,
}

/// A full `report` run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub csv_path: PathBuf,
    /// Name shown in the report title (free text, may be empty).
    pub name: String,
    /// Age shown in the report title; the CLI restricts it to 0-120.
    pub age: u32,
    pub out_path: PathBuf,
    /// Optional standalone PNG export of the chart dashboard.
    pub chart_export: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,
}

/// Configuration for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_path: PathBuf,
    pub days: usize,
    pub seed: u64,
    /// Probability that a generated day carries an injected anomaly.
    pub anomaly_prob: f64,
}
