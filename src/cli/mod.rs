//! Command-line parsing for the smartwatch health screener.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the screening/rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about = "Smartwatch health log screener and PDF report builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Screen a metrics CSV, render the chart dashboard, and write the PDF report.
    Report(ReportArgs),
    /// Print anomalies and recommendations only (useful for scripting).
    Check(CheckArgs),
    /// Generate a synthetic metrics CSV for demos and tests.
    Sample(SampleArgs),
}

/// Options for the full report pipeline.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Metrics CSV with the exact columns: Date, Steps, Heart Rate (bpm),
    /// Calories Burned, Sleep Duration (hours).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Name shown in the report title.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Age shown in the report title.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=120))]
    pub age: u32,

    /// Output path for the PDF report.
    #[arg(long, default_value = "health_report.pdf")]
    pub out: PathBuf,

    /// Also write the chart dashboard as a standalone PNG.
    #[arg(long = "export-chart", value_name = "PNG")]
    pub export_chart: Option<PathBuf>,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 700)]
    pub height: u32,
}

/// Options for screening without producing a report.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Metrics CSV (same schema as `report`).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, default_value = "sample_metrics.csv")]
    pub out: PathBuf,

    /// Number of days to generate.
    #[arg(long, default_value_t = 30)]
    pub days: usize,

    /// Random seed for reproducible output.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Probability that a generated day carries an injected anomaly.
    #[arg(long = "anomaly-prob", default_value_t = 0.15)]
    pub anomaly_prob: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_is_limited_to_plausible_values() {
        let err = Cli::try_parse_from(["vitals", "report", "--csv", "x.csv", "--age", "130"]);
        assert!(err.is_err());

        let ok = Cli::try_parse_from(["vitals", "report", "--csv", "x.csv", "--age", "120"]);
        assert!(ok.is_ok());
    }
}
