//! Shared screening pipeline used by the `report` and `check` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> anomaly detection -> recommendations
//!
//! The commands then focus on presentation (terminal output, chart rendering,
//! PDF assembly).

use std::path::Path;

use crate::domain::MetricRecord;
use crate::error::AppError;
use crate::io::ingest::{self, IngestedData};
use crate::rules::screen;

/// All computed outputs of a single screening run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub anomalies: Vec<MetricRecord>,
    pub advisories: Vec<String>,
}

/// Execute the screening pipeline for a metrics CSV.
pub fn run_screen(csv_path: &Path) -> Result<RunOutput, AppError> {
    // 1) Ingest and validate the CSV (schema errors abort before any stage).
    let ingest = ingest::load_metrics(csv_path)?;

    // 2) Flag rows breaching any fixed threshold.
    let anomalies = screen::detect_anomalies(&ingest.records);

    // 3) Map the flagged subset to advisories.
    let advisories = screen::recommend(&anomalies);

    Ok(RunOutput {
        ingest,
        anomalies,
        advisories,
    })
}
