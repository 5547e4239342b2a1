//! CSV ingest and validation.
//!
//! This module is responsible for turning an uploaded-style metrics CSV into
//! clean `MetricRecord`s that are safe to screen and plot.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no screening logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DatasetStats, MetricRecord};
use crate::error::AppError;

/// Required column headers, matched case- and text-exact.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Date",
    "Steps",
    "Heart Rate (bpm)",
    "Calories Burned",
    "Sleep Duration (hours)",
];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: records in file order + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<MetricRecord>,
    /// `None` when the file has a valid header but no usable data rows.
    pub stats: Option<DatasetStats>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and validate a metrics CSV from disk.
pub fn load_metrics(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    load_metrics_from_reader(file)
}

/// Load and validate a metrics CSV from any reader (used directly by tests).
pub fn load_metrics_from_reader(input: impl Read) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);

    // Schema errors abort here, before any row is parsed.
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => records.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = records.len();
    let stats = compute_stats(&records);

    Ok(IngestedData {
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Date"). Strip it so the exact-match check below
    // still works; the match itself stays case-sensitive.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .map(|c| format!("`{c}`"))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(AppError::input(format!(
        "CSV is missing required column(s): {}",
        missing.join(", ")
    )))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<MetricRecord, String> {
    let date = get_required(record, header_map, "Date")?.to_string();
    let steps = parse_steps(get_required(record, header_map, "Steps")?)?;
    let heart_rate = parse_metric(get_required(record, header_map, "Heart Rate (bpm)")?, "Heart Rate (bpm)")?;
    let calories = parse_metric(get_required(record, header_map, "Calories Burned")?, "Calories Burned")?;
    let sleep_hours = parse_metric(
        get_required(record, header_map, "Sleep Duration (hours)")?,
        "Sleep Duration (hours)",
    )?;

    Ok(MetricRecord {
        date,
        steps,
        heart_rate,
        calories,
        sleep_hours,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing `{name}` value."))
}

fn parse_steps(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("Invalid `Steps` value '{s}' (expected a non-negative integer)."))
}

fn parse_metric(s: &str, name: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite `{name}` value."));
    }
    Ok(value)
}

fn compute_stats(records: &[MetricRecord]) -> Option<DatasetStats> {
    let first = records.first()?;
    let last = records.last()?;

    let mut stats = DatasetStats {
        n_rows: records.len(),
        first_date: first.date.clone(),
        last_date: last.date.clone(),
        steps_min: u32::MAX,
        steps_max: 0,
        heart_rate_min: f64::INFINITY,
        heart_rate_max: f64::NEG_INFINITY,
        calories_min: f64::INFINITY,
        calories_max: f64::NEG_INFINITY,
        sleep_min: f64::INFINITY,
        sleep_max: f64::NEG_INFINITY,
    };

    for r in records {
        stats.steps_min = stats.steps_min.min(r.steps);
        stats.steps_max = stats.steps_max.max(r.steps);
        stats.heart_rate_min = stats.heart_rate_min.min(r.heart_rate);
        stats.heart_rate_max = stats.heart_rate_max.max(r.heart_rate);
        stats.calories_min = stats.calories_min.min(r.calories);
        stats.calories_max = stats.calories_max.max(r.calories);
        stats.sleep_min = stats.sleep_min.min(r.sleep_hours);
        stats.sleep_max = stats.sleep_max.max(r.sleep_hours);
    }

    Some(stats)
}
