//! Synthetic smartwatch sample generation.
//!
//! Produces a metrics CSV in the exact ingest schema: steady baselines with
//! Normal day-to-day noise, plus occasional injected anomaly days so the
//! screening output is non-trivial. Generation is deterministic for a given
//! seed.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{MetricRecord, SampleConfig};
use crate::error::AppError;

// Baselines for a typical adult day.
const STEPS_MEAN: f64 = 8200.0;
const STEPS_SD: f64 = 2400.0;
const HEART_RATE_MEAN: f64 = 72.0;
const HEART_RATE_SD: f64 = 8.0;
const CALORIES_MEAN: f64 = 2150.0;
const CALORIES_SD: f64 = 260.0;
const SLEEP_MEAN: f64 = 7.1;
const SLEEP_SD: f64 = 0.9;

/// First generated date; fixed so output is reproducible.
const EPOCH: (i32, u32, u32) = (2024, 1, 1);

/// Generate `config.days` consecutive days of synthetic metrics.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<MetricRecord>, AppError> {
    if config.days == 0 {
        return Err(AppError::input("Sample day count must be > 0."));
    }
    if !(0.0..1.0).contains(&config.anomaly_prob) {
        return Err(AppError::input("Anomaly probability must be in [0, 1)."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;

    let start = NaiveDate::from_ymd_opt(EPOCH.0, EPOCH.1, EPOCH.2)
        .ok_or_else(|| AppError::input("Invalid sample epoch."))?;

    let mut records = Vec::with_capacity(config.days);
    for i in 0..config.days {
        let date = start + Duration::days(i as i64);

        let mut steps = STEPS_MEAN + STEPS_SD * noise.sample(&mut rng);
        let mut heart_rate = HEART_RATE_MEAN + HEART_RATE_SD * noise.sample(&mut rng);
        let calories = (CALORIES_MEAN + CALORIES_SD * noise.sample(&mut rng)).max(1200.0);
        let mut sleep_hours = SLEEP_MEAN + SLEEP_SD * noise.sample(&mut rng);

        // Degrade some days into one of the three anomaly shapes so the
        // screening stages have something to flag.
        if rng.gen_bool(config.anomaly_prob) {
            match rng.gen_range(0..3) {
                0 => heart_rate = rng.gen_range(104.0..122.0),
                1 => steps = rng.gen_range(0.0..900.0),
                _ => sleep_hours = rng.gen_range(2.5..4.7),
            }
        }

        records.push(MetricRecord {
            date: date.format("%Y-%m-%d").to_string(),
            steps: steps.max(0.0).round() as u32,
            heart_rate: round1(heart_rate.clamp(40.0, 190.0)),
            calories: round1(calories),
            sleep_hours: round1(sleep_hours.clamp(0.0, 14.0)),
        });
    }

    Ok(records)
}

/// Write generated records as CSV with the exact ingest header names.
pub fn write_sample_csv(path: &Path, records: &[MetricRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::input(format!("Failed to create sample CSV '{}': {e}", path.display()))
    })?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::input(format!("Failed to write sample row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush sample CSV: {e}")))?;

    Ok(())
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::screen::detect_anomalies;

    fn config(days: usize, seed: u64, anomaly_prob: f64) -> SampleConfig {
        SampleConfig {
            out_path: "unused.csv".into(),
            days,
            seed,
            anomaly_prob,
        }
    }

    #[test]
    fn generates_requested_day_count_with_consecutive_dates() {
        let records = generate_sample(&config(10, 42, 0.0)).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[9].date, "2024-01-10");
    }

    #[test]
    fn same_seed_reproduces_the_sample() {
        let first = generate_sample(&config(30, 7, 0.2)).unwrap();
        let second = generate_sample(&config(30, 7, 0.2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_differ() {
        let first = generate_sample(&config(30, 1, 0.2)).unwrap();
        let second = generate_sample(&config(30, 2, 0.2)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn high_anomaly_probability_produces_flagged_rows() {
        let records = generate_sample(&config(30, 42, 0.9)).unwrap();
        assert!(!detect_anomalies(&records).is_empty());
    }

    #[test]
    fn rejects_zero_days() {
        assert_eq!(generate_sample(&config(0, 42, 0.1)).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        assert_eq!(generate_sample(&config(5, 42, 1.5)).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn csv_header_matches_the_ingest_schema() {
        let records = generate_sample(&config(1, 42, 0.0)).unwrap();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&records[0]).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(
            "Date,Steps,Heart Rate (bpm),Calories Burned,Sleep Duration (hours)\n"
        ));
    }
}
