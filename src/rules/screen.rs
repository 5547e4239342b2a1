//! Threshold screening: anomaly detection and recommendation generation.

use crate::domain::MetricRecord;
use crate::rules::{ALL_CLEAR, RULES};

/// Return every record breaching at least one rule, preserving input order.
pub fn detect_anomalies(records: &[MetricRecord]) -> Vec<MetricRecord> {
    records
        .iter()
        .filter(|r| RULES.iter().any(|rule| (rule.breached)(r)))
        .cloned()
        .collect()
}

/// Map the flagged subset to advisory sentences.
///
/// Each rule contributes its advisory at most once, when at least one record
/// in the subset breaches it. This is a subset-wide existence check, not
/// per-row tagging: two high-heart-rate days still yield a single heart-rate
/// advisory. An empty subset yields exactly the all-clear sentence.
pub fn recommend(anomalies: &[MetricRecord]) -> Vec<String> {
    if anomalies.is_empty() {
        return vec![ALL_CLEAR.to_string()];
    }

    RULES
        .iter()
        .filter(|rule| anomalies.iter().any(|r| (rule.breached)(r)))
        .map(|rule| rule.advisory.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, steps: u32, heart_rate: f64, calories: f64, sleep_hours: f64) -> MetricRecord {
        MetricRecord {
            date: date.to_string(),
            steps,
            heart_rate,
            calories,
            sleep_hours,
        }
    }

    fn healthy(date: &str) -> MetricRecord {
        rec(date, 8000, 65.0, 2200.0, 7.5)
    }

    #[test]
    fn detect_flags_each_threshold_breach() {
        let records = vec![
            rec("2024-01-01", 8000, 110.0, 2000.0, 7.0), // heart rate
            rec("2024-01-02", 500, 70.0, 2000.0, 7.0),   // steps
            rec("2024-01-03", 8000, 70.0, 2000.0, 4.0),  // sleep
            healthy("2024-01-04"),
        ];

        let flagged = detect_anomalies(&records);
        let dates: Vec<&str> = flagged.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn detect_treats_thresholds_as_strict() {
        // Exactly-at-threshold values are not anomalies.
        let records = vec![rec("2024-01-01", 1000, 100.0, 2000.0, 5.0)];
        assert!(detect_anomalies(&records).is_empty());

        let records = vec![rec("2024-01-02", 999, 100.1, 2000.0, 4.9)];
        assert_eq!(detect_anomalies(&records).len(), 1);
    }

    #[test]
    fn detect_preserves_input_order() {
        let records = vec![
            rec("2024-01-03", 100, 70.0, 2000.0, 7.0),
            healthy("2024-01-04"),
            rec("2024-01-01", 100, 70.0, 2000.0, 7.0),
        ];

        let flagged = detect_anomalies(&records);
        let dates: Vec<&str> = flagged.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-01"]);
    }

    #[test]
    fn detect_empty_input_yields_empty_output() {
        assert!(detect_anomalies(&[]).is_empty());
    }

    #[test]
    fn recommend_empty_subset_yields_all_clear() {
        assert_eq!(recommend(&[]), vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn recommend_dedupes_across_rows() {
        // Two heart-rate anomalies still yield exactly one advisory.
        let subset = vec![
            rec("2024-01-01", 8000, 120.0, 2000.0, 7.0),
            rec("2024-01-02", 8000, 130.0, 2000.0, 7.0),
        ];

        let advisories = recommend(&subset);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0], RULES[0].advisory);
    }

    #[test]
    fn recommend_emits_all_three_in_table_order() {
        let subset = vec![
            rec("2024-01-01", 8000, 70.0, 2000.0, 3.0),
            rec("2024-01-02", 200, 70.0, 2000.0, 7.0),
            rec("2024-01-03", 8000, 140.0, 2000.0, 7.0),
        ];

        let advisories = recommend(&subset);
        let expected: Vec<String> = RULES.iter().map(|rule| rule.advisory.to_string()).collect();
        assert_eq!(advisories, expected);
    }

    #[test]
    fn low_step_day_yields_single_step_advisory() {
        let records = vec![rec("2024-01-01", 500, 72.0, 1800.0, 7.0)];

        let flagged = detect_anomalies(&records);
        assert_eq!(flagged.len(), 1);

        let advisories = recommend(&flagged);
        assert_eq!(
            advisories,
            vec!["Increase daily steps to at least 1000 for better health.".to_string()]
        );
    }

    #[test]
    fn healthy_day_yields_all_clear() {
        let records = vec![rec("2024-01-02", 8000, 65.0, 2200.0, 7.5)];

        let flagged = detect_anomalies(&records);
        assert!(flagged.is_empty());

        let advisories = recommend(&flagged);
        assert_eq!(
            advisories,
            vec!["No anomalies detected. Keep up the good work!".to_string()]
        );
    }
}
