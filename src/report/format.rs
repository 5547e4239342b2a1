//! Formatted terminal output: run summary, anomaly table, advisories.

use crate::domain::MetricRecord;
use crate::io::ingest::IngestedData;
use crate::rules::RULES;

/// Format the run header: ingest counts plus dataset stats.
pub fn format_run_summary(ingest: &IngestedData) -> String {
    let mut out = String::new();

    out.push_str("=== vitals - Smartwatch Health Screen ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));

    match &ingest.stats {
        Some(stats) => {
            out.push_str(&format!("Dates: {} .. {}\n", stats.first_date, stats.last_date));
            out.push_str(&format!(
                "Steps: [{}, {}] | Heart rate: [{:.1}, {:.1}] bpm\n",
                stats.steps_min, stats.steps_max, stats.heart_rate_min, stats.heart_rate_max
            ));
            out.push_str(&format!(
                "Calories: [{:.1}, {:.1}] | Sleep: [{:.1}, {:.1}] h\n",
                stats.calories_min, stats.calories_max, stats.sleep_min, stats.sleep_max
            ));
        }
        None => out.push_str("No data rows.\n"),
    }

    for err in ingest.row_errors.iter().take(5) {
        out.push_str(&format!("  (skipped line {}) {}\n", err.line, err.message));
    }
    if ingest.row_errors.len() > 5 {
        out.push_str(&format!(
            "  ... and {} more skipped rows\n",
            ingest.row_errors.len() - 5
        ));
    }

    out
}

/// Format the flagged-rows table.
pub fn format_anomaly_table(anomalies: &[MetricRecord]) -> String {
    let mut out = String::new();

    out.push_str("Anomalies detected:\n");
    if anomalies.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    out.push_str(&format!(
        "{:<12} {:>8} {:>12} {:>10} {:>10}\n",
        "date", "steps", "heart (bpm)", "calories", "sleep (h)"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<8} {:-<12} {:-<10} {:-<10}\n",
        "", "", "", "", ""
    ));

    for r in anomalies {
        out.push_str(&format!(
            "{:<12} {:>8} {:>12.1} {:>10.1} {:>10.1}\n",
            truncate(&r.date, 12),
            r.steps,
            r.heart_rate,
            r.calories,
            r.sleep_hours,
        ));
    }

    let counts: Vec<String> = RULES
        .iter()
        .map(|rule| {
            let days = anomalies.iter().filter(|r| (rule.breached)(r)).count();
            format!("{}: {days}", rule.label)
        })
        .collect();
    out.push_str(&format!("Breaches: {}\n", counts.join(" | ")));

    out
}

/// Format the advisory list as bullet lines.
pub fn format_advisories(advisories: &[String]) -> String {
    let mut out = String::new();
    out.push_str("Recommendations:\n");
    for advisory in advisories {
        out.push_str(&format!("- {advisory}\n"));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::load_metrics_from_reader;

    fn rec(date: &str, steps: u32, heart_rate: f64, calories: f64, sleep_hours: f64) -> MetricRecord {
        MetricRecord {
            date: date.to_string(),
            steps,
            heart_rate,
            calories,
            sleep_hours,
        }
    }

    #[test]
    fn summary_reports_counts_and_stats() {
        let csv = "Date,Steps,Heart Rate (bpm),Calories Burned,Sleep Duration (hours)\n\
                   2024-01-01,500,72,1800,7\n\
                   2024-01-02,bad,72,1800,7\n";
        let ingest = load_metrics_from_reader(csv.as_bytes()).unwrap();

        let summary = format_run_summary(&ingest);
        assert!(summary.contains("read=2 used=1 skipped=1"));
        assert!(summary.contains("Dates: 2024-01-01 .. 2024-01-01"));
        assert!(summary.contains("(skipped line 3)"));
    }

    #[test]
    fn summary_handles_empty_dataset() {
        let csv = "Date,Steps,Heart Rate (bpm),Calories Burned,Sleep Duration (hours)\n";
        let ingest = load_metrics_from_reader(csv.as_bytes()).unwrap();

        let summary = format_run_summary(&ingest);
        assert!(summary.contains("No data rows."));
    }

    #[test]
    fn anomaly_table_lists_rows_and_breach_counts() {
        let table = format_anomaly_table(&[rec("2024-01-01", 500, 72.0, 1800.0, 7.0)]);
        assert!(table.contains("date"));
        assert!(table.contains("2024-01-01"));
        assert!(table.contains("500"));
        assert!(table.contains("low step count: 1"));
        assert!(table.contains("high heart rate: 0"));
    }

    #[test]
    fn anomaly_table_marks_empty_subset() {
        assert!(format_anomaly_table(&[]).contains("(none)"));
    }

    #[test]
    fn advisories_render_as_bullets() {
        let out = format_advisories(&["Sleep more.".to_string(), "Walk more.".to_string()]);
        assert!(out.contains("- Sleep more.\n"));
        assert!(out.contains("- Walk more.\n"));
    }
}
