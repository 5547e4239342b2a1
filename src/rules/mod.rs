//! Fixed health-screening rules.
//!
//! The thresholds and their advisory sentences live in one ordered table so
//! that adding or tuning a rule is a data change, not control-flow surgery.
//! Order matters: `screen::recommend` emits advisories in table order.

use crate::domain::MetricRecord;

pub mod screen;

/// A single screening rule: a violation predicate plus the advisory shown
/// when any record in the flagged subset violates it.
pub struct HealthRule {
    /// Short name used in terminal output.
    pub label: &'static str,
    /// Advisory sentence attached to the rule.
    pub advisory: &'static str,
    /// Violation predicate evaluated per record.
    pub breached: fn(&MetricRecord) -> bool,
}

/// Advisory used when no record breaches any rule.
pub const ALL_CLEAR: &str = "No anomalies detected. Keep up the good work!";

/// The screening table, in reporting order: heart rate, steps, sleep.
pub const RULES: [HealthRule; 3] = [
    HealthRule {
        label: "high heart rate",
        advisory: "Consider consulting a doctor about high heart rate readings.",
        breached: |r: &MetricRecord| r.heart_rate > 100.0,
    },
    HealthRule {
        label: "low step count",
        advisory: "Increase daily steps to at least 1000 for better health.",
        breached: |r: &MetricRecord| r.steps < 1000,
    },
    HealthRule {
        label: "short sleep",
        advisory: "Ensure to get at least 5-7 hours of sleep daily.",
        breached: |r: &MetricRecord| r.sleep_hours < 5.0,
    },
];
