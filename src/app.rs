//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the screening pipeline
//! - prints terminal output
//! - renders the chart dashboard and assembles the PDF report
//! - writes output files

use clap::Parser;

use crate::cli::{CheckArgs, Command, ReportArgs, SampleArgs};
use crate::domain::{ReportConfig, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `vitals` binary.
pub fn run() -> Result<(), AppError> {
    // `vitals --csv data.csv` should behave like `vitals report --csv data.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the convenient default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Check(args) => handle_check(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = report_config_from_args(&args);
    let run = pipeline::run_screen(&config.csv_path)?;

    println!("{}", crate::report::format::format_run_summary(&run.ingest));
    println!("{}", crate::report::format::format_anomaly_table(&run.anomalies));
    println!("{}", crate::report::format::format_advisories(&run.advisories));

    let chart = crate::plot::render_chart(&run.ingest.records, config.chart_width, config.chart_height)?;
    if let Some(path) = &config.chart_export {
        crate::io::export::write_artifact(path, &chart)?;
    }

    let document = crate::report::pdf::assemble_report(
        &config.name,
        config.age,
        &run.ingest.records,
        &run.anomalies,
        &run.advisories,
        &chart,
    )?;
    crate::io::export::write_artifact(&config.out_path, &document)?;

    println!("Wrote report to '{}'.", config.out_path.display());
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let run = pipeline::run_screen(&args.csv)?;

    println!("{}", crate::report::format::format_run_summary(&run.ingest));
    println!("{}", crate::report::format::format_anomaly_table(&run.anomalies));
    println!("{}", crate::report::format::format_advisories(&run.advisories));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let records = crate::data::generate_sample(&config)?;
    crate::data::sample::write_sample_csv(&config.out_path, &records)?;

    println!(
        "Wrote {} days of sample metrics to '{}'.",
        records.len(),
        config.out_path.display()
    );
    Ok(())
}

pub fn report_config_from_args(args: &ReportArgs) -> ReportConfig {
    ReportConfig {
        csv_path: args.csv.clone(),
        name: args.name.clone(),
        age: args.age,
        out_path: args.out.clone(),
        chart_export: args.export_chart.clone(),
        chart_width: args.width,
        chart_height: args.height,
    }
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        out_path: args.out.clone(),
        days: args.days,
        seed: args.seed,
        anomaly_prob: args.anomaly_prob,
    }
}

/// Rewrite argv so `vitals` defaults to `vitals report`.
///
/// Rules:
/// - `vitals`                      -> `vitals report`
/// - `vitals --csv data.csv ...`   -> `vitals report --csv data.csv ...`
/// - `vitals --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "check" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "report flags".
    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
