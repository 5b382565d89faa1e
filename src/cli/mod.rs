//! Command-line interface for the attendance pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::OverAttendancePolicy;
use crate::core::records::AttendanceReport;
use crate::processors::{AttendancePipeline, PipelineError};
use crate::PipelineConfig;

/// Exit status for the recoverable empty-input case.
const EXIT_EMPTY_INPUT: i32 = 2;

#[derive(Parser)]
#[command(name = "attendance-pipeline")]
#[command(about = "Student attendance cleaning and reporting", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean entered rows and produce the attendance report
    Report {
        /// CSV file with Student ID, Name, Total Class, Attended Class columns
        input: PathBuf,
        /// Output CSV path (defaults to the configured report file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reject zero totals instead of imputing the batch mean
        #[arg(long)]
        no_impute: bool,
        /// Handling of attended > total: accept, clamp or reject
        #[arg(long)]
        over_attendance: Option<OverAttendancePolicy>,
        /// Print the report without writing the CSV export
        #[arg(long)]
        no_export: bool,
    },

    /// Write an empty entry sheet with the expected column headers
    Template {
        /// Output CSV path
        output: PathBuf,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Output YAML path
        output: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Shorten a value to fit the summary box.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let head: String = value.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", fit(title, 62));
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        println!("║ {:<20}: {:<39} ║", key, fit(value, 39));
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

/// Print the cleaned table as aligned text columns.
fn print_table(report: &AttendanceReport) {
    println!(
        "{:<12} {:<24} {:>11} {:>14} {:>10}  {}",
        "Student ID", "Name", "Total Class", "Attended Class", "Attendance", "Status"
    );
    for r in &report.table {
        let marker = if r.total_imputed { "*" } else { " " };
        println!(
            "{:<12} {:<24} {:>10}{} {:>14} {:>9.2}%  {}",
            fit(&r.student_id, 12),
            fit(&r.name, 24),
            r.total_classes,
            marker,
            r.attended_classes,
            r.attendance_pct,
            r.status
        );
    }
    if report.summary.imputed_totals > 0 {
        println!("* total classes imputed from the batch mean");
    }
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    let result = match cli.command {
        Commands::Report {
            input,
            output,
            no_impute,
            over_attendance,
            no_export,
        } => cmd_report(&input, output, no_impute, over_attendance, no_export, &config),
        Commands::Template { output } => cmd_template(&output),
        Commands::InitConfig { output } => cmd_init_config(&output, &config),
    };

    if let Err(e) = result {
        match e.downcast_ref::<PipelineError>() {
            Some(pipeline_err) if pipeline_err.is_warning() => {
                warn!("{}", pipeline_err);
                eprintln!("Please fill in all student details before generating the report.");
                std::process::exit(EXIT_EMPTY_INPUT);
            }
            _ => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn cmd_report(
    input: &Path,
    output: Option<PathBuf>,
    no_impute: bool,
    over_attendance: Option<OverAttendancePolicy>,
    no_export: bool,
    config: &PipelineConfig,
) -> Result<()> {
    use crate::core::{loaders, writers};

    let start = Instant::now();

    let pipeline = AttendancePipeline::from_config(config)
        .with_imputation(config.imputation.enabled && !no_impute)
        .with_over_attendance(over_attendance.unwrap_or(config.validation.over_attendance));

    let spinner = create_spinner("Loading student entries...");

    let records = match loaders::load_entries_csv(input, config.input.title_case_names) {
        Ok(records) => records,
        Err(loaders::LoaderError::EmptyFile(path)) => {
            spinner.finish_and_clear();
            info!("No complete entries in {}", path.display());
            return Err(PipelineError::EmptyInput.into());
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| format!("Failed to load entries from {}", input.display()));
        }
    };

    spinner.set_message("Cleaning attendance data...");
    let report = pipeline.process(&records);
    spinner.finish_and_clear();
    let report = report?;

    print_table(&report);

    let export_path = if no_export {
        None
    } else {
        let path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
        writers::write_report_csv(&path, &report.table)
            .with_context(|| format!("Failed to export report to {}", path.display()))?;
        Some(path)
    };

    let summary = &report.summary;
    print_summary(
        "Attendance Report",
        &[
            ("Input file", input.display().to_string()),
            ("Entries read", records.len().to_string()),
            ("Students", report.table.len().to_string()),
            ("Duplicates removed", summary.duplicates_removed.to_string()),
            ("Totals imputed", summary.imputed_totals.to_string()),
            ("Clamped", summary.clamped.to_string()),
            ("Average attendance", format!("{}%", summary.average_display())),
            ("Below 75%", summary.below_threshold.len().to_string()),
            (
                "Export",
                export_path
                    .as_ref()
                    .map_or_else(|| "skipped".to_string(), |p| p.display().to_string()),
            ),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );

    if !summary.below_threshold.is_empty() {
        println!("Students below 75% attendance:");
        for r in &summary.below_threshold {
            println!("  - {} ({}): {:.2}%", r.student_id, r.name, r.attendance_pct);
        }
    }

    Ok(())
}

fn cmd_template(output: &Path) -> Result<()> {
    use crate::core::writers;

    writers::write_entry_template(output)
        .with_context(|| format!("Failed to write template to {}", output.display()))?;

    println!("Wrote entry template: {}", output.display());
    Ok(())
}

fn cmd_init_config(output: &Path, config: &PipelineConfig) -> Result<()> {
    config
        .to_yaml(output)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to write config to {}", output.display()))?;

    println!("Wrote config: {}", output.display());
    Ok(())
}
