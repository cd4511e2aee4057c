//! Command line front end: schedule snapshot in, MS Project XML out.

use chrono::NaiveDateTime;
use clap::Parser;
use mspxml_export::export::encoding::TIMESTAMP_FORMAT;
use mspxml_export::{
    ExportOptions, MspXmlExporter, ReportConfig, load_report_from_json, load_schedule_from_json,
};
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mspxml",
    version,
    about = "Export a scheduled project as Microsoft Project XML"
)]
struct Cli {
    /// Schedule snapshot (JSON).
    #[arg(value_name = "SCHEDULE")]
    schedule: PathBuf,

    /// Report definition (JSON). Exports the whole plan scenario when omitted.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Write the document here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fixed creation date, e.g. 2025-03-01T12:00:00.
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_timestamp)]
    generated_at: Option<NaiveDateTime>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|err| err.to_string())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let schedule = load_schedule_from_json(&cli.schedule)?;
    let report = match &cli.report {
        Some(path) => load_report_from_json(path)?,
        None => ReportConfig::default(),
    };
    let options = ExportOptions {
        generated_at: cli.generated_at,
        ..ExportOptions::default()
    };

    let document = MspXmlExporter::new(&schedule, &report, options)?.to_mspxml()?;
    match &cli.output {
        Some(path) => fs::write(path, document)?,
        None => io::stdout().write_all(document.as_bytes())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
