//! Trackconvert CLI - clean and mirror every track CSV in a directory
//!
//! ```bash
//! trackconvert                          # ./*.csv -> ./output
//! trackconvert -i tracks -o converted   # custom directories
//! trackconvert --report report.json     # also write a JSON batch report
//! ```

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use trackconvert::batch::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use trackconvert::{
    run_batch, BatchConfig, BatchReport, ConsoleReporter, PipelineError, Reporter, SilentReporter,
};

#[derive(Parser)]
#[command(name = "trackconvert")]
#[command(about = "Clean and mirror racetrack centerline CSV files", long_about = None)]
struct Cli {
    /// Directory containing the track CSV files
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Directory receiving the converted files
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Also write the batch report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Exit with status 1 if any file failed
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = BatchConfig::new(&cli.input, &cli.output);
    let result = if cli.quiet {
        run(&cli, &config, &SilentReporter)
    } else {
        run(&cli, &config, &ConsoleReporter)
    };

    match result {
        Ok(report) if cli.strict && report.failed() > 0 => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run<R: Reporter>(
    cli: &Cli,
    config: &BatchConfig,
    reporter: &R,
) -> Result<BatchReport, PipelineError> {
    let report = run_batch(config, reporter)?;

    if let Some(path) = &cli.report {
        fs::write(path, report.to_json()?).map_err(|e| PipelineError::filesystem(path, e))?;
        reporter.info(format!("Report written to: {}", path.display()));
    }

    if !report.is_empty() {
        reporter.info(format!(
            "Processing complete! {} converted, {} failed",
            report.succeeded(),
            report.failed()
        ));
    }

    Ok(report)
}
