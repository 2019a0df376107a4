//! # offtarget-predictor
//!
//! Command-line caller for the simulated off-target risk engine.
//!
//! ```bash
//! # Single guide, text report
//! offtarget-predictor -s GCTTCGAGCTGATCGTACGG -c open
//!
//! # JSON report written to a file
//! offtarget-predictor -s GCTTCGAGCTGATCGTACGG -c closed -f json -o report.json
//!
//! # Many guides from a CSV with header `sequence,chromatin_state`
//! offtarget-predictor -b guides.csv -f csv -o sites.csv
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracing::info;

use offtarget_predictor::batch::{
    read_batch, render_batch_json, render_batch_text, run_batch, write_batch_csv, BatchOutcome,
};
use offtarget_predictor::config::{init_logging, OutputFormat, ReportConfig};
use offtarget_predictor::report::{render_json, render_text, write_sites_csv};
use offtarget_predictor::{predict, ChromatinState, GuideSequence, PredictionResult};

fn main() -> Result<()> {
    let matches = Command::new("offtarget-predictor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulated, deterministic off-target risk report for CRISPR guides")
        .arg(
            Arg::new("sequence")
                .short('s')
                .long("sequence")
                .value_name("SEQ")
                .help("Guide sequence, 20-23 nt of A/C/G/T")
                .required_unless_present("batch")
                .conflicts_with("batch"),
        )
        .arg(
            Arg::new("chromatin")
                .short('c')
                .long("chromatin")
                .value_name("STATE")
                .help("Chromatin state of the target region (single-guide mode only)")
                .value_parser(["open", "euchromatin", "closed", "heterochromatin"])
                .default_value("open")
                .conflicts_with("batch"),
        )
        .arg(
            Arg::new("batch")
                .short('b')
                .long("batch")
                .value_name("FILE")
                .help("CSV file with columns sequence,chromatin_state"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text, json, csv")
                .default_value("text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("simulate-latency")
                .long("simulate-latency")
                .help("Wait one second before predicting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(|s| s.parse::<OutputFormat>())
        .transpose()?
        .unwrap_or_default();

    let config = ReportConfig {
        format,
        output: matches.get_one::<String>("output").map(PathBuf::from),
        simulate_latency: matches.get_flag("simulate-latency"),
        quiet: matches.get_flag("quiet"),
    };
    init_logging(&config);

    // Render fully before touching the output file, so a failed run never
    // truncates an existing report.
    let report = if let Some(batch_path) = matches.get_one::<String>("batch") {
        let file = File::open(batch_path).with_context(|| format!("opening {}", batch_path))?;
        let records = read_batch(file)?;
        wait(&config);
        let outcomes = run_batch(&records);
        render_batch(&outcomes, config.format)?
    } else {
        let raw = matches
            .get_one::<String>("sequence")
            .context("a guide sequence is required")?;
        let guide = GuideSequence::parse(raw)?;
        let state: ChromatinState = matches
            .get_one::<String>("chromatin")
            .map(String::as_str)
            .unwrap_or("open")
            .parse()?;

        info!("Predicting off-target risk for {} ({})", guide, state);
        wait(&config);
        let result = predict(guide.as_str(), state.as_str())?;
        info!(
            "Overall risk {:.2}%, {} sites reported",
            result.overall_risk,
            result.off_target_sites.len()
        );
        render_single(&guide, &result, config.format)?
    };

    match &config.output {
        Some(path) => {
            let mut file = BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            );
            file.write_all(&report)?;
            file.flush()?;
            info!("Report saved to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&report)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_single(
    guide: &GuideSequence,
    result: &PredictionResult,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Text => write!(buffer, "{}", render_text(guide.as_str(), result))?,
        OutputFormat::Json => writeln!(buffer, "{}", render_json(result)?)?,
        OutputFormat::Csv => write_sites_csv(&mut buffer, result)?,
    }
    Ok(buffer)
}

fn render_batch(outcomes: &[BatchOutcome], format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Text => writeln!(buffer, "{}", render_batch_text(outcomes))?,
        OutputFormat::Json => writeln!(buffer, "{}", render_batch_json(outcomes)?)?,
        OutputFormat::Csv => write_batch_csv(&mut buffer, outcomes)?,
    }
    Ok(buffer)
}

fn wait(config: &ReportConfig) {
    if let Some(delay) = config.latency() {
        std::thread::sleep(delay);
    }
}
