// src/config.rs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::error::PredictorError;

/// Delay the interactive caller waits before running a prediction.
pub const SIMULATED_LATENCY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable summary plus a site table.
    #[default]
    Text,
    /// Pretty-printed JSON, field names as in the result model.
    Json,
    /// One row per off-target site.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(PredictorError::UnknownOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Options of one command-line run.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub format: OutputFormat,
    /// Report destination; stdout when unset.
    pub output: Option<PathBuf>,
    pub simulate_latency: bool,
    pub quiet: bool,
}

impl ReportConfig {
    pub fn latency(&self) -> Option<Duration> {
        self.simulate_latency.then_some(SIMULATED_LATENCY)
    }

    /// Default log directive when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Setup logging: `RUST_LOG` wins, otherwise the config's default level.
/// Events go to stderr so reports on stdout stay clean.
pub fn init_logging(config: &ReportConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_level()));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
