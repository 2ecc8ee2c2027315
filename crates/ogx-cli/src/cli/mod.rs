//! CLI for the ogx OpenGraph inspector.

mod duration;

use anyhow::Result;
use clap::Parser;
use ogx_core::config::OgxConfig;
use ogx_core::report::{self, OutputFormat};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub use duration::parse_duration;

const EXAMPLES: &str = "Examples:
  ogx https://example.com
  ogx example.com
  ogx example.com --json";

/// Inspect OpenGraph metadata for a URL.
#[derive(Debug, Parser)]
#[command(name = "ogx", version)]
#[command(about = "Inspect OpenGraph metadata for a URL", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// URL or bare domain to inspect (https:// is assumed when no scheme is given).
    pub url: String,

    /// HTTP request timeout, e.g. 10s, 500ms, 1m30s [default: 10s].
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Read fetch settings (timeout, size cap, user agent) from a TOML file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Resolves fetch settings: config file (if any), then command-line overrides.
    pub fn load_config(&self) -> Result<OgxConfig> {
        let mut cfg = match &self.config {
            Some(path) => OgxConfig::load_from(path)?,
            None => OgxConfig::default(),
        };
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout.as_secs_f64();
        }
        Ok(cfg)
    }

    pub fn run(&self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let inspection = ogx_core::inspect(&self.url, &cfg.fetch_options())?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        report::render(&mut out, &inspection, self.output_format())?;
        Ok(())
    }
}

pub fn run_from_args() -> Result<()> {
    Cli::parse().run()
}

#[cfg(test)]
mod tests;
