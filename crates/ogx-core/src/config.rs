//! Optional TOML configuration for fetch parameters.
//!
//! Nothing is read implicitly; the CLI loads a file only when asked to.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::fetch::{self, FetchOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OgxConfig {
    /// Whole-request timeout in seconds (fractions allowed).
    pub timeout_secs: f64,
    /// Maximum number of body bytes handed to the tokenizer.
    pub max_body_bytes: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for OgxConfig {
    fn default() -> Self {
        Self {
            timeout_secs: fetch::DEFAULT_TIMEOUT.as_secs_f64(),
            max_body_bytes: fetch::DEFAULT_MAX_BODY_BYTES,
            user_agent: fetch::default_user_agent(),
        }
    }
}

impl OgxConfig {
    /// Load configuration from a TOML file; absent fields keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: OgxConfig =
            toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            anyhow::bail!("timeout_secs must be a positive number, got {}", self.timeout_secs);
        }
        if Duration::try_from_secs_f64(self.timeout_secs).is_err() {
            anyhow::bail!("timeout_secs is too large, got {}", self.timeout_secs);
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be greater than zero");
        }
        Ok(())
    }

    /// Out-of-range timeouts (only reachable by skipping `load_from`) fall back to the default.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::try_from_secs_f64(self.timeout_secs)
                .ok()
                .filter(|t| !t.is_zero())
                .unwrap_or(fetch::DEFAULT_TIMEOUT),
            max_body_bytes: self.max_body_bytes,
            user_agent: self.user_agent.clone(),
        }
    }
}
