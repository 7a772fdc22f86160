use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults suitable for local use. Command line flags take
/// precedence over the values loaded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Mimic the response times of the remote review backend (default: `false`).
    pub simulated_latency: bool,
    /// Directory the CSV exports are written to (default: `.`).
    pub export_dir: PathBuf,
    /// Number of tracks the demo batch is generated with (default: `5`).
    pub demo_track_count: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            simulated_latency: false,
            export_dir: PathBuf::from("."),
            demo_track_count: 5,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default |
    /// |---------------------|---------|
    /// | `SIMULATED_LATENCY` | `false` |
    /// | `EXPORT_DIR`        | `.`     |
    /// | `DEMO_TRACK_COUNT`  | `5`     |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let simulated_latency = match lookup("SIMULATED_LATENCY") {
            Some(value) => parse_flag(&value).context("SIMULATED_LATENCY must be a boolean")?,
            None => defaults.simulated_latency,
        };

        let export_dir = lookup("EXPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let demo_track_count = match lookup("DEMO_TRACK_COUNT") {
            Some(value) => value
                .trim()
                .parse()
                .context("DEMO_TRACK_COUNT must be a positive integer")?,
            None => defaults.demo_track_count,
        };

        Ok(Self {
            simulated_latency,
            export_dir,
            demo_track_count,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised flag value '{other}'"),
    }
}
