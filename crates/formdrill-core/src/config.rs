//! Drill configuration loaded from `formdrill.toml`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::statistics::DEFAULT_HARDEST_LIMIT;

/// How the end-of-session statistics are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Top-level formdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormdrillConfig {
    /// Formula source file.
    #[serde(default = "default_formulas")]
    pub formulas: PathBuf,
    /// Answers kept per formula.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Hardest formulas listed per topic.
    #[serde(default = "default_hardest_limit")]
    pub hardest_limit: usize,
    /// Count only this many recent answers per formula in reports.
    #[serde(default)]
    pub stats_window: Option<usize>,
    /// Report format.
    #[serde(default)]
    pub report_format: ReportFormat,
}

fn default_formulas() -> PathBuf {
    PathBuf::from("formulas.txt")
}
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
fn default_hardest_limit() -> usize {
    DEFAULT_HARDEST_LIMIT
}

impl Default for FormdrillConfig {
    fn default() -> Self {
        Self {
            formulas: default_formulas(),
            history_capacity: default_history_capacity(),
            hardest_limit: default_hardest_limit(),
            stats_window: None,
            report_format: ReportFormat::default(),
        }
    }
}

impl FormdrillConfig {
    fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            anyhow::bail!("history_capacity must be at least 1");
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `formdrill.toml` in the current directory
/// 2. `~/.config/formdrill/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<FormdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("formdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => FormdrillConfig::default(),
    };

    Ok(config)
}

/// Parse and validate config TOML.
pub fn parse_config_str(content: &str) -> Result<FormdrillConfig> {
    let config: FormdrillConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("formdrill"))
}
