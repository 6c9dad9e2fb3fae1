use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Year used as the century-correction threshold when no config file and no
/// CLI override are present. Kept as a constant (never wall clock) so that
/// re-running the pipeline on the same input is reproducible.
pub const DEFAULT_CURRENT_YEAR: i32 = 2025;

const DEFAULT_BASE_URL: &str = "https://www.alltime-athletics.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_DELAY_MS: u64 = 500;
const DEFAULT_EXPORT_PATH: &str = "data.csv";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Processing year injected into the century correction step. Two-digit
    /// birth years that resolve to this year or later are shifted back 100
    /// years.
    #[serde(default = "default_current_year")]
    pub current_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Minimum spacing between request starts, shared across every
    /// concurrent event task.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub path: String,
}

fn default_current_year() -> i32 {
    DEFAULT_CURRENT_YEAR
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_PATH.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            current_year: default_current_year(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the given path, falling back to the documented
    /// defaults when the file does not exist. A present-but-malformed file is
    /// an error rather than a silent fallback.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file '{}' not found, using defaults", path.display());
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
