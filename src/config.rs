//! Runtime configuration.
//!
//! Defaults live here as constants; a `.env` file and the environment
//! override them.

use chrono_tz::Tz;
use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";
/// Largest equal split the binary will print.
pub const DEFAULT_MAX_SUBNETS: u64 = 4096;
pub const DEFAULT_TIMEZONE: Tz = Tz::UTC;

const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";
const ENV_OUTPUT: &str = "SUBNET_CALC_OUTPUT";
const ENV_EXPORT_DIR: &str = "SUBNET_CALC_EXPORT_DIR";
const ENV_TIMEZONE: &str = "SUBNET_CALC_TIMEZONE";
const ENV_MAX_SUBNETS: &str = "SUBNET_CALC_MAX_SUBNETS";

/// How results are written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}' (table|csv|json)").into()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// log4rs YAML file.
    pub log_config: PathBuf,
    pub output: OutputFormat,
    /// When set, CSV exports are also written to this directory.
    pub export_dir: Option<PathBuf>,
    /// Time zone for export file timestamps.
    pub timezone: Tz,
    pub max_subnets: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
            output: OutputFormat::default(),
            export_dir: None,
            timezone: DEFAULT_TIMEZONE,
            max_subnets: DEFAULT_MAX_SUBNETS,
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            config.log_config = PathBuf::from(path);
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            config.output = output.parse()?;
        }
        config.export_dir = lookup(ENV_EXPORT_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        if let Some(tz) = lookup(ENV_TIMEZONE) {
            config.timezone = tz
                .trim()
                .parse()
                .map_err(|e| format!("Invalid {ENV_TIMEZONE} '{tz}': {e}"))?;
        }
        if let Some(max) = lookup(ENV_MAX_SUBNETS) {
            config.max_subnets = max
                .trim()
                .parse()
                .map_err(|e| format!("Invalid {ENV_MAX_SUBNETS} '{max}': {e}"))?;
        }
        log::debug!("config={config:?}");
        Ok(config)
    }
}
