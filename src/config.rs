//! Runtime configuration from the environment.
//!
//! `.env` is loaded by the binary through `dotenv` before [`AppConfig::from_env`]
//! runs, so the same variables can live in either place.

use crate::cost::RateTable;
use crate::error::CostError;
use crate::telemetry::{EventSink, JsonlSink, LogSink};
use std::path::PathBuf;

pub const ENV_RATES: &str = "SUBNET_ADVISOR_RATES";
pub const ENV_EVENT_LOG: &str = "SUBNET_ADVISOR_EVENT_LOG";
pub const ENV_LOG_CONFIG: &str = "SUBNET_ADVISOR_LOG_CONFIG";
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON rate table; the built-in table is used when unset.
    pub rates_path: Option<PathBuf>,
    /// JSON-lines event log; events go to the log when unset. A directory
    /// gets one `calc_events_<date>.jsonl` file per UTC day.
    pub event_log: Option<PathBuf>,
    /// log4rs YAML file.
    pub log_config: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            rates_path: None,
            event_log: None,
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        AppConfig {
            rates_path: get(ENV_RATES).map(PathBuf::from),
            event_log: get(ENV_EVENT_LOG).map(PathBuf::from),
            log_config: get(ENV_LOG_CONFIG)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_CONFIG)),
        }
    }

    pub fn load_rate_table(&self) -> Result<RateTable, CostError> {
        match &self.rates_path {
            Some(path) => RateTable::load(path),
            None => {
                log::debug!("Using built-in rate table");
                Ok(RateTable::default())
            }
        }
    }

    pub fn event_sink(&self) -> Box<dyn EventSink> {
        match &self.event_log {
            Some(path) if path.is_dir() => Box::new(JsonlSink::daily(path)),
            Some(path) => Box::new(JsonlSink::new(path.clone())),
            None => Box::new(LogSink),
        }
    }
}
