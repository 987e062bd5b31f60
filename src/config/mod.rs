// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::matcher::IgnoreRules;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    Off,    // never record
    Always, // record all
    Ratio,  // ParentBased(TraceIDRatioBased)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "tracehook")]
    pub tracehook: SettingsBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub api: Option<Api>,
    pub traces: Option<Traces>,
    /// Route pattern -> whether the pattern is active.
    pub ignore: Option<HashMap<String, bool>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Traces {
    pub enabled: bool,
    #[serde(rename = "service_name")]
    pub service_name: Option<String>,
    #[serde(rename = "service_version")]
    pub service_version: Option<String>,
    pub exporter: Option<String>,
    pub endpoint: Option<String>,
    #[serde(rename = "sampling_mode")]
    pub sampling_mode: Option<SamplingMode>,
    #[serde(rename = "sampling_rate")]
    pub sampling_rate: Option<f64>,
    #[serde(rename = "export_batch_size")]
    pub export_batch_size: Option<usize>,
    #[serde(rename = "export_batch_timeout", default, with = "humantime_serde")]
    pub export_batch_timeout: Option<Duration>,
    #[serde(rename = "export_max_queue")]
    pub export_max_queue: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn is_dev(&self) -> bool;
    fn is_test(&self) -> bool;
    fn api(&self) -> Option<&Api>;
    fn traces(&self) -> Option<&Traces>;
    fn ignore_rules(&self) -> IgnoreRules;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.tracehook.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.tracehook.env == PROD
    }

    fn is_dev(&self) -> bool {
        self.tracehook.env == DEV
    }

    fn is_test(&self) -> bool {
        self.tracehook.env == TEST
    }

    fn api(&self) -> Option<&Api> {
        self.tracehook.api.as_ref()
    }

    fn traces(&self) -> Option<&Traces> {
        self.tracehook.traces.as_ref()
    }

    /// Falls back to the built-in patterns when the `ignore` section is absent.
    fn ignore_rules(&self) -> IgnoreRules {
        match self.tracehook.ignore.as_ref() {
            Some(map) => IgnoreRules::from_map(map),
            None => IgnoreRules::defaults(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Settings = serde_yaml::from_str(data).context("invalid yaml")?;

        if let Some(traces) = cfg.traces() {
            if let Some(rate) = traces.sampling_rate {
                if !(0.0..=1.0).contains(&rate) {
                    anyhow::bail!("traces.sampling_rate must be within [0, 1], got {}", rate);
                }
            }
        }

        Ok(cfg)
    }
}


// Test config is always available for integration tests
mod test_config;
pub use test_config::new_test_config;
