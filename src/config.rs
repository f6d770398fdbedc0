use crate::api::ApiConfig;
use crate::ev::Policy;
use crate::report::ReportMode;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub api: ApiConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct General {
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub mode: ReportMode,
    pub policy: Policy,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file {}", path))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load from an explicit path, or from `config.toml` if it exists.
    /// Without either, every setting takes its default.
    pub fn resolve(explicit: Option<&str>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Apply `NJLOTTERY_MODE`, `NJLOTTERY_POLICY` and `NJLOTTERY_LOG` on top of the file.
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("NJLOTTERY_MODE") {
            self.report.mode = mode.parse().context("NJLOTTERY_MODE")?;
        }
        if let Some(policy) = lookup("NJLOTTERY_POLICY") {
            self.report.policy = policy.parse().context("NJLOTTERY_POLICY")?;
        }
        if let Some(level) = lookup("NJLOTTERY_LOG") {
            self.general.log_level = level;
        }
        Ok(())
    }
}
