use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::gateway::LlmConfig;
use crate::model::policy::{PolicyPreset, ShapingPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config failed: {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse toml failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid [policy] table: {0}")]
    Policy(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// `preset` plus per-field overrides of `ShapingPolicy`.
    policy: toml::Table,
}

impl ServiceConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let cfg: ServiceConfig = toml::from_str(text)?;
        // surface bad policy tables at load time
        cfg.shaping_policy(None)?;
        Ok(cfg)
    }

    pub fn preset(&self) -> Result<PolicyPreset, ConfigError> {
        match self.policy.get("preset") {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::Policy(e.to_string())),
            None => Ok(PolicyPreset::default()),
        }
    }

    /// Resolves the preset (CLI choice wins over the file) and applies the
    /// remaining `[policy]` keys on top of it.
    pub fn shaping_policy(
        &self,
        preset_override: Option<PolicyPreset>,
    ) -> Result<ShapingPolicy, ConfigError> {
        let preset = match preset_override {
            Some(p) => p,
            None => self.preset()?,
        };
        let base = ShapingPolicy::from_preset(preset);
        let mut table = match toml::Value::try_from(&base) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => return Err(ConfigError::Policy("policy is not a table".to_string())),
            Err(e) => return Err(ConfigError::Policy(e.to_string())),
        };

        for (key, value) in &self.policy {
            if key == "preset" {
                continue;
            }
            if !table.contains_key(key) {
                return Err(ConfigError::Policy(format!("unknown key: {key}")));
            }
            table.insert(key.clone(), value.clone());
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Policy(e.to_string()))
    }
}

/// Listen address: explicit flag, then `PORT`, then the config file.
pub fn resolve_bind(flag: Option<&str>, port_env: Option<&str>, cfg: &ServerConfig) -> String {
    if let Some(bind) = flag {
        return bind.to_string();
    }
    if let Some(port) = port_env.and_then(|p| p.trim().parse::<u16>().ok()) {
        return format!("0.0.0.0:{port}");
    }
    cfg.bind.clone()
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
