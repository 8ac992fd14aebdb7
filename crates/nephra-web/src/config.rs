//! Service configuration: bind address, model artifact paths, blend
//! weights and inference timeout.
//!
//! Loaded from the YAML file named by `NEPHRA_CONFIG`, falling back to
//! `config/nephra.yaml` if present, falling back to built-in defaults.
//! Every field is individually optional in the file.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nephra_ensemble::EnsembleWeights;

/// Config file consulted when `NEPHRA_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/nephra.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub models: ModelConfig,

    /// Ensemble blend weights. Must stay a convex combination.
    #[serde(default)]
    pub weights: EnsembleWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Artifact path for the gradient-boosted member.
    #[serde(default = "default_lightgbm_path")]
    pub lightgbm: String,

    /// Artifact path for the categorical-boosting member.
    #[serde(default = "default_catboost_path")]
    pub catboost: String,

    /// Artifact path for the neural member.
    #[serde(default = "default_mlp_path")]
    pub mlp: String,

    /// Per-model inference timeout in milliseconds.
    #[serde(default = "default_inference_timeout_ms")]
    pub inference_timeout_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_lightgbm_path() -> String {
    "models/lightgbm.json".to_string()
}

fn default_catboost_path() -> String {
    "models/catboost.json".to_string()
}

fn default_mlp_path() -> String {
    "models/mlp.json".to_string()
}

fn default_inference_timeout_ms() -> u64 {
    2000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            lightgbm: default_lightgbm_path(),
            catboost: default_catboost_path(),
            mlp: default_mlp_path(),
            inference_timeout_ms: default_inference_timeout_ms(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            server: ServerConfig::default(),
            models: ModelConfig::default(),
            weights: EnsembleWeights::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from YAML file.
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from JSON file.
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the config source: env var, default file, built-ins.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("NEPHRA_CONFIG") {
            return Self::from_yaml(&path);
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::from_yaml(DEFAULT_CONFIG_PATH);
        }
        Ok(Self::default())
    }

    /// Check the config is runnable.
    pub fn validate(&self) -> bool {
        self.weights.validate() && self.models.inference_timeout_ms > 0 && self.server.port > 0
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: std::net::IpAddr = self.server.host.parse()?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn inference_timeout(&self) -> Duration {
        Duration::from_millis(self.models.inference_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ServiceConfig::default();
        assert!(config.validate());
        assert_eq!(config.server.port, 10000);
        assert_eq!(config.models.lightgbm, "models/lightgbm.json");
        assert_eq!(config.inference_timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "server:\n  port: 8080\nmodels:\n  mlp: custom/mlp.json\n";
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.models.mlp, "custom/mlp.json");
        assert_eq!(config.models.catboost, "models/catboost.json");
        assert!(config.weights.validate());
    }

    #[test]
    fn test_bad_weights_fail_validation() {
        let yaml = "weights:\n  lightgbm: 0.9\n  catboost: 0.9\n  mlp: 0.9\n";
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.validate());
    }

    #[test]
    fn test_bind_addr_parses_host() {
        let mut config = ServiceConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3001;
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3001");

        config.server.host = "not-an-ip".to_string();
        assert!(config.bind_addr().is_err());
    }
}
