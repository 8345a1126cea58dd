use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::args::ServeArgs;

/// Configuration for the player service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name reported by the health endpoint
    #[serde(default = "default_name")]
    pub name: String,

    /// Address to bind
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON array of players loaded into the store at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsSettings,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allow any origin, method and header
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            bind: default_bind(),
            port: default_port(),
            seed_file: None,
            cors: CorsSettings::default(),
        }
    }
}

fn default_name() -> String {
    "player-registry".to_string()
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_enabled() -> bool {
    true
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: ServiceConfig =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .context(format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values
    pub fn with_overrides(mut self, args: &ServeArgs) -> Self {
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(bind) = &args.bind {
            self.bind = bind.clone();
        }
        if let Some(seed) = &args.seed {
            self.seed_file = Some(seed.clone());
        }
        self
    }

    /// Generate a sample configuration
    pub fn sample() -> Self {
        Self {
            seed_file: Some(PathBuf::from("./players.json")),
            ..Default::default()
        }
    }
}
