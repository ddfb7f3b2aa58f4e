use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::services::ResultLimits;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/flixlens.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3100,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub csv_path: String,

    /// Seed from `csv_path` at startup when the database holds no titles.
    pub seed_on_startup: bool,

    pub scatter_default_limit: u64,

    pub scatter_max_limit: u64,

    pub titles_default_limit: u64,

    pub titles_max_limit: u64,

    pub search_default_limit: u64,

    pub search_max_limit: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let limits = ResultLimits::default();
        Self {
            csv_path: "data/netflix_titles.csv".to_string(),
            seed_on_startup: true,
            scatter_default_limit: limits.scatter_default,
            scatter_max_limit: limits.scatter_max,
            titles_default_limit: limits.titles_default,
            titles_max_limit: limits.titles_max,
            search_default_limit: limits.search_default,
            search_max_limit: limits.search_max,
        }
    }
}

impl From<&CatalogConfig> for ResultLimits {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            scatter_default: config.scatter_default_limit,
            scatter_max: config.scatter_max_limit,
            titles_default: config.titles_default_limit,
            titles_max: config.titles_max_limit,
            search_default: config.search_default_limit,
            search_max: config.search_max_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("flixlens").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".flixlens").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.enabled && self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0 when the server is enabled");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        let catalog = &self.catalog;
        for (name, default, max) in [
            (
                "scatter",
                catalog.scatter_default_limit,
                catalog.scatter_max_limit,
            ),
            (
                "titles",
                catalog.titles_default_limit,
                catalog.titles_max_limit,
            ),
            (
                "search",
                catalog.search_default_limit,
                catalog.search_max_limit,
            ),
        ] {
            if default == 0 || max == 0 {
                anyhow::bail!("{name} limits must be greater than 0");
            }
            if default > max {
                anyhow::bail!("{name}_default_limit ({default}) exceeds {name}_max_limit ({max})");
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn result_limits(&self) -> ResultLimits {
        ResultLimits::from(&self.catalog)
    }
}
