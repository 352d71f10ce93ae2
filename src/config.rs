use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const ENV_DATABASE_URL: &str = "JORMUNGAND_DATABASE_URL";
pub const ENV_LOG_LEVEL: &str = "JORMUNGAND_LOG_LEVEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,

    pub ourairports: OurAirportsConfig,

    pub search: SearchConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// `pretty` for terminals, `json` for log shippers
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    /// Maximum database connections (default: 5)
    pub max_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_connections: u32,

    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/jormungand.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OurAirportsConfig {
    pub countries_csv: PathBuf,

    pub airports_csv: PathBuf,

    /// Values of the `type` column kept on import
    pub accepted_airport_types: Vec<String>,
}

impl Default for OurAirportsConfig {
    fn default() -> Self {
        Self {
            countries_csv: PathBuf::from("data/ourairports/countries.csv"),
            airports_csv: PathBuf::from("data/ourairports/airports.csv"),
            accepted_airport_types: vec!["large_airport".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: u64,

    pub max_limit: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl SearchConfig {
    /// Falls back to the default limit and caps at the maximum.
    #[must_use]
    pub fn effective_limit(&self, requested: Option<u64>) -> u64 {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

impl Config {
    /// Loads `.env`, the first config file found, then environment overrides.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from: {}", path.display());
        }

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
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

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.general.log_level = level;
        }
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
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("jormungand").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".jormungand").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.database.max_connections == 0 || self.database.min_connections == 0 {
            anyhow::bail!("Database connection limits must be > 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!(
                "Minimum connections ({}) exceed maximum connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.ourairports.accepted_airport_types.is_empty() {
            anyhow::bail!("At least one accepted airport type is required");
        }

        if self.search.default_limit == 0 || self.search.max_limit == 0 {
            anyhow::bail!("Search limits must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.url, "sqlite:data/jormungand.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.general.log_format, LogFormat::Pretty);
        assert_eq!(
            config.ourairports.accepted_airport_types,
            vec!["large_airport".to_string()]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[ourairports]"));
        assert!(toml_str.contains("[search]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"
            log_format = "json"

            [ourairports]
            accepted_airport_types = ["large_airport", "medium_airport"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.log_format, LogFormat::Json);
        assert_eq!(config.ourairports.accepted_airport_types.len(), 2);

        assert_eq!(config.search.default_limit, 10);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_DATABASE_URL => Some("sqlite::memory:".to_string()),
            ENV_LOG_LEVEL => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_inverted_pool_limits() {
        let mut config = Config::default();
        config.database.min_connections = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_airport_types() {
        let mut config = Config::default();
        config.ourairports.accepted_airport_types.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_search_limit() {
        let search = SearchConfig::default();
        assert_eq!(search.effective_limit(None), 10);
        assert_eq!(search.effective_limit(Some(3)), 3);
        assert_eq!(search.effective_limit(Some(1_000)), 100);
    }
}
