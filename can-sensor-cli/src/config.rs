//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusConfig {
    /// CAN interface to attach to
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Bus name token for dump lines (defaults to the interface name)
    #[serde(default)]
    pub label: Option<String>,
    /// Socket read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

fn default_interface() -> String {
    "can0".to_string()
}

fn default_read_timeout() -> u64 {
    500
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            label: None,
            read_timeout_ms: default_read_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsConfig {
    /// Seconds between sensor snapshot log lines (0 disables the reporter)
    #[serde(default = "default_stats_interval")]
    pub interval_secs: u64,
}

fn default_stats_interval() -> u64 {
    60
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_stats_interval(),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [bus]
            interface = "vcan0"
            label = "cabin"
            read_timeout_ms = 250

            [stats]
            interval_secs = 10
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.bus.interface, "vcan0");
        assert_eq!(config.bus.label.as_deref(), Some("cabin"));
        assert_eq!(config.bus.read_timeout_ms, 250);
        assert_eq!(config.stats.interval_secs, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bus.interface, "can0");
        assert_eq!(config.bus.label, None);
        assert_eq!(config.bus.read_timeout_ms, 500);
        assert_eq!(config.stats.interval_secs, 60);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[bus]\ninterface = \"can1\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.bus.interface, "can1");
        assert_eq!(config.stats.interval_secs, 60);
    }

    #[test]
    fn test_load_config_missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/listener.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
