//! Configuration file support.
//!
//! Settings are read from a `room-usage.toml` file when one exists, then
//! individual values can be overridden from the environment. Every section is
//! optional; a missing file yields the defaults.
//!
//! ```toml
//! [dashboard]
//! timezone = "Asia/Bangkok"
//! week_start = "sunday"
//!
//! [source]
//! type = "file"
//! path = "events.json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult, ErrorContext};
use crate::models::WeekStart;
use crate::source::SourceType;

/// Name of the configuration file searched for by [`DashboardConfig::load`].
pub const CONFIG_FILE_NAME: &str = "room-usage.toml";

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Settings that shape how events are bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// IANA zone used for windows, hours and rendered times
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub week_start: WeekStart,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            week_start: WeekStart::default(),
        }
    }
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

/// Where events come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,
    /// JSON file read by the `file` source
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            path: None,
        }
    }
}

fn default_source_type() -> String {
    "local".to_string()
}

impl SourceSettings {
    pub fn source_type(&self) -> DashboardResult<SourceType> {
        SourceType::from_str(&self.source_type)
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl DashboardConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> DashboardResult<Self> {
        toml::from_str(content).map_err(|e| {
            DashboardError::configuration_with_context(
                format!("Failed to parse config: {}", e),
                ErrorContext::new("parse_config"),
            )
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns a configuration error when the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new("load_config").with_target(path.display()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the first `room-usage.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> DashboardResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Default-location file (or defaults) with environment overrides applied.
    pub fn load() -> DashboardResult<Self> {
        let mut config = Self::from_default_location()?.unwrap_or_else(|| {
            log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
            Self::default()
        });
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// # Keys
    /// - `HOST`, `PORT`: server bind address
    /// - `EVENTS_FILE`: switches the source to `file` with this path
    /// - `DASHBOARD_TIMEZONE`: IANA zone name
    /// - `DASHBOARD_WEEK_START`: `sunday` or `monday`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> DashboardResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                DashboardError::configuration_with_context(
                    "PORT must be a valid port number",
                    ErrorContext::new("apply_overrides").with_target(&port),
                )
            })?;
        }
        if let Some(path) = lookup("EVENTS_FILE") {
            self.source.source_type = "file".to_string();
            self.source.path = Some(PathBuf::from(path));
        }
        if let Some(tz) = lookup("DASHBOARD_TIMEZONE") {
            self.dashboard.timezone = tz.parse::<Tz>().map_err(|e| {
                DashboardError::configuration_with_context(
                    format!("Unknown time zone: {}", e),
                    ErrorContext::new("apply_overrides").with_target(&tz),
                )
            })?;
        }
        if let Some(week_start) = lookup("DASHBOARD_WEEK_START") {
            self.dashboard.week_start = week_start.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.dashboard.timezone, chrono_tz::UTC);
        assert_eq!(config.dashboard.week_start, WeekStart::Sunday);
        assert_eq!(config.source.source_type().unwrap(), SourceType::Local);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_full_file() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [dashboard]
            timezone = "Asia/Bangkok"
            week_start = "monday"

            [source]
            type = "file"
            path = "events.json"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.timezone, chrono_tz::Asia::Bangkok);
        assert_eq!(config.dashboard.week_start, WeekStart::Monday);
        assert_eq!(config.source.source_type().unwrap(), SourceType::File);
        assert_eq!(config.source.path, Some(PathBuf::from("events.json")));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let err = DashboardConfig::from_toml_str("[dashboard]\ntimezone = \"Mars/Olympus\"\n")
            .unwrap_err();
        assert!(matches!(err, DashboardError::Configuration { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = \"127.0.0.1\"").unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_from_missing_file() {
        let err = DashboardConfig::from_file("/nonexistent/room-usage.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "3000"),
            ("EVENTS_FILE", "/data/events.json"),
            ("DASHBOARD_TIMEZONE", "Asia/Bangkok"),
            ("DASHBOARD_WEEK_START", "monday"),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.source.source_type().unwrap(), SourceType::File);
        assert_eq!(config.source.path, Some(PathBuf::from("/data/events.json")));
        assert_eq!(config.dashboard.timezone, chrono_tz::Asia::Bangkok);
        assert_eq!(config.dashboard.week_start, WeekStart::Monday);
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = DashboardConfig::default();
        let result = config.apply_overrides(|key| (key == "PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }
}
