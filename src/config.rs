//! Runtime configuration
//!
//! Settings are layered, later layers overriding earlier ones:
//! built-in defaults, `wlan-watcher.toml` (or an explicit file),
//! `WLAN_WATCHER_*` environment variables, then command-line flags.

use config::{Config, ConfigError, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::collectors::wlan::correlation::{CorrelationKey, HardwareAddressSource};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "wlan-watcher.toml";

/// Prefix for environment overrides, e.g. `WLAN_WATCHER_POLL_INTERVAL_MS`
pub const ENV_PREFIX: &str = "WLAN_WATCHER";

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Delay between scan cycles in the live view
    pub poll_interval_ms: u64,
    /// How available networks are paired with BSS entries
    pub correlation_key: CorrelationKey,
    /// Where the hardware address column comes from
    pub hardware_address_source: HardwareAddressSource,
    /// Program used by the Linux adapter source
    pub iw_command: String,
    /// Request a fresh radio scan instead of reading cached results
    pub trigger_scan: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            correlation_key: CorrelationKey::default(),
            hardware_address_source: HardwareAddressSource::default(),
            iw_command: "iw".to_string(),
            trigger_scan: false,
        }
    }
}

impl WatcherConfig {
    /// Loads the layered configuration
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_environment(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Like [`WatcherConfig::load`], reading overrides from `environment`
    /// instead of the process environment
    pub fn load_with_environment(
        path: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Self::load_from(file, environment)
    }

    fn load_from(
        file: File<config::FileSourceFile, config::FileFormat>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let config: WatcherConfig = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Message(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.iw_command.trim().is_empty() {
            return Err(ConfigError::Message("iw_command must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Effective settings as `key = value` lines
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("poll_interval_ms = {}", self.poll_interval_ms),
            format!("correlation_key = \"{}\"", self.correlation_key),
            format!("hardware_address_source = \"{}\"", self.hardware_address_source),
            format!("iw_command = \"{}\"", self.iw_command),
            format!("trigger_scan = {}", self.trigger_scan),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(config.correlation_key, CorrelationKey::FirstByte);
        assert_eq!(config.hardware_address_source, HardwareAddressSource::SsidBytes);
        assert!(!config.trigger_scan);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            "poll_interval_ms = 1000\ncorrelation_key = \"full-ssid\"\nhardware_address_source = \"bssid\"\n",
        );
        let config =
            WatcherConfig::load_from(File::from(file.path()).required(true), no_env()).unwrap();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.correlation_key, CorrelationKey::FullSsid);
        assert_eq!(config.hardware_address_source, HardwareAddressSource::Bssid);
        assert_eq!(config.iw_command, "iw");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("poll_interval_ms = 1000\n");
        let env = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(HashMap::from([
                ("WLAN_WATCHER_POLL_INTERVAL_MS".to_string(), "500".to_string()),
                ("WLAN_WATCHER_TRIGGER_SCAN".to_string(), "true".to_string()),
            ])));
        let config = WatcherConfig::load_from(File::from(file.path()).required(true), env).unwrap();
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.trigger_scan);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let file = write_config("poll_interval_ms = 0\n");
        let result = WatcherConfig::load_from(File::from(file.path()).required(true), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_correlation_key_is_rejected() {
        let file = write_config("correlation_key = \"bssid\"\n");
        let result = WatcherConfig::load_from(File::from(file.path()).required(true), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = WatcherConfig::load_with_environment(
            Some(Path::new("/nonexistent/wlan-watcher.toml")),
            no_env(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_describe() {
        let lines = WatcherConfig::default().describe();
        assert!(lines.contains(&"poll_interval_ms = 2500".to_string()));
        assert!(lines.contains(&"correlation_key = \"first-byte\"".to_string()));
    }
}
