use thiserror::Error;

use crate::config::WatcherConfig;
use crate::models::{AdapterHandle, RawBssEntry, RawScanNetwork};

// Adapter sources feeding raw scan data into the collector
// Each call acquires what it needs and releases it before returning,
// so nothing is held between scan cycles

/// `iw`-based source for Linux nl80211 drivers
/// Parses `iw dev` and `iw dev <if> scan dump` output
pub mod iw;

/// Replays recorded scan snapshots from JSON
pub mod snapshot;

pub use iw::IwAdapterSource;
pub use snapshot::{AdapterSnapshot, ScanSnapshot, SnapshotAdapterSource};

/// Errors raised by adapter sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("`{program}` exited with status {status:?}: {stderr}")]
    CommandFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse {context}: {message}")]
    Parse { context: String, message: String },

    #[error("invalid scan snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("unknown adapter {0}")]
    UnknownAdapter(String),

    #[error("unsupported platform: {0}")]
    Unsupported(String),
}

/// Supplies adapters and their raw scan lists
pub trait AdapterSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn list_adapters(&self) -> Result<Vec<AdapterHandle>, SourceError>;

    fn list_available_networks(
        &self,
        adapter: &AdapterHandle,
    ) -> Result<Vec<RawScanNetwork>, SourceError>;

    fn list_bss_entries(&self, adapter: &AdapterHandle) -> Result<Vec<RawBssEntry>, SourceError>;
}

/// Returns the adapter source for the current platform
pub fn create_adapter_source(config: &WatcherConfig) -> Result<Box<dyn AdapterSource>, SourceError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(IwAdapterSource::new(
            config.iw_command.clone(),
            config.trigger_scan,
        )))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = config;
        Err(SourceError::Unsupported(format!(
            "no native adapter source for {}; use --replay with a scan snapshot",
            std::env::consts::OS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message() {
        let err = SourceError::CommandFailed {
            program: "iw dev".to_string(),
            status: Some(237),
            stderr: "nl80211 not found.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`iw dev` exited with status Some(237): nl80211 not found."
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_iw_source() {
        let source = create_adapter_source(&WatcherConfig::default()).unwrap();
        assert_eq!(source.name(), "iw");
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_other_platforms_are_unsupported() {
        let result = create_adapter_source(&WatcherConfig::default());
        assert!(matches!(result, Err(SourceError::Unsupported(_))));
    }
}
