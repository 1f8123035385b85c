use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{AdapterSource, SourceError};
use crate::models::{AdapterHandle, RawBssEntry, RawScanNetwork};

/// Raw scan data recorded for one adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterSnapshot {
    pub adapter: AdapterHandle,
    #[serde(default)]
    pub networks: Vec<RawScanNetwork>,
    #[serde(default)]
    pub bss_entries: Vec<RawBssEntry>,
}

/// Raw scan data recorded for every adapter on a host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    pub adapters: Vec<AdapterSnapshot>,
}

impl ScanSnapshot {
    /// Records the raw lists of every adapter `source` currently reports
    pub fn capture(source: &dyn AdapterSource) -> Result<Self, SourceError> {
        let mut adapters = Vec::new();

        for adapter in source.list_adapters()? {
            let networks = source.list_available_networks(&adapter)?;
            let bss_entries = source.list_bss_entries(&adapter)?;
            adapters.push(AdapterSnapshot {
                adapter,
                networks,
                bss_entries,
            });
        }

        Ok(Self { adapters })
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SourceError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved scan snapshot with {} adapters to {}", self.adapters.len(), path.display());
        Ok(())
    }

    fn find(&self, adapter: &AdapterHandle) -> Result<&AdapterSnapshot, SourceError> {
        self.adapters
            .iter()
            .find(|a| a.adapter == *adapter)
            .ok_or_else(|| SourceError::UnknownAdapter(adapter.label()))
    }
}

#[derive(Debug, Clone)]
enum SnapshotOrigin {
    File(PathBuf),
    Memory(ScanSnapshot),
}

/// Serves raw scan data from a recorded [`ScanSnapshot`]
///
/// File-backed sources re-read the file on every call, so edits show up on
/// the next scan cycle.
#[derive(Debug, Clone)]
pub struct SnapshotAdapterSource {
    origin: SnapshotOrigin,
}

impl SnapshotAdapterSource {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: SnapshotOrigin::File(path.into()),
        }
    }

    pub fn from_snapshot(snapshot: ScanSnapshot) -> Self {
        Self {
            origin: SnapshotOrigin::Memory(snapshot),
        }
    }

    fn with_snapshot<T>(
        &self,
        f: impl FnOnce(&ScanSnapshot) -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        match &self.origin {
            SnapshotOrigin::File(path) => {
                debug!("Reading scan snapshot from {}", path.display());
                f(&ScanSnapshot::load(path)?)
            }
            SnapshotOrigin::Memory(snapshot) => f(snapshot),
        }
    }
}

impl AdapterSource for SnapshotAdapterSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn list_adapters(&self) -> Result<Vec<AdapterHandle>, SourceError> {
        self.with_snapshot(|s| Ok(s.adapters.iter().map(|a| a.adapter.clone()).collect()))
    }

    fn list_available_networks(
        &self,
        adapter: &AdapterHandle,
    ) -> Result<Vec<RawScanNetwork>, SourceError> {
        self.with_snapshot(|s| Ok(s.find(adapter)?.networks.clone()))
    }

    fn list_bss_entries(&self, adapter: &AdapterHandle) -> Result<Vec<RawBssEntry>, SourceError> {
        self.with_snapshot(|s| Ok(s.find(adapter)?.bss_entries.clone()))
    }
}
