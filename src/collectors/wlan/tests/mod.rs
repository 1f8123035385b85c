//! Tests for WLAN scan collection
//!
//! `collector_tests` drives single cycles through an in-memory source;
//! `integration_tests` covers multi-adapter cycles and failure isolation.

pub mod integration_tests;

use std::collections::HashMap;

use crate::collectors::platform::{AdapterSource, SourceError};
use crate::models::{AdapterHandle, RawBssEntry, RawScanNetwork, RawSsid};

/// Scripted adapter source for collector tests
#[derive(Default)]
pub struct MockSource {
    pub adapters: Vec<AdapterHandle>,
    pub networks: HashMap<String, Vec<RawScanNetwork>>,
    pub bss_entries: HashMap<String, Vec<RawBssEntry>>,
    pub fail_enumeration: bool,
    pub failing_adapters: Vec<String>,
    /// Adapters whose network list succeeds but whose BSS list fails
    pub fail_bss_only: Vec<String>,
}

impl MockSource {
    pub fn with_adapter(mut self, name: &str, networks: Vec<RawScanNetwork>, bss: Vec<RawBssEntry>) -> Self {
        self.adapters.push(AdapterHandle::new(name, format!("{name}-id")));
        self.networks.insert(name.to_string(), networks);
        self.bss_entries.insert(name.to_string(), bss);
        self
    }

    pub fn with_failing_bss_list(mut self, name: &str, networks: Vec<RawScanNetwork>) -> Self {
        self = self.with_adapter(name, networks, Vec::new());
        self.fail_bss_only.push(name.to_string());
        self
    }

    pub fn with_failing_adapter(mut self, name: &str) -> Self {
        self.adapters.push(AdapterHandle::new(name, format!("{name}-id")));
        self.failing_adapters.push(name.to_string());
        self
    }
}

impl AdapterSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn list_adapters(&self) -> Result<Vec<AdapterHandle>, SourceError> {
        if self.fail_enumeration {
            return Err(SourceError::Unsupported("adapter service stopped".to_string()));
        }
        Ok(self.adapters.clone())
    }

    fn list_available_networks(&self, adapter: &AdapterHandle) -> Result<Vec<RawScanNetwork>, SourceError> {
        if self.failing_adapters.contains(&adapter.name) {
            return Err(SourceError::UnknownAdapter(adapter.name.clone()));
        }
        Ok(self.networks.get(&adapter.name).cloned().unwrap_or_default())
    }

    fn list_bss_entries(&self, adapter: &AdapterHandle) -> Result<Vec<RawBssEntry>, SourceError> {
        if self.failing_adapters.contains(&adapter.name) || self.fail_bss_only.contains(&adapter.name) {
            return Err(SourceError::UnknownAdapter(adapter.name.clone()));
        }
        Ok(self.bss_entries.get(&adapter.name).cloned().unwrap_or_default())
    }
}

pub fn network(ssid: &[u8], phy_types: Vec<u32>, signal_quality: u32) -> RawScanNetwork {
    RawScanNetwork {
        ssid: RawSsid::padded(ssid),
        phy_types,
        signal_quality,
        security_enabled: true,
    }
}

pub fn bss(ssid: &[u8], center_frequency_khz: u32, rssi: i32) -> RawBssEntry {
    RawBssEntry {
        ssid: RawSsid::padded(ssid),
        center_frequency_khz,
        rssi,
        bssid: None,
    }
}
