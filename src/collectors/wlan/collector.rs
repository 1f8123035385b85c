//! Scan cycle orchestration
//!
//! A scan cycle asks the adapter source for every adapter, fetches each
//! adapter's two raw lists, and turns every available network into one
//! [`NormalizedAccessPointRecord`]. Nothing is kept between cycles.

use log::{debug, trace};

use crate::collectors::platform::AdapterSource;
use crate::collectors::wlan::channel::frequency_to_channel;
use crate::collectors::wlan::correlation::BssCorrelator;
use crate::collectors::wlan::errors::{DecodeError, ScanError, log_recovered_error};
use crate::collectors::wlan::hardware_address::format_hardware_address;
use crate::collectors::wlan::phy::summarize_phy_types;
use crate::collectors::wlan::ssid::decode_raw_ssid;
use crate::config::WatcherConfig;
use crate::models::{
    AdapterHandle, AdapterScanResult, NormalizedAccessPointRecord, RawBssEntry, RawScanNetwork,
};

/// Outcome of one scan cycle
#[derive(Debug)]
pub struct ScanCycle {
    /// One result per adapter that could be queried, in enumeration order
    pub results: Vec<AdapterScanResult>,
    /// Recovered problems: omitted adapters and skipped records
    pub issues: Vec<ScanError>,
}

impl ScanCycle {
    pub fn total_records(&self) -> usize {
        self.results.iter().map(|r| r.total_count).sum()
    }
}

/// Runs scan cycles against an adapter source
///
/// Cycles are synchronous and must not overlap; callers polling on an
/// interval should wait for one cycle to return before starting the next.
pub struct WlanCollector {
    source: Box<dyn AdapterSource>,
    correlator: BssCorrelator,
    cycle_count: u64,
}

impl WlanCollector {
    /// Creates a collector using the default first-byte correlation key
    pub fn new(source: Box<dyn AdapterSource>) -> Self {
        Self::with_correlator(source, BssCorrelator::default())
    }

    pub fn with_correlator(source: Box<dyn AdapterSource>, correlator: BssCorrelator) -> Self {
        Self {
            source,
            correlator,
            cycle_count: 0,
        }
    }

    /// Creates a collector with the correlation settings from `config`
    pub fn from_config(source: Box<dyn AdapterSource>, config: &WatcherConfig) -> Self {
        let correlator = BssCorrelator::with_key(config.correlation_key)
            .with_address_source(config.hardware_address_source);
        Self::with_correlator(source, correlator)
    }

    pub fn source(&self) -> &dyn AdapterSource {
        self.source.as_ref()
    }

    /// Number of cycles started by this collector
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Lists the adapters currently reported by the source
    pub fn list_adapters(&self) -> Result<Vec<AdapterHandle>, ScanError> {
        self.source
            .list_adapters()
            .map_err(|source| ScanError::AdapterEnumeration { source })
    }

    /// Runs one scan cycle and returns the per-adapter results
    ///
    /// Only adapter enumeration failures are returned as errors. Adapters
    /// whose lists cannot be fetched are omitted and malformed records are
    /// skipped; both are logged.
    pub fn run_scan_cycle(&mut self) -> Result<Vec<AdapterScanResult>, ScanError> {
        Ok(self.collect_cycle()?.results)
    }

    /// Runs one scan cycle and keeps the recovered issues alongside the results
    pub fn collect_cycle(&mut self) -> Result<ScanCycle, ScanError> {
        self.cycle_count += 1;
        let adapters = self.list_adapters()?;
        debug!(
            "Scan cycle #{}: {} adapters from {} source",
            self.cycle_count,
            adapters.len(),
            self.source.name()
        );

        let mut results = Vec::with_capacity(adapters.len());
        let mut issues = Vec::new();

        for adapter in &adapters {
            match self.scan_adapter(adapter, &mut issues) {
                Ok(result) => results.push(result),
                Err(error) => {
                    log_recovered_error(&error);
                    issues.push(error);
                }
            }
        }

        let cycle = ScanCycle { results, issues };
        debug!(
            "Scan cycle #{} finished: {} records, {} issues",
            self.cycle_count,
            cycle.total_records(),
            cycle.issues.len()
        );
        Ok(cycle)
    }

    fn scan_adapter(
        &self,
        adapter: &AdapterHandle,
        issues: &mut Vec<ScanError>,
    ) -> Result<AdapterScanResult, ScanError> {
        let label = adapter.label();
        let query_error = |source| ScanError::ScanQuery {
            adapter: label.clone(),
            source,
        };

        let networks = self
            .source
            .list_available_networks(adapter)
            .map_err(query_error)?;
        let bss_entries = self.source.list_bss_entries(adapter).map_err(query_error)?;
        trace!(
            "{label}: {} networks, {} BSS entries",
            networks.len(),
            bss_entries.len()
        );

        let mut records = Vec::with_capacity(networks.len());
        for network in &networks {
            match self.normalize(network, &bss_entries) {
                Ok(record) => records.push(record),
                Err(source) => {
                    let error = ScanError::Decode {
                        adapter: label.clone(),
                        source,
                    };
                    log_recovered_error(&error);
                    issues.push(error);
                }
            }
        }

        Ok(AdapterScanResult::new(label, records))
    }

    /// Builds the normalized record for one network
    pub fn normalize(
        &self,
        network: &RawScanNetwork,
        bss_entries: &[RawBssEntry],
    ) -> Result<NormalizedAccessPointRecord, DecodeError> {
        let correlation = self.correlator.correlate(network, bss_entries);
        let ssid = decode_raw_ssid(&network.ssid)?;

        Ok(NormalizedAccessPointRecord {
            ssid,
            channel: frequency_to_channel(correlation.channel_frequency_mhz),
            channel_frequency_mhz: correlation.channel_frequency_mhz,
            hardware_address: format_hardware_address(&correlation.hardware_address_bytes),
            phy_capability: summarize_phy_types(&network.phy_types),
            signal_dbm: correlation.signal_dbm,
            signal_quality: network.signal_quality,
        })
    }
}
