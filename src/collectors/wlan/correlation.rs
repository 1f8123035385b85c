//! Correlation of available networks with raw BSS entries
//!
//! The available-network list does not carry signal strength or frequency,
//! so each network is paired with entries from the adapter's BSS list. Every
//! matching entry overwrites the working result, so the **last** match in
//! list order wins.

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::collectors::wlan::channel::khz_to_mhz;
use crate::models::{RawBssEntry, RawScanNetwork, RawSsid, UNKNOWN};

/// Comparison deciding whether a BSS entry belongs to a network
pub type SsidMatcher = fn(network: &RawSsid, bss: &RawSsid) -> bool;

/// Selectable correlation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationKey {
    /// Match when the first byte of both SSID buffers is equal
    #[default]
    FirstByte,
    /// Match when the declared SSID bytes are equal
    FullSsid,
}

impl CorrelationKey {
    pub fn matcher(self) -> SsidMatcher {
        match self {
            CorrelationKey::FirstByte => first_byte_matches,
            CorrelationKey::FullSsid => full_ssid_matches,
        }
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationKey::FirstByte => write!(f, "first-byte"),
            CorrelationKey::FullSsid => write!(f, "full-ssid"),
        }
    }
}

impl FromStr for CorrelationKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-byte" => Ok(CorrelationKey::FirstByte),
            "full-ssid" => Ok(CorrelationKey::FullSsid),
            other => Err(format!(
                "unknown correlation key '{other}' (expected first-byte or full-ssid)"
            )),
        }
    }
}

/// Where the hardware address column is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HardwareAddressSource {
    /// The network's own SSID buffer
    #[default]
    SsidBytes,
    /// The BSSID of the last matching BSS entry, when the source reports one
    Bssid,
}

impl fmt::Display for HardwareAddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareAddressSource::SsidBytes => write!(f, "ssid-bytes"),
            HardwareAddressSource::Bssid => write!(f, "bssid"),
        }
    }
}

impl FromStr for HardwareAddressSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ssid-bytes" => Ok(HardwareAddressSource::SsidBytes),
            "bssid" => Ok(HardwareAddressSource::Bssid),
            other => Err(format!(
                "unknown hardware address source '{other}' (expected ssid-bytes or bssid)"
            )),
        }
    }
}

pub fn first_byte_matches(network: &RawSsid, bss: &RawSsid) -> bool {
    network.first_byte() == bss.first_byte()
}

pub fn full_ssid_matches(network: &RawSsid, bss: &RawSsid) -> bool {
    match (network.declared_bytes(), bss.declared_bytes()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Per-BSS fields pulled onto a network record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlation {
    /// Whether any BSS entry matched
    pub matched: bool,
    /// Channel center frequency in MHz, `-1` when unmatched
    pub channel_frequency_mhz: i32,
    /// Signal strength in dBm, `-1` when unmatched
    pub signal_dbm: i32,
    /// Bytes the hardware address column is rendered from, empty when unmatched
    pub hardware_address_bytes: Vec<u8>,
}

impl Correlation {
    pub fn unmatched() -> Self {
        Self {
            matched: false,
            channel_frequency_mhz: UNKNOWN,
            signal_dbm: UNKNOWN,
            hardware_address_bytes: Vec::new(),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// Pairs available networks with BSS entries using an injected matcher
#[derive(Debug, Clone, Copy)]
pub struct BssCorrelator {
    matcher: SsidMatcher,
    address_source: HardwareAddressSource,
}

impl Default for BssCorrelator {
    fn default() -> Self {
        Self::new(CorrelationKey::default().matcher())
    }
}

impl BssCorrelator {
    pub fn new(matcher: SsidMatcher) -> Self {
        Self {
            matcher,
            address_source: HardwareAddressSource::default(),
        }
    }

    pub fn with_key(key: CorrelationKey) -> Self {
        Self::new(key.matcher())
    }

    pub fn with_address_source(mut self, address_source: HardwareAddressSource) -> Self {
        self.address_source = address_source;
        self
    }

    /// Correlates one network against the adapter's BSS entries
    ///
    /// Scans `bss_entries` in order; every match overwrites the result.
    /// Returns [`Correlation::unmatched`] when nothing matches.
    pub fn correlate(&self, network: &RawScanNetwork, bss_entries: &[RawBssEntry]) -> Correlation {
        let mut result = Correlation::unmatched();

        for entry in bss_entries {
            if !(self.matcher)(&network.ssid, &entry.ssid) {
                continue;
            }

            result.matched = true;
            result.channel_frequency_mhz = khz_to_mhz(entry.center_frequency_khz);
            result.signal_dbm = entry.rssi;
            result.hardware_address_bytes = match self.address_source {
                HardwareAddressSource::SsidBytes => network.ssid.bytes.clone(),
                HardwareAddressSource::Bssid => {
                    entry.bssid.map(|b| b.to_vec()).unwrap_or_default()
                }
            };

            trace!(
                "BSS match: freq={} MHz rssi={} dBm",
                result.channel_frequency_mhz, result.signal_dbm
            );
        }

        result
    }
}
