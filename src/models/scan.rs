use serde::{Deserialize, Serialize};

/// Maximum SSID length allowed by 802.11
pub const SSID_MAX_LENGTH: usize = 32;

/// Sentinel used for unknown integer fields (channel, frequency, signal)
pub const UNKNOWN: i32 = -1;

/// Sentinel used for unknown text fields (hardware address, PHY capability)
pub const UNKNOWN_TEXT: &str = "?";

/// Raw SSID as reported by the adapter: a byte buffer plus a declared length.
///
/// The buffer is not necessarily null-terminated, valid UTF-8, or exactly
/// `length` bytes long; native sources hand out a fixed 32-byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSsid {
    pub length: u32,
    pub bytes: Vec<u8>,
}

impl RawSsid {
    pub fn new(length: u32, bytes: Vec<u8>) -> Self {
        Self { length, bytes }
    }

    /// Builds the zero-padded 32-byte buffer native WLAN APIs return
    pub fn padded(ssid: &[u8]) -> Self {
        let mut bytes = vec![0u8; SSID_MAX_LENGTH.max(ssid.len())];
        bytes[..ssid.len()].copy_from_slice(ssid);
        Self {
            length: ssid.len() as u32,
            bytes,
        }
    }

    /// First byte of the buffer; an empty buffer reads as zero like a cleared native buffer
    pub fn first_byte(&self) -> u8 {
        self.bytes.first().copied().unwrap_or(0)
    }

    /// The bytes inside the declared length, if the buffer is long enough
    pub fn declared_bytes(&self) -> Option<&[u8]> {
        self.bytes.get(..self.length as usize)
    }
}

/// One entry of an adapter's "available networks" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScanNetwork {
    pub ssid: RawSsid,
    /// Native PHY type codes (4 = OFDM, 6 = ERP, 7 = HT, ...)
    pub phy_types: Vec<u32>,
    /// Signal quality percentage, 0-100
    pub signal_quality: u32,
    pub security_enabled: bool,
}

/// One raw BSS observation from the adapter's BSS list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBssEntry {
    pub ssid: RawSsid,
    /// Channel center frequency in kHz
    pub center_frequency_khz: u32,
    /// Received signal strength in dBm
    pub rssi: i32,
    /// Hardware address of the access point, when the source knows it
    #[serde(default)]
    pub bssid: Option<[u8; 6]>,
}

/// Identifies one wireless adapter for the duration of a scan cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdapterHandle {
    /// Interface name (e.g., "wlan0", "Wi-Fi")
    pub name: String,
    /// Stable adapter identifier (GUID, MAC address, ifindex)
    pub id: String,
}

impl AdapterHandle {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Display label, e.g. `wlan0 (aa:bb:cc:dd:ee:ff)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Normalized, presentation-ready view of one access point.
///
/// Unknown values are carried as sentinels: `-1` for integers, `"?"` for text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAccessPointRecord {
    pub ssid: String,
    pub channel: i32,
    pub channel_frequency_mhz: i32,
    pub hardware_address: String,
    pub phy_capability: String,
    pub signal_dbm: i32,
    pub signal_quality: u32,
}

impl NormalizedAccessPointRecord {
    pub fn has_channel(&self) -> bool {
        self.channel != UNKNOWN
    }

    pub fn has_signal(&self) -> bool {
        self.signal_dbm != UNKNOWN
    }
}

/// Result of scanning one adapter during one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterScanResult {
    pub adapter_label: String,
    pub records: Vec<NormalizedAccessPointRecord>,
    pub total_count: usize,
}

impl AdapterScanResult {
    pub fn new(adapter_label: String, records: Vec<NormalizedAccessPointRecord>) -> Self {
        let total_count = records.len();
        Self {
            adapter_label,
            records,
            total_count,
        }
    }
}
