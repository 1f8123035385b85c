pub mod scan;

pub use scan::{
    AdapterHandle, AdapterScanResult, NormalizedAccessPointRecord, RawBssEntry, RawScanNetwork,
    RawSsid, SSID_MAX_LENGTH, UNKNOWN, UNKNOWN_TEXT,
};
