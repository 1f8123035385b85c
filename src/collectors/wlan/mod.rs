//! WLAN scan collection
//!
//! Turns raw adapter scan data into normalized access point records.
//!
//! ## Module Organization
//!
//! - `collector`: WlanCollector and the scan cycle
//! - `channel`: frequency to channel mapping (2.4 GHz only)
//! - `ssid`: SSID byte buffer decoding
//! - `hardware_address`: hardware address text formatting
//! - `phy`: PHY type code summary (`802.11gn`, ...)
//! - `correlation`: pairing available networks with BSS entries
//! - `errors`: scan error taxonomy
//! - `formatting`: column and status line rendering
//!
//! ## Usage
//!
//! ```no_run
//! use wlan_watcher::collectors::platform::create_adapter_source;
//! use wlan_watcher::collectors::wlan::WlanCollector;
//! use wlan_watcher::config::WatcherConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = WatcherConfig::default();
//! let mut collector = WlanCollector::from_config(create_adapter_source(&config)?, &config);
//! for adapter in collector.run_scan_cycle()? {
//!     println!("{}: {} networks", adapter.adapter_label, adapter.total_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod collector;
pub mod correlation;
pub mod errors;
pub mod formatting;
pub mod hardware_address;
pub mod phy;
pub mod ssid;

pub use collector::{ScanCycle, WlanCollector};
pub use correlation::{BssCorrelator, CorrelationKey, HardwareAddressSource};
pub use errors::{DecodeError, ScanError};

#[cfg(test)]
pub mod tests;
