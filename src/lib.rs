//! # wlan-watcher
//!
//! Periodically surveys nearby wireless access points on every WLAN adapter
//! of the host and normalizes the raw scan data into presentation-ready
//! records (SSID, channel, hardware address, PHY modes, signal).

pub mod collectors;
pub mod config;
pub mod models;
