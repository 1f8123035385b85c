use log::{debug, trace, warn};
use std::collections::BTreeSet;
use std::process::Command;

use super::{AdapterSource, SourceError};
use crate::collectors::wlan::phy::{PHY_DSSS, PHY_ERP, PHY_HE, PHY_HRDSSS, PHY_HT, PHY_OFDM, PHY_VHT};
use crate::models::{AdapterHandle, RawBssEntry, RawScanNetwork, RawSsid};

/// Legacy DSSS rates in Mbit/s; every other rate is OFDM
const DSSS_RATES: [f32; 2] = [1.0, 2.0];
const CCK_RATES: [f32; 2] = [5.5, 11.0];

/// Reads adapters and scan results through the `iw` utility
#[derive(Debug, Clone)]
pub struct IwAdapterSource {
    iw_command: String,
    trigger_scan: bool,
}

impl IwAdapterSource {
    pub fn new(iw_command: String, trigger_scan: bool) -> Self {
        Self {
            iw_command,
            trigger_scan,
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, SourceError> {
        debug!("Running {} {}", self.iw_command, args.join(" "));

        let output = Command::new(&self.iw_command).args(args).output()?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                program: format!("{} {}", self.iw_command, args.join(" ")),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn scan(&self, adapter: &AdapterHandle, trigger: bool) -> Result<Vec<IwBss>, SourceError> {
        let output = if trigger {
            self.run(&["dev", &adapter.name, "scan"])?
        } else {
            self.run(&["dev", &adapter.name, "scan", "dump"])?
        };
        parse_scan_dump(&output)
    }
}

impl AdapterSource for IwAdapterSource {
    fn name(&self) -> &str {
        "iw"
    }

    fn list_adapters(&self) -> Result<Vec<AdapterHandle>, SourceError> {
        let output = self.run(&["dev"])?;
        Ok(parse_interfaces(&output))
    }

    fn list_available_networks(
        &self,
        adapter: &AdapterHandle,
    ) -> Result<Vec<RawScanNetwork>, SourceError> {
        // A triggered scan refreshes the cache the BSS dump reads from
        let bss = self.scan(adapter, self.trigger_scan)?;
        Ok(group_available_networks(&bss))
    }

    fn list_bss_entries(&self, adapter: &AdapterHandle) -> Result<Vec<RawBssEntry>, SourceError> {
        let bss = self.scan(adapter, false)?;
        Ok(bss.iter().map(IwBss::to_bss_entry).collect())
    }
}

/// One BSS block of `iw ... scan dump` output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IwBss {
    pub bssid: Option<[u8; 6]>,
    pub ssid: Vec<u8>,
    pub frequency_khz: u32,
    pub signal_dbm: i32,
    pub rates: Vec<f32>,
    pub ht: bool,
    pub vht: bool,
    pub he: bool,
    pub privacy: bool,
    pub rsn_or_wpa: bool,
}

impl IwBss {
    /// Native PHY type codes this BSS advertises
    pub fn phy_types(&self) -> Vec<u32> {
        let mut codes = Vec::new();
        let mhz = self.frequency_khz / 1000;

        if mhz >= 4900 {
            codes.push(PHY_OFDM);
        } else if mhz > 0 {
            let has_ofdm = self
                .rates
                .iter()
                .any(|r| !DSSS_RATES.contains(r) && !CCK_RATES.contains(r));
            let has_cck = self.rates.iter().any(|r| CCK_RATES.contains(r));

            if has_ofdm {
                codes.push(PHY_ERP);
            } else if has_cck {
                codes.push(PHY_HRDSSS);
            } else if !self.rates.is_empty() {
                codes.push(PHY_DSSS);
            }
        }

        if self.ht {
            codes.push(PHY_HT);
        }
        if self.vht {
            codes.push(PHY_VHT);
        }
        if self.he {
            codes.push(PHY_HE);
        }

        codes
    }

    pub fn security_enabled(&self) -> bool {
        self.privacy || self.rsn_or_wpa
    }

    pub fn to_bss_entry(&self) -> RawBssEntry {
        RawBssEntry {
            ssid: RawSsid::padded(&self.ssid),
            center_frequency_khz: self.frequency_khz,
            rssi: self.signal_dbm,
            bssid: self.bssid,
        }
    }
}

/// Maps dBm to a 0-100 quality percentage (-100 dBm = 0, -50 dBm = 100)
pub fn signal_quality(signal_dbm: i32) -> u32 {
    signal_dbm.saturating_add(100).saturating_mul(2).clamp(0, 100) as u32
}

/// Parses `iw dev` output into adapter handles
pub fn parse_interfaces(output: &str) -> Vec<AdapterHandle> {
    struct Pending {
        name: String,
        addr: Option<String>,
        ifindex: Option<String>,
        wdev: Option<String>,
    }

    fn finish(pending: Pending) -> AdapterHandle {
        let id = pending
            .addr
            .or_else(|| pending.ifindex.map(|i| format!("ifindex {i}")))
            .or_else(|| pending.wdev.map(|w| format!("wdev {w}")))
            .unwrap_or_else(|| pending.name.clone());
        AdapterHandle::new(pending.name, id)
    }

    let mut adapters = Vec::new();
    let mut current: Option<Pending> = None;

    for line in output.lines() {
        let line = line.trim();

        if let Some(name) = line.strip_prefix("Interface ") {
            if let Some(pending) = current.take() {
                adapters.push(finish(pending));
            }
            current = Some(Pending {
                name: name.trim().to_string(),
                addr: None,
                ifindex: None,
                wdev: None,
            });
            continue;
        }

        // A new radio or a non-netdev interface (P2P device) ends the stanza
        if line.starts_with("phy#") || line.starts_with("Unnamed/") {
            if let Some(pending) = current.take() {
                adapters.push(finish(pending));
            }
            continue;
        }

        let Some(pending) = current.as_mut() else {
            continue;
        };

        if let Some(addr) = line.strip_prefix("addr ") {
            pending.addr = Some(addr.trim().to_string());
        } else if let Some(ifindex) = line.strip_prefix("ifindex ") {
            pending.ifindex = Some(ifindex.trim().to_string());
        } else if let Some(wdev) = line.strip_prefix("wdev ") {
            pending.wdev = Some(wdev.trim().to_string());
        }
    }

    if let Some(pending) = current {
        adapters.push(finish(pending));
    }

    trace!("Parsed {} interfaces from iw dev", adapters.len());
    adapters
}

/// Parses `iw dev <if> scan dump` output into BSS blocks
pub fn parse_scan_dump(output: &str) -> Result<Vec<IwBss>, SourceError> {
    let mut entries = Vec::new();
    let mut current: Option<IwBss> = None;

    for raw_line in output.lines() {
        if let Some(header) = raw_line.strip_prefix("BSS ") {
            if let Some(bss) = current.take() {
                entries.push(bss);
            }
            current = Some(IwBss {
                bssid: parse_bssid(header),
                ..IwBss::default()
            });
            continue;
        }

        let Some(bss) = current.as_mut() else {
            continue;
        };
        let line = raw_line.trim_start();

        if let Some(value) = line.strip_prefix("freq:") {
            let mhz: f64 = value.trim().parse().map_err(|e| SourceError::Parse {
                context: "freq".to_string(),
                message: format!("{value:?}: {e}"),
            })?;
            bss.frequency_khz = (mhz * 1000.0).round() as u32;
        } else if let Some(value) = line.strip_prefix("signal:") {
            let dbm = value.split_whitespace().next().unwrap_or_default();
            let dbm: f64 = dbm.parse().map_err(|e| SourceError::Parse {
                context: "signal".to_string(),
                message: format!("{value:?}: {e}"),
            })?;
            bss.signal_dbm = dbm.round() as i32;
        } else if let Some(value) = line.strip_prefix("SSID:") {
            bss.ssid = unescape_ssid(value.strip_prefix(' ').unwrap_or(value));
        } else if let Some(value) = line.strip_prefix("capability:") {
            bss.privacy = value.split_whitespace().any(|w| w == "Privacy");
        } else if let Some(value) = line
            .strip_prefix("Supported rates:")
            .or_else(|| line.strip_prefix("Extended supported rates:"))
        {
            bss.rates.extend(parse_rates(value));
        } else if line.starts_with("HT capabilities:") {
            bss.ht = true;
        } else if line.starts_with("VHT capabilities:") {
            bss.vht = true;
        } else if line.starts_with("HE capabilities:") {
            bss.he = true;
        } else if line.starts_with("RSN:") || line.starts_with("WPA:") {
            bss.rsn_or_wpa = true;
        }
    }

    if let Some(bss) = current {
        entries.push(bss);
    }

    trace!("Parsed {} BSS entries from scan output", entries.len());
    Ok(entries)
}

/// Derives the available-network list by grouping BSS blocks on the exact SSID
///
/// Groups keep first-seen order. PHY codes are unioned, signal quality is the
/// best of the group, and a network is secured if any of its BSSes is.
pub fn group_available_networks(entries: &[IwBss]) -> Vec<RawScanNetwork> {
    let mut groups: Vec<(Vec<u8>, BTreeSet<u32>, u32, bool)> = Vec::new();

    for bss in entries {
        let quality = signal_quality(bss.signal_dbm);
        match groups.iter_mut().find(|(ssid, ..)| *ssid == bss.ssid) {
            Some((_, phy_types, best_quality, secured)) => {
                phy_types.extend(bss.phy_types());
                *best_quality = (*best_quality).max(quality);
                *secured |= bss.security_enabled();
            }
            None => groups.push((
                bss.ssid.clone(),
                bss.phy_types().into_iter().collect(),
                quality,
                bss.security_enabled(),
            )),
        }
    }

    groups
        .into_iter()
        .map(|(ssid, phy_types, signal_quality, security_enabled)| RawScanNetwork {
            ssid: RawSsid::padded(&ssid),
            phy_types: phy_types.into_iter().collect(),
            signal_quality,
            security_enabled,
        })
        .collect()
}

fn parse_bssid(header: &str) -> Option<[u8; 6]> {
    let text: String = header
        .chars()
        .take_while(|c| c.is_ascii_hexdigit() || *c == ':')
        .collect();

    let octets: Vec<u8> = text
        .split(':')
        .filter_map(|part| u8::from_str_radix(part, 16).ok())
        .collect();

    match <[u8; 6]>::try_from(octets.as_slice()) {
        Ok(bssid) => Some(bssid),
        Err(_) => {
            warn!("Malformed BSS header: {header}");
            None
        }
    }
}

fn parse_rates(value: &str) -> Vec<f32> {
    value
        .split_whitespace()
        .filter_map(|token| token.trim_end_matches('*').parse().ok())
        .collect()
}

/// Reverses iw's SSID escaping, where unprintable bytes appear as `\xNN`
pub fn unescape_ssid(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let decoded = bytes
                .get(i + 2..i + 4)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    out
}
