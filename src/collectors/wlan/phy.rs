//! PHY capability summary
//!
//! Raw PHY type codes follow the native WiFi numbering. Only OFDM (802.11a),
//! ERP (802.11g) and HT (802.11n) contribute a letter; every other code is
//! ignored.

use std::collections::BTreeSet;

use crate::models::UNKNOWN_TEXT;

pub const PHY_FHSS: u32 = 1;
pub const PHY_DSSS: u32 = 2;
pub const PHY_IR_BASEBAND: u32 = 3;
pub const PHY_OFDM: u32 = 4;
pub const PHY_HRDSSS: u32 = 5;
pub const PHY_ERP: u32 = 6;
pub const PHY_HT: u32 = 7;
pub const PHY_VHT: u32 = 8;
pub const PHY_HE: u32 = 10;

const CAPABILITY_PREFIX: &str = "802.11";

fn phy_letter(code: u32) -> Option<char> {
    match code {
        PHY_OFDM => Some('a'),
        PHY_ERP => Some('g'),
        PHY_HT => Some('n'),
        _ => None,
    }
}

/// Builds a capability string such as `802.11gn` from raw PHY type codes
///
/// Codes are visited in ascending numeric order with duplicates collapsed,
/// so the letters always come out as a subset of `a`, `g`, `n` in that order.
/// Returns `"?"` when no code is recognized.
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::phy::summarize_phy_types;
///
/// assert_eq!(summarize_phy_types(&[7, 6]), "802.11gn");
/// assert_eq!(summarize_phy_types(&[]), "?");
/// ```
pub fn summarize_phy_types(codes: &[u32]) -> String {
    let letters: String = codes
        .iter()
        .copied()
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .filter_map(phy_letter)
        .collect();

    if letters.is_empty() {
        UNKNOWN_TEXT.to_string()
    } else {
        format!("{CAPABILITY_PREFIX}{letters}")
    }
}
