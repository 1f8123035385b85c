//! Hardware address formatting

use crate::models::UNKNOWN_TEXT;

/// Number of bytes in a hardware (MAC) address
pub const HARDWARE_ADDRESS_LEN: usize = 6;

/// Formats the leading six bytes of `address` as `XX-XX-XX-XX-XX-XX`
///
/// Input shorter than six bytes yields `"?"`. Extra trailing bytes are ignored.
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::hardware_address::format_hardware_address;
///
/// assert_eq!(
///     format_hardware_address(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
///     "00-11-22-33-44-55"
/// );
/// assert_eq!(format_hardware_address(&[0x00, 0x11]), "?");
/// ```
pub fn format_hardware_address(address: &[u8]) -> String {
    match address.get(..HARDWARE_ADDRESS_LEN) {
        Some(bytes) => bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join("-"),
        None => UNKNOWN_TEXT.to_string(),
    }
}
