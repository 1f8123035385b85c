//! SSID decoding
//!
//! SSIDs are decoded one byte per character. Bytes outside the ASCII range
//! become `?`, matching a single-byte US-ASCII decoder.

use crate::collectors::wlan::errors::DecodeError;
use crate::models::RawSsid;

/// Decodes the first `declared_length` bytes of `buffer` as ASCII text
///
/// A declared length of zero yields an empty identifier (hidden network).
/// Bytes past the declared length are ignored.
///
/// # Errors
///
/// Returns [`DecodeError`] when `declared_length` exceeds the buffer length.
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::ssid::decode_ssid;
///
/// assert_eq!(decode_ssid(b"Home\0\0\0\0", 4).unwrap(), "Home");
/// assert_eq!(decode_ssid(b"Home", 0).unwrap(), "");
/// assert!(decode_ssid(b"Home", 5).is_err());
/// ```
pub fn decode_ssid(buffer: &[u8], declared_length: usize) -> Result<String, DecodeError> {
    let bytes = buffer.get(..declared_length).ok_or(DecodeError {
        declared_length,
        buffer_length: buffer.len(),
    })?;

    Ok(bytes
        .iter()
        .map(|b| if b.is_ascii() { *b as char } else { '?' })
        .collect())
}

/// Decodes a [`RawSsid`] using its own declared length
pub fn decode_raw_ssid(ssid: &RawSsid) -> Result<String, DecodeError> {
    decode_ssid(&ssid.bytes, ssid.length as usize)
}
