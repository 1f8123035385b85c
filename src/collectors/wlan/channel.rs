//! Frequency to channel mapping
//!
//! Only the fourteen 2.4 GHz channels are mapped. Everything else, 5 GHz and
//! 6 GHz included, reports the unknown channel (`-1`).

use crate::models::UNKNOWN;

/// 2.4 GHz channel table as (center frequency MHz, channel)
const CHANNELS_2_4_GHZ: [(i32, i32); 14] = [
    (2412, 1),
    (2417, 2),
    (2422, 3),
    (2427, 4),
    (2432, 5),
    (2437, 6),
    (2442, 7),
    (2447, 8),
    (2452, 9),
    (2457, 10),
    (2462, 11),
    (2467, 12),
    (2472, 13),
    (2484, 14),
];

/// Converts a raw center frequency in kHz to MHz, truncating any remainder
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::channel::khz_to_mhz;
///
/// assert_eq!(khz_to_mhz(2437000), 2437);
/// assert_eq!(khz_to_mhz(2437999), 2437);
/// ```
pub fn khz_to_mhz(frequency_khz: u32) -> i32 {
    (frequency_khz / 1000) as i32
}

/// Maps a center frequency in MHz to its channel number, or `-1` when unknown
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::channel::frequency_to_channel;
///
/// assert_eq!(frequency_to_channel(2437), 6);
/// assert_eq!(frequency_to_channel(5180), -1);
/// ```
pub fn frequency_to_channel(frequency_mhz: i32) -> i32 {
    if frequency_mhz <= 0 {
        return UNKNOWN;
    }

    CHANNELS_2_4_GHZ
        .iter()
        .find(|(freq, _)| *freq == frequency_mhz)
        .map(|(_, channel)| *channel)
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_2_4_ghz_channels() {
        let expected = [
            (2412, 1),
            (2417, 2),
            (2422, 3),
            (2427, 4),
            (2432, 5),
            (2437, 6),
            (2442, 7),
            (2447, 8),
            (2452, 9),
            (2457, 10),
            (2462, 11),
            (2467, 12),
            (2472, 13),
            (2484, 14),
        ];

        for (freq, channel) in expected {
            assert_eq!(frequency_to_channel(freq), channel, "frequency {freq}");
        }
    }

    #[test]
    fn test_unmapped_frequencies_are_unknown() {
        // 5 GHz is not mapped
        assert_eq!(frequency_to_channel(5180), -1);
        assert_eq!(frequency_to_channel(5745), -1);

        // Unset and invalid values
        assert_eq!(frequency_to_channel(0), -1);
        assert_eq!(frequency_to_channel(-1), -1);

        // Between channels
        assert_eq!(frequency_to_channel(2413), -1);
        assert_eq!(frequency_to_channel(2477), -1);
    }

    #[test]
    fn test_khz_to_mhz_truncates() {
        assert_eq!(khz_to_mhz(2412000), 2412);
        assert_eq!(khz_to_mhz(2412999), 2412);
        assert_eq!(khz_to_mhz(999), 0);
        assert_eq!(khz_to_mhz(0), 0);
    }

    #[test]
    fn test_truncated_frequency_still_maps() {
        assert_eq!(frequency_to_channel(khz_to_mhz(2484500)), 14);
    }
}
