//! Presentation helpers for scan results
//!
//! Records render into six fixed columns. Sentinel values (`-1`, `?`) are
//! shown as-is.

use crate::models::{AdapterScanResult, NormalizedAccessPointRecord};

/// Column headers in display order
pub const COLUMN_HEADERS: [&str; 6] = ["SSID", "Channel", "MAC Address", "PHY", "RSSI", "Quality"];

/// Formats the channel column, e.g. `6 (2437 MHz)`
///
/// # Examples
///
/// ```
/// use wlan_watcher::collectors::wlan::formatting::format_channel;
///
/// assert_eq!(format_channel(6, 2437), "6 (2437 MHz)");
/// assert_eq!(format_channel(-1, -1), "-1 (-1 MHz)");
/// ```
pub fn format_channel(channel: i32, frequency_mhz: i32) -> String {
    format!("{channel} ({frequency_mhz} MHz)")
}

/// Renders a record as its six display columns
pub fn record_columns(record: &NormalizedAccessPointRecord) -> [String; 6] {
    [
        record.ssid.clone(),
        format_channel(record.channel, record.channel_frequency_mhz),
        record.hardware_address.clone(),
        record.phy_capability.clone(),
        record.signal_dbm.to_string(),
        record.signal_quality.to_string(),
    ]
}

/// Status line for an adapter, e.g. `3 network(s) detected.`
pub fn format_status(count: usize) -> String {
    format!("{count} network(s) detected.")
}

/// Status line for the last adapter of a cycle, the one a single shared
/// status field ends up showing
pub fn cycle_status(results: &[AdapterScanResult]) -> Option<String> {
    results.last().map(|r| format_status(r.total_count))
}

/// Renders an adapter result as a plain-text table
pub fn format_table(result: &AdapterScanResult) -> String {
    let rows: Vec<[String; 6]> = result.records.iter().map(record_columns).collect();

    let mut widths = COLUMN_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let headers: Vec<String> = COLUMN_HEADERS.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![render(&headers[..])];
    lines.extend(rows.iter().map(|row| render(&row[..])));
    lines.join("\n")
}
