use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wlan_watcher::collectors::wlan::{CorrelationKey, HardwareAddressSource};

/// Main CLI structure for the wlan-watcher application
/// Uses clap's derive macros for automatic CLI generation
#[derive(Parser)]
#[command(author = "Kaipo Chen")]
#[command(version)]
#[command(about = "WLAN Watcher - Survey nearby wireless access points on every adapter")]
#[command(long_about = "WLAN Watcher enumerates the wireless adapters of this host, reads their scan results \
and shows one row per access point: SSID, channel, MAC address, supported PHY modes, signal strength \
and signal quality. Unknown values are shown as -1 or ?.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./wlan-watcher.toml when present)
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Read scan data from a recorded snapshot instead of the adapters
    #[arg(short, long, global = true, help = "Replay a JSON scan snapshot")]
    pub replay: Option<PathBuf>,

    /// Override the correlation key
    #[arg(long, global = true, help = "How networks are paired with BSS entries: first-byte, full-ssid")]
    pub correlation_key: Option<CorrelationKey>,

    /// Override where the MAC address column comes from
    #[arg(long, global = true, help = "MAC address column source: ssid-bytes, bssid")]
    pub hardware_address_source: Option<HardwareAddressSource>,
}

/// Available CLI commands for the wlan-watcher application
#[derive(Subcommand)]
pub enum Commands {
    /// One scan cycle printed as a table per adapter
    #[command(about = "Run one scan cycle and print the results")]
    #[command(long_about = "Runs a single scan cycle over every wireless adapter and prints one table per adapter, \
followed by the number of networks detected.\n\n\
Examples:\n  \
ww scan                               # Scan all adapters\n  \
ww scan --json                        # Machine-readable output\n  \
ww scan --replay scan.json            # Use a recorded snapshot")]
    Scan {
        /// Print the results as JSON
        #[arg(short, long, help = "Output JSON instead of tables")]
        json: bool,
    },

    /// Live terminal view refreshed on the polling interval
    #[command(about = "Watch access points in a live dashboard")]
    #[command(long_about = "Launches a terminal dashboard that reruns the scan cycle on a fixed interval. \
Use Tab / Shift-Tab to switch adapters, 'r' to rescan now, 'q' or ESC to exit.\n\n\
Examples:\n  \
ww live                               # Refresh every 2.5 seconds\n  \
ww live --interval-ms 1000            # Refresh every second")]
    Live {
        /// Delay between scan cycles in milliseconds
        #[arg(short = 'i', long, help = "Scan interval in milliseconds")]
        interval_ms: Option<u64>,
    },

    /// List the wireless adapters
    #[command(about = "List wireless adapters")]
    Adapters,

    /// Record raw scan data for later replay
    #[command(about = "Save raw scan data as a JSON snapshot")]
    Snapshot {
        /// File the snapshot is written to
        #[arg(short, long, help = "Output file path")]
        output: PathBuf,
    },

    /// Print the effective configuration
    #[command(about = "Show the effective configuration")]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_with_globals() {
        let cli = Cli::parse_from([
            "ww",
            "scan",
            "--json",
            "--replay",
            "scan.json",
            "--correlation-key",
            "full-ssid",
        ]);
        assert!(matches!(cli.command, Commands::Scan { json: true }));
        assert_eq!(cli.replay, Some(PathBuf::from("scan.json")));
        assert_eq!(cli.correlation_key, Some(CorrelationKey::FullSsid));
        assert_eq!(cli.hardware_address_source, None);
    }

    #[test]
    fn test_parse_live_interval() {
        let cli = Cli::parse_from(["ww", "live", "-i", "1000"]);
        assert!(matches!(cli.command, Commands::Live { interval_ms: Some(1000) }));
    }

    #[test]
    fn test_rejects_unknown_correlation_key() {
        assert!(Cli::try_parse_from(["ww", "scan", "--correlation-key", "bssid"]).is_err());
    }
}
