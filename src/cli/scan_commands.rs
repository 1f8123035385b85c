use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use super::dashboard::Dashboard;
use super::poller::ScanPoller;
use wlan_watcher::collectors::platform::{
    AdapterSource, ScanSnapshot, SnapshotAdapterSource, create_adapter_source,
};
use wlan_watcher::collectors::wlan::WlanCollector;
use wlan_watcher::collectors::wlan::formatting::{format_status, format_table};
use wlan_watcher::config::WatcherConfig;
use wlan_watcher::models::AdapterScanResult;

pub struct ScanCommandHandler {
    config: WatcherConfig,
    replay: Option<PathBuf>,
}

impl ScanCommandHandler {
    pub fn new(config: WatcherConfig, replay: Option<PathBuf>) -> Self {
        Self { config, replay }
    }

    fn build_source(&self) -> Result<Box<dyn AdapterSource>> {
        match &self.replay {
            Some(path) => {
                info!("Replaying scan snapshot {}", path.display());
                Ok(Box::new(SnapshotAdapterSource::from_file(path)))
            }
            None => create_adapter_source(&self.config)
                .context("Failed to create the wireless adapter source"),
        }
    }

    fn build_collector(&self) -> Result<WlanCollector> {
        Ok(WlanCollector::from_config(self.build_source()?, &self.config))
    }

    pub fn handle_scan_command(&self, json: bool) -> Result<()> {
        let mut collector = self.build_collector()?;
        let results = collector
            .run_scan_cycle()
            .context("Scan cycle failed")?;

        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print!("{}", render_results(&results));
        }

        Ok(())
    }

    pub fn handle_adapters_command(&self) -> Result<()> {
        let collector = self.build_collector()?;
        let adapters = collector
            .list_adapters()
            .context("Failed to list wireless adapters")?;

        if adapters.is_empty() {
            println!("No wireless adapters found.");
        }
        for adapter in adapters {
            println!("{}", adapter.label());
        }

        Ok(())
    }

    pub fn handle_snapshot_command(&self, output: &Path) -> Result<()> {
        let source = self.build_source()?;
        let snapshot = ScanSnapshot::capture(source.as_ref())
            .context("Failed to capture raw scan data")?;
        snapshot
            .save(output)
            .with_context(|| format!("Failed to write snapshot to {}", output.display()))?;

        println!(
            "Saved raw scan data for {} adapter(s) to {}",
            snapshot.adapters.len(),
            output.display()
        );
        Ok(())
    }

    pub fn handle_config_command(&self) -> Result<()> {
        for line in self.config.describe() {
            println!("{line}");
        }
        Ok(())
    }

    pub async fn handle_live_command(&self, interval_ms: Option<u64>) -> Result<()> {
        let interval = match interval_ms {
            Some(0) => anyhow::bail!("Scan interval must be greater than zero"),
            Some(ms) => std::time::Duration::from_millis(ms),
            None => self.config.poll_interval(),
        };

        let poller = ScanPoller::new(self.build_collector()?, interval);
        let mut dashboard = Dashboard::new(poller);
        dashboard.run().await
    }
}

/// Renders one section per adapter: label, table, status line
pub fn render_results(results: &[AdapterScanResult]) -> String {
    if results.is_empty() {
        return "No wireless adapters found.\n".to_string();
    }

    let mut out = String::new();
    for result in results {
        out.push_str(&format!("Adapter: {}\n", result.adapter_label));
        out.push_str(&"=".repeat(result.adapter_label.len() + 9));
        out.push('\n');
        if !result.records.is_empty() {
            out.push_str(&format_table(result));
            out.push('\n');
        }
        out.push_str(&format_status(result.total_count));
        out.push_str("\n\n");
    }
    out
}
