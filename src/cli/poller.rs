use anyhow::{Context, Result, anyhow};
use log::debug;
use std::time::{Duration, Instant};

use wlan_watcher::collectors::wlan::{ScanCycle, WlanCollector};

/// Runs scan cycles on a fixed cadence without letting them overlap
///
/// The collector is moved onto a blocking task for each cycle and handed
/// back when the cycle returns, so a second cycle cannot start until the
/// first has finished. A tick that comes due while a cycle is running is
/// skipped, not queued.
pub struct ScanPoller {
    collector: Option<WlanCollector>,
    interval: Duration,
    last_run: Option<Instant>,
}

impl ScanPoller {
    pub fn new(collector: WlanCollector, interval: Duration) -> Self {
        Self {
            collector: Some(collector),
            interval,
            last_run: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the next cycle should run now
    pub fn is_due(&self) -> bool {
        self.time_until_due().is_zero()
    }

    pub fn time_until_due(&self) -> Duration {
        match self.last_run {
            Some(last) => self.interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Runs one cycle now on a blocking task
    pub async fn run_cycle(&mut self) -> Result<ScanCycle> {
        let mut collector = self
            .collector
            .take()
            .ok_or_else(|| anyhow!("scan collector is unavailable after a failed cycle"))?;

        let started = Instant::now();
        let (collector, outcome) = tokio::task::spawn_blocking(move || {
            let outcome = collector.collect_cycle();
            (collector, outcome)
        })
        .await
        .context("Scan cycle task panicked")?;

        self.collector = Some(collector);
        self.last_run = Some(Instant::now());
        debug!("Scan cycle took {:?}", started.elapsed());

        outcome.context("Scan cycle failed")
    }

    /// Waits until the next cycle is due, then runs it
    pub async fn tick(&mut self) -> Result<ScanCycle> {
        let wait = self.time_until_due();
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        self.run_cycle().await
    }
}
