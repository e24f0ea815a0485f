//! CPU usage collector.
//!
//! Reads per-core and aggregate CPU time buckets from the platform provider
//! and reports them as `usage_*` gauges under measurement `cpu`, optionally
//! with a derived `usage_active` sum of the non-idle buckets.

use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::accumulator::Accumulator;
use crate::platform::{CpuBucket, CpuTimes, PlatformStatsProvider};

use super::Collector;

/// User-facing options for the CPU collector. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    /// Report one record per logical CPU.
    pub percpu: bool,
    /// Report one aggregate record across all CPUs.
    pub totalcpu: bool,
    /// Collect raw cumulative CPU time. No effect over providers that
    /// report rate-normalized usage.
    pub collect_cpu_time: bool,
    /// Report `usage_active`, the sum of all non-idle CPU states.
    pub report_active: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            percpu: true,
            totalcpu: true,
            collect_cpu_time: false,
            report_active: true,
        }
    }
}

const SAMPLE_CONFIG: &str = r#"
  ## Whether to report per-cpu stats or not
  percpu = true
  ## Whether to report total system cpu stats or not
  totalcpu = true
  ## If true, collect raw CPU time metrics (no effect where the platform
  ## reports rate-normalized usage)
  collect_cpu_time = false
  ## If true, compute and report the sum of all non-idle CPU states
  report_active = true
"#;

/// Gathers one set of CPU gauges per collection cycle.
///
/// Stateless across cycles: every `gather` call is a self-contained
/// transformation of one provider snapshot.
pub struct CpuStats {
    provider: Box<dyn PlatformStatsProvider>,
    config: CpuConfig,
}

impl CpuStats {
    /// Default-configured collector over `provider`.
    pub fn new(provider: Box<dyn PlatformStatsProvider>) -> Self {
        Self::with_config(provider, CpuConfig::default())
    }

    pub fn with_config(provider: Box<dyn PlatformStatsProvider>, config: CpuConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }
}

/// Sum of the buckets that represent work: everything except idle and the
/// guest buckets (the kernel already counts guest time inside user/nice).
fn active_cpu_time(t: &CpuTimes) -> f64 {
    t.user + t.system + t.nice + t.iowait + t.irq + t.softirq + t.steal
}

#[async_trait]
impl Collector for CpuStats {
    fn describe(&self) -> &'static str {
        "Read metrics about cpu usage"
    }

    fn sample_config(&self) -> &'static str {
        SAMPLE_CONFIG
    }

    async fn gather(&mut self, acc: &mut dyn Accumulator) -> anyhow::Result<()> {
        // A provider error is authoritative: nothing is emitted for the
        // cycle, whatever the provider returned alongside it.
        let times = self
            .provider
            .cpu_times(self.config.percpu, self.config.totalcpu)
            .context("error getting CPU info")?;
        let now = Utc::now();

        for cts in &times {
            let mut tags = BTreeMap::new();
            tags.insert("cpu".to_string(), cts.cpu.clone());

            let mut fields = BTreeMap::new();
            for bucket in CpuBucket::ALL {
                fields.insert(bucket.usage_field().to_string(), cts.bucket(bucket));
            }
            if self.config.report_active {
                fields.insert("usage_active".to_string(), active_cpu_time(cts));
            }

            acc.add_gauge("cpu", fields, tags, now);
        }

        Ok(())
    }
}
