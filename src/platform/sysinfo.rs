//! Portable provider backed by the `sysinfo` crate.
//!
//! `sysinfo` reports rate-normalized busy percentages rather than cumulative
//! time counters, so the busy share lands in the `user` bucket, the rest in
//! `idle`, and the remaining buckets stay zero. Cumulative time collection
//! (`collect_cpu_time`) has no effect over this provider.

use std::thread;

use sysinfo::System;
use tracing::debug;

use super::{CpuTimes, PlatformStatsProvider, ProviderError, TOTAL_CPU_LABEL};

pub struct SysinfoProvider {
    system: System,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let mut system = System::new();
        // Usage numbers are deltas between refreshes; prime with two spaced
        // refreshes so the first gather already has a meaningful baseline.
        system.refresh_cpu_usage();
        thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu_usage();
        debug!(cpus = system.cpus().len(), "sysinfo cpu provider primed");
        Self { system }
    }

    fn sample(label: String, busy_percent: f64) -> CpuTimes {
        CpuTimes {
            cpu: label,
            user: busy_percent,
            idle: (100.0 - busy_percent).max(0.0),
            ..CpuTimes::default()
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformStatsProvider for SysinfoProvider {
    fn cpu_times(&mut self, percpu: bool, totalcpu: bool) -> Result<Vec<CpuTimes>, ProviderError> {
        self.system.refresh_cpu_usage();

        let mut times = Vec::new();
        if percpu {
            for cpu in self.system.cpus() {
                times.push(Self::sample(cpu.name().to_string(), f64::from(cpu.cpu_usage())));
            }
        }
        if totalcpu {
            times.push(Self::sample(
                TOTAL_CPU_LABEL.to_string(),
                f64::from(self.system.global_cpu_usage()),
            ));
        }
        Ok(times)
    }
}
