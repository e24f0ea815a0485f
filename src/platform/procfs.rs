//! Linux provider reading `/proc/stat`.
//!
//! Counters in `/proc/stat` are cumulative jiffies per CPU state; they are
//! normalized to seconds here so every sample this provider returns carries
//! the same unit.

use std::fs;

use tracing::debug;

use super::{CpuTimes, PlatformStatsProvider, ProviderError, TOTAL_CPU_LABEL};

const PROC_STAT: &str = "/proc/stat";

/// Kernel USER_HZ. Fixed at 100 on every supported Linux target.
const TICKS_PER_SECOND: f64 = 100.0;

/// Stateless reader of `/proc/stat` CPU lines.
#[derive(Debug, Default)]
pub struct ProcStatProvider;

impl ProcStatProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformStatsProvider for ProcStatProvider {
    fn cpu_times(&mut self, percpu: bool, totalcpu: bool) -> Result<Vec<CpuTimes>, ProviderError> {
        if !percpu && !totalcpu {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(PROC_STAT)?;
        let times = parse(&content, percpu, totalcpu)?;
        debug!(samples = times.len(), "read cpu counters from {PROC_STAT}");
        Ok(times)
    }
}

/// Extract the requested CPU lines from `/proc/stat` content.
///
/// Field order in the kernel's cpu lines: user, nice, system, idle, iowait,
/// irq, softirq, steal, guest, guest_nice. Kernels older than 2.6.24 omit
/// trailing fields; missing buckets read as zero.
fn parse(content: &str, percpu: bool, totalcpu: bool) -> Result<Vec<CpuTimes>, ProviderError> {
    let mut times = Vec::new();

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let label = match parts.next() {
            Some(label) if label.starts_with("cpu") => label,
            _ => continue,
        };
        let aggregate = label == "cpu";
        if aggregate && !totalcpu {
            continue;
        }
        if !aggregate && !percpu {
            continue;
        }

        let mut buckets = [0.0f64; 10];
        for (slot, raw) in buckets.iter_mut().zip(&mut parts) {
            let ticks: u64 = raw.parse().map_err(|_| {
                ProviderError::Parse(format!("counter {raw:?} in line {label:?} is not numeric"))
            })?;
            *slot = ticks as f64 / TICKS_PER_SECOND;
        }

        times.push(CpuTimes {
            cpu: if aggregate {
                TOTAL_CPU_LABEL.to_string()
            } else {
                label.to_string()
            },
            user: buckets[0],
            nice: buckets[1],
            system: buckets[2],
            idle: buckets[3],
            iowait: buckets[4],
            irq: buckets[5],
            softirq: buckets[6],
            steal: buckets[7],
            guest: buckets[8],
            guest_nice: buckets[9],
        });
    }

    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
cpu  1000 20 300 8000 40 5 6 7 8 9
cpu0 500 10 150 4000 20 2 3 3 4 4
cpu1 500 10 150 4000 20 3 3 4 4 5
intr 12345 0 0
ctxt 999999
btime 1724580000
";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[test]
    fn parses_aggregate_and_per_core_lines() {
        init_tracing();
        let times = parse(SAMPLE, true, true).unwrap();
        assert_eq!(times.len(), 3);
        assert_eq!(times[0].cpu, TOTAL_CPU_LABEL);
        assert_eq!(times[1].cpu, "cpu0");
        assert_eq!(times[2].cpu, "cpu1");
    }

    #[test]
    fn converts_jiffies_to_seconds() {
        let times = parse(SAMPLE, false, true).unwrap();
        let total = &times[0];
        assert_eq!(total.user, 10.0);
        assert_eq!(total.nice, 0.2);
        assert_eq!(total.system, 3.0);
        assert_eq!(total.idle, 80.0);
        assert_eq!(total.iowait, 0.4);
        assert_eq!(total.guest_nice, 0.09);
    }

    #[test]
    fn percpu_flag_selects_only_core_lines() {
        let times = parse(SAMPLE, true, false).unwrap();
        assert_eq!(times.len(), 2);
        assert!(times.iter().all(|t| t.cpu != TOTAL_CPU_LABEL));
    }

    #[test]
    fn totalcpu_flag_selects_only_the_aggregate_line() {
        let times = parse(SAMPLE, false, true).unwrap();
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].cpu, TOTAL_CPU_LABEL);
    }

    #[test]
    fn neither_flag_yields_no_samples() {
        let times = parse(SAMPLE, false, false).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn short_lines_default_missing_buckets_to_zero() {
        // Pre-2.6.24 kernels stop after softirq.
        let content = "cpu  100 0 50 800 10 0 0\n";
        let times = parse(content, false, true).unwrap();
        assert_eq!(times[0].steal, 0.0);
        assert_eq!(times[0].guest, 0.0);
        assert_eq!(times[0].guest_nice, 0.0);
    }

    #[test]
    fn non_numeric_counter_is_a_parse_error() {
        let content = "cpu0 100 0 abc 800 10 0 0 0 0 0\n";
        let err = parse(content, true, false).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn non_cpu_lines_are_ignored() {
        let content = "intr 1 2 3\nctxt 42\ncpu0 1 2 3 4 5 6 7 8 9 10\n";
        let times = parse(content, true, true).unwrap();
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].cpu, "cpu0");
    }
}
