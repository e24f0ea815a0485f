//! Platform providers for raw CPU time-accounting counters.
//!
//! Collectors depend only on [`PlatformStatsProvider`]; how the counters are
//! sourced is the provider's business. [`default_provider`] picks the
//! implementation for the build target.

pub mod procfs;
pub mod sysinfo;

use thiserror::Error;

/// Label providers use for the aggregate-of-all-CPUs sample.
pub const TOTAL_CPU_LABEL: &str = "cpu-total";

/// The CPU state buckets every provider reports.
///
/// The output field name for each bucket is defined here exactly once so the
/// collector and its tests cannot drift apart on spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuBucket {
    User,
    System,
    Idle,
    Nice,
    Iowait,
    Irq,
    Softirq,
    Steal,
    Guest,
    GuestNice,
}

impl CpuBucket {
    pub const ALL: [CpuBucket; 10] = [
        CpuBucket::User,
        CpuBucket::System,
        CpuBucket::Idle,
        CpuBucket::Nice,
        CpuBucket::Iowait,
        CpuBucket::Irq,
        CpuBucket::Softirq,
        CpuBucket::Steal,
        CpuBucket::Guest,
        CpuBucket::GuestNice,
    ];

    /// Name of the gauge field this bucket is reported under.
    pub fn usage_field(self) -> &'static str {
        match self {
            CpuBucket::User => "usage_user",
            CpuBucket::System => "usage_system",
            CpuBucket::Idle => "usage_idle",
            CpuBucket::Nice => "usage_nice",
            CpuBucket::Iowait => "usage_iowait",
            CpuBucket::Irq => "usage_irq",
            CpuBucket::Softirq => "usage_softirq",
            CpuBucket::Steal => "usage_steal",
            CpuBucket::Guest => "usage_guest",
            CpuBucket::GuestNice => "usage_guest_nice",
        }
    }
}

/// One observation of CPU time buckets, for a single logical CPU or for the
/// aggregate of all CPUs.
///
/// Units are owned by the provider (cumulative seconds, percentages, ...)
/// and are consistent across every sample returned from one call; the
/// collector treats the values as opaque numeric measures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuTimes {
    /// CPU identifier: `cpu0`, `cpu1`, ... or [`TOTAL_CPU_LABEL`].
    pub cpu: String,
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

impl CpuTimes {
    pub fn bucket(&self, bucket: CpuBucket) -> f64 {
        match bucket {
            CpuBucket::User => self.user,
            CpuBucket::System => self.system,
            CpuBucket::Idle => self.idle,
            CpuBucket::Nice => self.nice,
            CpuBucket::Iowait => self.iowait,
            CpuBucket::Irq => self.irq,
            CpuBucket::Softirq => self.softirq,
            CpuBucket::Steal => self.steal,
            CpuBucket::Guest => self.guest,
            CpuBucket::GuestNice => self.guest_nice,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("reading cpu counters: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed counter data: {0}")]
    Parse(String),
}

/// Source of raw CPU time samples.
///
/// `percpu` requests one sample per logical CPU, `totalcpu` one aggregate
/// sample; both flags together yield N+1 samples, neither yields an empty
/// sequence. Label scheme and units must be consistent across calls.
pub trait PlatformStatsProvider: Send {
    fn cpu_times(&mut self, percpu: bool, totalcpu: bool) -> Result<Vec<CpuTimes>, ProviderError>;
}

/// The provider selected for this build target.
pub fn default_provider() -> Box<dyn PlatformStatsProvider> {
    #[cfg(target_os = "linux")]
    {
        Box::new(procfs::ProcStatProvider::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(sysinfo::SysinfoProvider::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_field_names_are_usage_prefixed_and_distinct() {
        let names: Vec<&str> = CpuBucket::ALL.iter().map(|b| b.usage_field()).collect();
        assert_eq!(names.len(), 10);
        assert!(names.iter().all(|n| n.starts_with("usage_")));
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn bucket_accessor_matches_struct_fields() {
        let times = CpuTimes {
            cpu: "cpu0".to_string(),
            user: 1.0,
            system: 2.0,
            idle: 3.0,
            nice: 4.0,
            iowait: 5.0,
            irq: 6.0,
            softirq: 7.0,
            steal: 8.0,
            guest: 9.0,
            guest_nice: 10.0,
        };
        let values: Vec<f64> = CpuBucket::ALL.iter().map(|b| times.bucket(*b)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    }
}
