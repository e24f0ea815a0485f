//! Host metrics input collectors for a telemetry agent.
//!
//! This crate ships [`Collector`] implementations (currently CPU), the
//! [`Accumulator`] sink contract they emit into, and the platform providers
//! that source raw OS counters. Scheduling and transport belong to the host
//! agent; gathering one cycle of measurements belongs here.
//!
//! A host wires things together explicitly:
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use telemetry_inputs::{CollectorRegistry, MetricBuffer};
//!
//! let registry = CollectorRegistry::with_builtin();
//! let mut cpu = registry.build("cpu").expect("builtin collector");
//! let mut buffer = MetricBuffer::new();
//! cpu.gather(&mut buffer).await?;
//! for metric in buffer.drain() {
//!     println!("{}", serde_json::to_string(&metric)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accumulator;
pub mod collectors;
pub mod metric;
pub mod platform;
pub mod settings;

pub use accumulator::{Accumulator, ChannelAccumulator, MetricBuffer};
pub use collectors::cpu::{CpuConfig, CpuStats};
pub use collectors::{Collector, CollectorRegistry};
pub use metric::{Metric, MetricKind};
pub use platform::{default_provider, CpuTimes, PlatformStatsProvider, ProviderError};
pub use settings::Settings;
