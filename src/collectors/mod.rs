//! Collector trait and the host-assembled registry of collector factories.
//!
//! The host owns scheduling: it builds collectors from the registry, calls
//! `gather` on its own timer, and routes the resulting metrics through an
//! [`Accumulator`](crate::accumulator::Accumulator) to its publishers.

pub mod cpu;

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::platform::default_provider;

/// One metrics input.
///
/// `gather` is invoked once per collection cycle and must be self-contained:
/// no retries, no buffering, no cross-cycle state beyond the collector's own
/// configuration.
#[async_trait]
pub trait Collector: Send {
    /// One-line description of what the collector measures.
    fn describe(&self) -> &'static str;

    /// Commented TOML snippet documenting the collector's options.
    fn sample_config(&self) -> &'static str;

    /// Collect one cycle of measurements into `acc`.
    async fn gather(&mut self, acc: &mut dyn Accumulator) -> anyhow::Result<()>;
}

pub type CollectorFactory = Box<dyn Fn() -> Box<dyn Collector> + Send + Sync>;

/// Explicit name-to-factory map.
///
/// The host assembles this and constructs collectors directly; nothing in
/// the crate registers itself through global state.
#[derive(Default)]
pub struct CollectorRegistry {
    factories: HashMap<&'static str, CollectorFactory>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the collectors this crate ships, each bound
    /// to the provider for the build target.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("cpu", || Box::new(cpu::CpuStats::new(default_provider())));
        registry
    }

    pub fn register<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn() -> Box<dyn Collector> + Send + Sync + 'static,
    {
        debug!(collector = name, "registered collector factory");
        self.factories.insert(name, Box::new(factory));
    }

    /// Construct a fresh collector instance by name.
    pub fn build(&self, name: &str) -> Option<Box<dyn Collector>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_resolves_cpu() {
        let registry = CollectorRegistry::with_builtin();
        assert!(registry.names().any(|name| name == "cpu"));

        let collector = registry.build("cpu").unwrap();
        assert_eq!(collector.describe(), "Read metrics about cpu usage");
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let registry = CollectorRegistry::with_builtin();
        assert!(registry.build("disk").is_none());
    }

    #[test]
    fn hosts_can_register_their_own_factories() {
        let mut registry = CollectorRegistry::new();
        registry.register("cpu", || Box::new(cpu::CpuStats::new(default_provider())));
        assert!(registry.build("cpu").is_some());
        assert_eq!(registry.names().count(), 1);
    }
}
