//! Sink contract between collectors and the host's output pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::metric::Metric;

/// Receives the metrics a collector emits during one gather cycle.
///
/// Accumulator failures are the sink's own concern; collectors report
/// nothing about them through their error channel.
pub trait Accumulator: Send {
    /// Record one gauge measurement.
    fn add_gauge(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, f64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    );
}

/// In-memory accumulator backing tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MetricBuffer {
    metrics: Vec<Metric>,
}

impl MetricBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Take every buffered metric, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<Metric> {
        std::mem::take(&mut self.metrics)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Accumulator for MetricBuffer {
    fn add_gauge(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, f64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) {
        self.metrics.push(Metric::gauge(measurement, fields, tags, timestamp));
    }
}

/// Accumulator that forwards each metric over an mpsc channel, for hosts
/// that run collectors and publishers on separate tasks.
pub struct ChannelAccumulator {
    tx: mpsc::UnboundedSender<Metric>,
}

impl ChannelAccumulator {
    pub fn new(tx: mpsc::UnboundedSender<Metric>) -> Self {
        Self { tx }
    }
}

impl Accumulator for ChannelAccumulator {
    fn add_gauge(
        &mut self,
        measurement: &str,
        fields: BTreeMap<String, f64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) {
        // A closed channel means the publisher side is gone; the metric is
        // dropped rather than surfaced through the collector.
        let _ = self.tx.send(Metric::gauge(measurement, fields, tags, timestamp));
    }
}
