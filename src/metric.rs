//! The metric record emitted by collectors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of measurement a metric carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// An instantaneous value, not a counter delta.
    Gauge,
}

/// One emitted metric record: a named field set with identifying tags and
/// the timestamp of the collection cycle that produced it.
///
/// All records produced by one `gather` call share a single timestamp;
/// collectors capture it once per cycle, never per record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, f64>,
    pub timestamp: DateTime<Utc>,
    pub kind: MetricKind,
}

impl Metric {
    pub fn gauge(
        measurement: &str,
        fields: BTreeMap<String, f64>,
        tags: BTreeMap<String, String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            measurement: measurement.to_string(),
            tags,
            fields,
            timestamp,
            kind: MetricKind::Gauge,
        }
    }
}
