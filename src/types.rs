//! Core types used throughout Veles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an uplink (WAN connection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UplinkId(pub String);

impl UplinkId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UplinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UplinkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UplinkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// SLA threshold triple an uplink must satisfy to be deemed compliant.
///
/// All comparisons against link metrics are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaThresholds {
    /// Maximum tolerated latency in milliseconds.
    #[serde(default = "default_max_latency")]
    pub max_latency_ms: f64,

    /// Maximum tolerated jitter in milliseconds.
    #[serde(default = "default_max_jitter")]
    pub max_jitter_ms: f64,

    /// Maximum tolerated packet loss in percent.
    #[serde(default = "default_max_loss")]
    pub max_loss_pct: f64,
}

fn default_max_latency() -> f64 {
    20.0
}
fn default_max_jitter() -> f64 {
    10.0
}
fn default_max_loss() -> f64 {
    2.0
}

impl Default for SlaThresholds {
    fn default() -> Self {
        Self {
            max_latency_ms: default_max_latency(),
            max_jitter_ms: default_max_jitter(),
            max_loss_pct: default_max_loss(),
        }
    }
}

impl SlaThresholds {
    pub fn new(max_latency_ms: f64, max_jitter_ms: f64, max_loss_pct: f64) -> Self {
        Self {
            max_latency_ms,
            max_jitter_ms,
            max_loss_pct,
        }
    }
}

impl fmt::Display for SlaThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "latency<={:.0}ms jitter<={:.0}ms loss<={:.1}%",
            self.max_latency_ms, self.max_jitter_ms, self.max_loss_pct
        )
    }
}

/// Snapshot of a link's health characteristics.
///
/// Metrics are externally supplied configuration, not live measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkMetrics {
    /// One-way latency in milliseconds.
    pub latency_ms: f64,
    /// Jitter (delay variance) in milliseconds.
    pub jitter_ms: f64,
    /// Packet loss in percent (0-100).
    pub loss_pct: f64,
}

impl LinkMetrics {
    /// Check metrics against SLA thresholds (inclusive comparisons).
    pub fn within(&self, sla: &SlaThresholds) -> bool {
        self.latency_ms <= sla.max_latency_ms
            && self.jitter_ms <= sla.max_jitter_ms
            && self.loss_pct <= sla.max_loss_pct
    }

    /// Get a brief summary.
    pub fn summary(&self) -> String {
        format!(
            "latency={:.1}ms jitter={:.1}ms loss={:.1}%",
            self.latency_ms, self.jitter_ms, self.loss_pct
        )
    }
}

impl fmt::Display for LinkMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
