//! Individual uplink management.

use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{LinkMetrics, SlaThresholds, UplinkId};

/// Uplink configuration.
///
/// Metrics are fixed at construction; only the active flag changes at
/// runtime, via [`Uplink::fail`] and [`Uplink::recover`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UplinkConfig {
    /// Unique identifier.
    pub id: UplinkId,
    /// One-way latency in milliseconds.
    pub latency_ms: f64,
    /// Jitter in milliseconds.
    pub jitter_ms: f64,
    /// Packet loss in percent (0-100).
    pub loss_pct: f64,
    /// Weight for load balancing (higher = more traffic).
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            id: UplinkId::new("uplink-0"),
            latency_ms: 0.0,
            jitter_ms: 0.0,
            loss_pct: 0.0,
            weight: default_weight(),
        }
    }
}

impl UplinkConfig {
    /// Validate metric ranges.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().is_empty() {
            return Err(Error::InvalidConfig("uplink id must not be empty".into()));
        }
        if self.latency_ms < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "uplink {}: latency must be non-negative, got {}",
                self.id, self.latency_ms
            )));
        }
        if self.jitter_ms < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "uplink {}: jitter must be non-negative, got {}",
                self.id, self.jitter_ms
            )));
        }
        if !(0.0..=100.0).contains(&self.loss_pct) {
            return Err(Error::InvalidConfig(format!(
                "uplink {}: loss must be within 0-100%, got {}",
                self.id, self.loss_pct
            )));
        }
        if self.weight < 0.0 || !self.weight.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "uplink {}: weight must be finite and non-negative, got {}",
                self.id, self.weight
            )));
        }
        Ok(())
    }
}

/// Uplink runtime state.
#[derive(Debug, Clone)]
pub struct UplinkState {
    /// Whether the link currently carries traffic.
    pub active: bool,
    /// Time of the last fail/recover transition.
    pub last_transition: Option<Instant>,
    /// Number of state transitions since construction.
    pub transitions: u64,
}

impl Default for UplinkState {
    fn default() -> Self {
        Self {
            active: true,
            last_transition: None,
            transitions: 0,
        }
    }
}

/// An individual WAN uplink.
///
/// Shared between the router's link sequence and (potentially) its backup
/// slot via `Arc`; all mutation goes through the explicit fail/recover
/// transitions so the active flag cannot drift out of band.
pub struct Uplink {
    /// Configuration (immutable after construction).
    config: UplinkConfig,
    /// Current state.
    state: RwLock<UplinkState>,
}

impl Uplink {
    /// Create a new uplink, validating its configuration.
    pub fn new(config: UplinkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RwLock::new(UplinkState::default()),
        })
    }

    /// Get the uplink ID.
    pub fn id(&self) -> &UplinkId {
        &self.config.id
    }

    /// Get the configuration.
    pub fn config(&self) -> &UplinkConfig {
        &self.config
    }

    /// Get current state.
    pub fn state(&self) -> UplinkState {
        self.state.read().clone()
    }

    /// Check if the uplink is active.
    pub fn is_active(&self) -> bool {
        self.state.read().active
    }

    /// Get configured latency in milliseconds.
    pub fn latency_ms(&self) -> f64 {
        self.config.latency_ms
    }

    /// Get configured weight.
    pub fn weight(&self) -> f64 {
        self.config.weight
    }

    /// Get a metrics snapshot.
    pub fn metrics(&self) -> LinkMetrics {
        LinkMetrics {
            latency_ms: self.config.latency_ms,
            jitter_ms: self.config.jitter_ms,
            loss_pct: self.config.loss_pct,
        }
    }

    /// Mark the uplink as failed. Idempotent.
    pub fn fail(&self) {
        let mut state = self.state.write();
        if state.active {
            state.active = false;
            state.last_transition = Some(Instant::now());
            state.transitions += 1;
            warn!(uplink = %self.config.id, "uplink has failed");
        }
    }

    /// Mark the uplink as recovered. Idempotent.
    pub fn recover(&self) {
        let mut state = self.state.write();
        if !state.active {
            state.active = true;
            state.last_transition = Some(Instant::now());
            state.transitions += 1;
            info!(uplink = %self.config.id, "uplink has recovered");
        }
    }

    /// Check SLA compliance: active and all metrics within thresholds.
    ///
    /// Pure predicate, inclusive comparisons, no side effects.
    pub fn check_sla(&self, sla: &SlaThresholds) -> bool {
        self.is_active() && self.metrics().within(sla)
    }
}

// Intentionally abbreviated Debug output - lock internals are not useful
#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for Uplink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uplink")
            .field("id", &self.config.id)
            .field("metrics", &self.metrics().summary())
            .field("weight", &self.config.weight)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uplink(latency: f64, jitter: f64, loss: f64) -> Uplink {
        Uplink::new(UplinkConfig {
            id: UplinkId::new("test"),
            latency_ms: latency,
            jitter_ms: jitter,
            loss_pct: loss,
            weight: 1.0,
        })
        .unwrap()
    }

    #[test]
    fn test_starts_active() {
        let link = uplink(10.0, 5.0, 1.0);
        assert!(link.is_active());
        assert_eq!(link.state().transitions, 0);
    }

    #[test]
    fn test_fail_recover_idempotent() {
        let link = uplink(10.0, 5.0, 1.0);

        link.fail();
        link.fail();
        assert!(!link.is_active());
        assert_eq!(link.state().transitions, 1);

        link.recover();
        link.recover();
        assert!(link.is_active());
        assert_eq!(link.state().transitions, 2);
    }

    #[test]
    fn test_sla_requires_active() {
        let link = uplink(10.0, 5.0, 1.0);
        let sla = SlaThresholds::new(20.0, 10.0, 2.0);

        assert!(link.check_sla(&sla));
        link.fail();
        assert!(!link.check_sla(&sla));
    }

    #[test]
    fn test_validation_rejects_bad_metrics() {
        assert!(Uplink::new(UplinkConfig {
            latency_ms: -1.0,
            ..UplinkConfig::default()
        })
        .is_err());

        assert!(Uplink::new(UplinkConfig {
            loss_pct: 101.0,
            ..UplinkConfig::default()
        })
        .is_err());

        assert!(Uplink::new(UplinkConfig {
            weight: -0.5,
            ..UplinkConfig::default()
        })
        .is_err());
    }
}
