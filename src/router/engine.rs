//! Router decision engine over a fixed set of uplinks.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use super::{Uplink, POOL_RESOLUTION};
use crate::error::{Error, Result};
use crate::types::{SlaThresholds, UplinkId};

/// Outcome of routing a single session.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// Session was assigned to this uplink.
    Routed(Arc<Uplink>),
    /// The uplink at the rotation slot was down; the session is unroutable
    /// on that link for this step (no reassignment within the same step).
    LinkDown(UplinkId),
}

impl RouteOutcome {
    /// Get the chosen uplink, if any.
    pub fn routed(&self) -> Option<&Arc<Uplink>> {
        match self {
            Self::Routed(link) => Some(link),
            Self::LinkDown(_) => None,
        }
    }

    /// Check if the session could not be routed.
    pub fn is_down(&self) -> bool {
        matches!(self, Self::LinkDown(_))
    }
}

/// Per-session routing decision.
#[derive(Debug, Clone)]
pub struct SessionAssignment {
    /// 1-based session index.
    pub session: usize,
    /// Decision for this session.
    pub outcome: RouteOutcome,
}

/// Multi-link WAN router.
///
/// Holds an ordered sequence of uplinks plus an optional shared backup.
/// The router itself is stateless across calls; all mutable state lives
/// in the uplinks' own fail/recover transitions.
pub struct Router {
    links: Vec<Arc<Uplink>>,
    backup: Option<Arc<Uplink>>,
}

impl Router {
    /// Create a router over an ordered, non-empty link sequence.
    pub fn new(links: Vec<Arc<Uplink>>, backup: Option<Arc<Uplink>>) -> Result<Self> {
        if links.is_empty() {
            return Err(Error::InvalidConfig(
                "router requires at least one uplink".into(),
            ));
        }

        for (i, link) in links.iter().enumerate() {
            if links[..i].iter().any(|other| other.id() == link.id()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate uplink id: {}",
                    link.id()
                )));
            }
        }

        Ok(Self { links, backup })
    }

    /// Get the ordered link sequence.
    pub fn links(&self) -> &[Arc<Uplink>] {
        &self.links
    }

    /// Get the backup uplink, if configured.
    pub fn backup(&self) -> Option<&Arc<Uplink>> {
        self.backup.as_ref()
    }

    /// Look up an uplink by id.
    pub fn uplink(&self, id: &UplinkId) -> Option<&Arc<Uplink>> {
        self.links.iter().find(|link| link.id() == id)
    }

    /// Detect failure and select the backup link.
    ///
    /// Scans the link sequence in order and switches everything to the
    /// configured backup as soon as any link is inactive; which specific
    /// link failed does not matter, and the backup's own state is not
    /// checked. Returns `Ok(None)` when all links are operational.
    pub fn failover(&self) -> Result<Option<Arc<Uplink>>> {
        for link in &self.links {
            if !link.is_active() {
                let backup = self.backup.as_ref().ok_or(Error::NoBackupConfigured)?;
                warn!(
                    failed = %link.id(),
                    backup = %backup.id(),
                    "link failure detected, shifting to backup"
                );
                return Ok(Some(Arc::clone(backup)));
            }
        }

        debug!("all links operational, no failover needed");
        Ok(None)
    }

    /// Distribute sessions across links in uniform round-robin order.
    ///
    /// The rotation starts at the first link and advances one position per
    /// session regardless of link activity; a session landing on an
    /// inactive link is reported as unroutable rather than reassigned.
    pub fn round_robin(&self, sessions: usize) -> Vec<SessionAssignment> {
        let mut assignments = Vec::with_capacity(sessions);
        let mut index = 0;

        for session in 1..=sessions {
            let link = &self.links[index];
            let outcome = if link.is_active() {
                debug!(session, uplink = %link.id(), "session routed");
                RouteOutcome::Routed(Arc::clone(link))
            } else {
                warn!(session, uplink = %link.id(), "session cannot be routed, link is down");
                RouteOutcome::LinkDown(link.id().clone())
            };

            assignments.push(SessionAssignment { session, outcome });
            index = (index + 1) % self.links.len();
        }

        assignments
    }

    /// Distribute sessions proportionally to link weights.
    ///
    /// Draws each session uniformly at random from a weighted pool using
    /// the thread-local RNG; see [`Self::weighted_round_robin_with`] for
    /// the injectable-RNG variant used by deterministic tests.
    pub fn weighted_round_robin(&self, sessions: usize) -> Result<Vec<SessionAssignment>> {
        self.weighted_round_robin_with(&mut rand::thread_rng(), sessions)
    }

    /// Weight-proportional distribution with a caller-supplied RNG.
    ///
    /// The pool holds `floor(weight / total_weight * POOL_RESOLUTION)`
    /// slots per active link. An active link whose share truncates to zero
    /// slots is absent from the pool entirely; with very skewed weights
    /// this biases selection away from low-weight links.
    pub fn weighted_round_robin_with<R: Rng>(
        &self,
        rng: &mut R,
        sessions: usize,
    ) -> Result<Vec<SessionAssignment>> {
        let pool = self.build_weighted_pool()?;

        let mut assignments = Vec::with_capacity(sessions);
        for session in 1..=sessions {
            let chosen = &pool[rng.gen_range(0..pool.len())];
            debug!(session, uplink = %chosen.id(), "session routed (weighted)");
            assignments.push(SessionAssignment {
                session,
                outcome: RouteOutcome::Routed(Arc::clone(chosen)),
            });
        }

        Ok(assignments)
    }

    /// Build the weighted selection pool over active links.
    fn build_weighted_pool(&self) -> Result<Vec<Arc<Uplink>>> {
        let active: Vec<_> = self.links.iter().filter(|l| l.is_active()).collect();
        if active.is_empty() {
            return Err(Error::EmptyWeightedPool("no active uplinks".into()));
        }

        let total_weight: f64 = active.iter().map(|l| l.weight()).sum();
        if total_weight <= 0.0 {
            return Err(Error::EmptyWeightedPool(
                "total weight of active uplinks is zero".into(),
            ));
        }

        let mut pool = Vec::with_capacity(POOL_RESOLUTION);
        for link in &active {
            let share = link.weight() / total_weight;
            let slots = (share * POOL_RESOLUTION as f64) as usize;
            pool.extend(std::iter::repeat_with(|| Arc::clone(link)).take(slots));
        }

        if pool.is_empty() {
            return Err(Error::EmptyWeightedPool(
                "all active uplink shares truncate to zero slots".into(),
            ));
        }

        Ok(pool)
    }

    /// Route to the first SLA-compliant link, with fallback.
    ///
    /// First-match policy over the link sequence, not best-match. When no
    /// link complies, falls back to the backup if it exists and is active,
    /// otherwise to [`Self::best_available`].
    pub fn sla_route(&self, sla: &SlaThresholds) -> Option<Arc<Uplink>> {
        for link in &self.links {
            if link.check_sla(sla) {
                debug!(uplink = %link.id(), %sla, "SLA-compliant route selected");
                return Some(Arc::clone(link));
            }
        }

        warn!(%sla, "no link meets SLA, falling back");
        if let Some(backup) = &self.backup {
            if backup.is_active() {
                return Some(Arc::clone(backup));
            }
        }
        self.best_available()
    }

    /// Select the active link with the lowest latency.
    ///
    /// Ties are broken by sequence order (first encountered wins). Returns
    /// `None` when no link is active.
    pub fn best_available(&self) -> Option<Arc<Uplink>> {
        let best = self
            .links
            .iter()
            .filter(|l| l.is_active())
            .min_by(|a, b| {
                a.latency_ms()
                    .partial_cmp(&b.latency_ms())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned();

        match &best {
            Some(link) => debug!(uplink = %link.id(), "rerouted to best available latency"),
            None => warn!("no available links"),
        }
        best
    }
}

// Intentionally abbreviated Debug output - link internals have their own Debug
#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("links", &self.links.len())
            .field("backup", &self.backup.as_ref().map(|b| b.id()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::UplinkConfig;

    fn link(id: &str, latency: f64, weight: f64) -> Arc<Uplink> {
        Arc::new(
            Uplink::new(UplinkConfig {
                id: UplinkId::new(id),
                latency_ms: latency,
                jitter_ms: 5.0,
                loss_pct: 1.0,
                weight,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_rejects_empty_link_set() {
        assert!(Router::new(vec![], None).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Router::new(vec![link("a", 10.0, 1.0), link("a", 20.0, 1.0)], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_failover_without_backup_is_typed_error() {
        let a = link("a", 10.0, 1.0);
        let router = Router::new(vec![Arc::clone(&a)], None).unwrap();

        a.fail();
        assert!(matches!(
            router.failover(),
            Err(Error::NoBackupConfigured)
        ));
    }

    #[test]
    fn test_weighted_pool_rejects_zero_total_weight() {
        let router = Router::new(vec![link("a", 10.0, 0.0), link("b", 20.0, 0.0)], None).unwrap();
        assert!(matches!(
            router.weighted_round_robin(4),
            Err(Error::EmptyWeightedPool(_))
        ));
    }
}
