//! Multi-link routing decisions with SLA-aware uplink selection.
//!
//! This module implements the core decision engine:
//! - Uplink health representation and SLA compliance
//! - All-or-nothing failover to a designated backup
//! - Uniform and weight-proportional round-robin distribution
//! - First-match SLA routing with best-available fallback

mod engine;
mod uplink;

pub use engine::{RouteOutcome, Router, SessionAssignment};
pub use uplink::{Uplink, UplinkConfig, UplinkState};

/// Slot resolution of the weighted round-robin pool.
///
/// Each active uplink occupies `floor(share * POOL_RESOLUTION)` slots;
/// a link whose share truncates to zero is absent from the pool.
pub const POOL_RESOLUTION: usize = 100;
