//! # Veles
//!
//! Control-plane decision engine for a multi-link WAN edge device.
//!
//! Given a set of uplinks with externally supplied health characteristics
//! (latency, jitter, loss, active state), Veles decides which uplink should
//! carry a session: SLA-compliant routing with fallback, all-or-nothing
//! failover to a backup link, and two load-distribution strategies
//! (uniform and weight-proportional round-robin).
//!
//! ## Architecture
//!
//! ┌─────────────────────────────────────────────────────┐
//! │                  Caller / Demo Driver               │
//! ├─────────────────────────────────────────────────────┤
//! │                 Router Decision Engine              │
//! │   failover · round-robin · weighted RR · SLA route  │
//! ├─────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐           │
//! │  │ Uplink A │  │ Uplink B │  │ Uplink N │  + backup │
//! │  │ (health) │  │ (health) │  │ (health) │           │
//! │  └──────────┘  └──────────┘  └──────────┘           │
//! └─────────────────────────────────────────────────────┘
//!
//! The engine never forwards packets or probes the network; link metrics
//! are configuration supplied by the caller, and routing decisions are
//! returned as values for the caller to act on.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow stylistic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)] // Many functions can't be const due to trait bounds
#![allow(clippy::doc_markdown)] // ASCII diagrams in docs
#![allow(clippy::cast_possible_truncation)] // Intentional pool-slot arithmetic
#![allow(clippy::cast_sign_loss)] // Shares are validated non-negative
#![allow(clippy::cast_precision_loss)] // Acceptable for ratios

pub mod config;
pub mod error;
pub mod router;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::router::{RouteOutcome, Router, SessionAssignment, Uplink, UplinkConfig};
    pub use crate::types::{SlaThresholds, UplinkId};
}
