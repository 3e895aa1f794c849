//! Tests for link failure detection, failover to the backup link, and
//! recovery behavior.

use std::sync::Arc;

use veles::error::Error;
use veles::router::{Router, Uplink, UplinkConfig};
use veles::types::{SlaThresholds, UplinkId};

fn create_test_uplink(id: &str, latency: f64, weight: f64) -> Arc<Uplink> {
    let config = UplinkConfig {
        id: UplinkId::new(id),
        latency_ms: latency,
        jitter_ms: 5.0,
        loss_pct: 1.0,
        weight,
    };
    Arc::new(Uplink::new(config).expect("valid test uplink"))
}

fn router_with_backup() -> (Router, Vec<Arc<Uplink>>, Arc<Uplink>) {
    let links = vec![
        create_test_uplink("internet", 10.0, 3.0),
        create_test_uplink("mpls", 20.0, 2.0),
        create_test_uplink("cellular", 30.0, 1.0),
    ];
    let backup = create_test_uplink("backup-mpls", 50.0, 0.0);
    let router = Router::new(links.clone(), Some(Arc::clone(&backup))).unwrap();
    (router, links, backup)
}

// ============================================================================
// Failover Detection
// ============================================================================

#[test]
fn test_no_failover_when_all_links_active() {
    let (router, _links, _backup) = router_with_backup();
    assert!(router.failover().unwrap().is_none());
}

#[test]
fn test_any_inactive_link_triggers_backup() {
    let (router, links, backup) = router_with_backup();

    // Not just the first link - any position in the sequence triggers it
    links[1].fail();
    let chosen = router.failover().unwrap().expect("failover expected");
    assert_eq!(chosen.id(), backup.id());
}

#[test]
fn test_failover_is_all_or_nothing() {
    let (router, links, backup) = router_with_backup();

    // Two healthy links remain, the policy still switches everything
    links[2].fail();
    let chosen = router.failover().unwrap().expect("failover expected");
    assert_eq!(chosen.id(), backup.id());
}

#[test]
fn test_failover_does_not_check_backup_state() {
    let (router, links, backup) = router_with_backup();

    backup.fail();
    links[0].fail();

    // The backup is returned even though it is itself down
    let chosen = router.failover().unwrap().expect("failover expected");
    assert_eq!(chosen.id(), backup.id());
    assert!(!chosen.is_active());
}

#[test]
fn test_failover_without_backup_fails_fast() {
    let links = vec![create_test_uplink("only", 10.0, 1.0)];
    let router = Router::new(links.clone(), None).unwrap();

    assert!(router.failover().unwrap().is_none());

    links[0].fail();
    assert!(matches!(router.failover(), Err(Error::NoBackupConfigured)));
}

// ============================================================================
// Recovery
// ============================================================================

#[test]
fn test_recovery_clears_failover() {
    let (router, links, _backup) = router_with_backup();

    links[0].fail();
    assert!(router.failover().unwrap().is_some());

    links[0].recover();
    assert!(router.failover().unwrap().is_none());
}

#[test]
fn test_fail_recover_restores_state_and_is_idempotent() {
    let link = create_test_uplink("flappy", 10.0, 1.0);
    assert!(link.is_active());

    link.fail();
    link.fail();
    link.fail();
    assert!(!link.is_active());
    assert_eq!(link.state().transitions, 1, "repeated fail() is a no-op");

    link.recover();
    link.recover();
    assert!(link.is_active());
    assert_eq!(link.state().transitions, 2, "repeated recover() is a no-op");
}

#[test]
fn test_inactive_link_never_sla_compliant() {
    let link = create_test_uplink("perfect", 0.0, 1.0);

    // Thresholds so generous any metrics would pass
    let sla = SlaThresholds::new(f64::MAX, f64::MAX, 100.0);
    assert!(link.check_sla(&sla));

    link.fail();
    assert!(!link.check_sla(&sla), "inactive link fails SLA regardless of metrics");
}

// ============================================================================
// Degraded-Network Scenario
// ============================================================================

#[test]
fn test_unmeetable_sla_after_losing_best_link() {
    let (router, links, backup) = router_with_backup();
    let unmeetable = SlaThresholds::new(1.0, 1.0, 0.0);

    // Deactivate the lowest-latency link; backup is still active
    links[0].fail();
    let chosen = router.sla_route(&unmeetable).expect("fallback expected");
    assert_eq!(chosen.id(), backup.id());

    // With the backup also down, fall through to best available
    backup.fail();
    let chosen = router.sla_route(&unmeetable).expect("fallback expected");
    assert_eq!(chosen.id().as_str(), "mpls", "lowest latency among remaining active links");
}
