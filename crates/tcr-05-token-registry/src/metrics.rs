//! # Registry Metrics
//!
//! Prometheus metrics for admissions, challenges and the reserve.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! tcr-05-token-registry = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `tcr_admissions_total` - Counter of admitted members
//! - `tcr_exits_total` - Counter of voluntary exits
//! - `tcr_challenges_created_total` - Counter of challenges opened
//! - `tcr_votes_total` - Counter of votes cast (by choice)
//! - `tcr_challenges_resolved_total` - Counter of resolutions (by outcome)
//! - `tcr_rejections_total` - Counter of rejected operations (by error code)
//! - `tcr_reserve_balance` - Gauge of the reserve ledger, in base units

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter,
};

use shared_types::U256;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total members admitted
    pub static ref ADMISSIONS: IntCounter = register_int_counter!(
        "tcr_admissions_total",
        "Total number of members admitted"
    )
    .expect("Failed to create ADMISSIONS metric");

    /// Total voluntary exits
    pub static ref EXITS: IntCounter = register_int_counter!(
        "tcr_exits_total",
        "Total number of members that exited"
    )
    .expect("Failed to create EXITS metric");

    /// Total challenges opened
    pub static ref CHALLENGES_CREATED: IntCounter = register_int_counter!(
        "tcr_challenges_created_total",
        "Total number of challenges created"
    )
    .expect("Failed to create CHALLENGES_CREATED metric");

    /// Votes cast, labeled by choice
    pub static ref VOTES: CounterVec = register_counter_vec!(
        "tcr_votes_total",
        "Total number of votes cast",
        &["choice"]
    )
    .expect("Failed to create VOTES metric");

    /// Resolutions, labeled by outcome
    pub static ref RESOLUTIONS: CounterVec = register_counter_vec!(
        "tcr_challenges_resolved_total",
        "Total number of challenges resolved",
        &["outcome"]
    )
    .expect("Failed to create RESOLUTIONS metric");

    /// Rejected operations, labeled by error code
    pub static ref REJECTIONS: CounterVec = register_counter_vec!(
        "tcr_rejections_total",
        "Total number of rejected registry operations",
        &["code"]
    )
    .expect("Failed to create REJECTIONS metric");

    /// Reserve ledger balance
    pub static ref RESERVE_BALANCE: Gauge = register_gauge!(
        "tcr_reserve_balance",
        "Reserve ledger balance in asset base units"
    )
    .expect("Failed to create RESERVE_BALANCE metric");
}

/// Lossy conversion for gauges.
#[must_use]
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_admission() {
    ADMISSIONS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_exit() {
    EXITS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_challenge_created() {
    CHALLENGES_CREATED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_vote(choice: &str) {
    VOTES.with_label_values(&[choice]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_resolution(outcome: &str) {
    RESOLUTIONS.with_label_values(&[outcome]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_rejection(code: &str) {
    REJECTIONS.with_label_values(&[code]).inc();
}

#[cfg(feature = "metrics")]
pub fn set_reserve_balance(balance: U256) {
    RESERVE_BALANCE.set(u256_to_f64(balance));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_admission() {}

#[cfg(not(feature = "metrics"))]
pub fn record_exit() {}

#[cfg(not(feature = "metrics"))]
pub fn record_challenge_created() {}

#[cfg(not(feature = "metrics"))]
pub fn record_vote(_choice: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_resolution(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_code: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_reserve_balance(_balance: U256) {}


#[cfg(all(test, feature = "metrics"))]
mod exported_tests {
    use super::*;
    use prometheus::proto::MetricType;

    // Service tests in the same binary touch these globals concurrently, so
    // counters are compared by delta.
    #[test]
    fn test_counters_move() {
        let admissions = ADMISSIONS.get();
        let self_votes = REJECTIONS.with_label_values(&["SELF_VOTE"]).get();

        record_admission();
        record_rejection("SELF_VOTE");

        assert!(ADMISSIONS.get() >= admissions + 1);
        assert!(REJECTIONS.with_label_values(&["SELF_VOTE"]).get() >= self_votes + 1.0);
    }

    #[test]
    fn test_reserve_gauge_exported() {
        set_reserve_balance(U256::from(1_500u64));

        let families = prometheus::gather();
        let reserve = families
            .iter()
            .find(|family| family.get_name() == "tcr_reserve_balance")
            .unwrap();
        assert_eq!(reserve.get_field_type(), MetricType::GAUGE);

        let value = RESERVE_BALANCE.get();
        assert!(value >= 0.0 && value.fract() == 0.0);
    }

    #[test]
    fn test_rejections_labeled_by_code() {
        record_rejection("SELF_VOTE");

        let families = prometheus::gather();
        let rejections = families
            .iter()
            .find(|family| family.get_name() == "tcr_rejections_total")
            .unwrap();
        assert!(rejections.get_metric().iter().any(|metric| metric
            .get_label()
            .iter()
            .any(|label| label.get_name() == "code" && label.get_value() == "SELF_VOTE")));
    }
}
