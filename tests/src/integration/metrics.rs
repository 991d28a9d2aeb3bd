//! # Exported Metrics
//!
//! The registry's Prometheus series as a scraper sees them after real
//! registry traffic.

#[cfg(test)]
mod tests {
    use crate::fixtures::World;
    use tcr_05_token_registry::metrics::{ADMISSIONS, REJECTIONS};
    use tcr_05_token_registry::prelude::*;
    use tcr_telemetry::encode_metrics;

    #[test]
    fn test_registry_traffic_shows_in_exposition() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let admissions = ADMISSIONS.get();
        let self_votes = REJECTIONS.with_label_values(&["SELF_VOTE"]).get();

        let members = world.admit_all(&[1, 2]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        assert!(world
            .registry
            .submit_vote(&sponsor, id, VoteChoice::Yes, &members[1])
            .is_err());

        assert!(ADMISSIONS.get() >= admissions + 2);
        assert!(REJECTIONS.with_label_values(&["SELF_VOTE"]).get() >= self_votes + 1.0);

        let text = encode_metrics().unwrap();
        assert!(text.contains("# TYPE tcr_admissions_total counter"));
        assert!(text.contains("tcr_rejections_total{code=\"SELF_VOTE\"}"));
        assert!(text.contains("# TYPE tcr_reserve_balance gauge"));
        assert!(text.contains("tcr_challenges_created_total"));
    }
}
