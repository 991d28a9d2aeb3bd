//! # Reserve Conservation
//!
//! Random operation sequences against a live registry. After every step the
//! reserve ledger equals live fees plus open deposits and matches what the
//! bank actually holds; a rejected step changes neither the ledger nor the
//! event log.

#[cfg(test)]
mod tests {
    use crate::fixtures::{key, World};
    use proptest::prelude::*;
    use tcr_05_token_registry::config::DEFAULT_VOTE_PERIOD_SECS;
    use tcr_05_token_registry::prelude::*;
    use tcr_05_token_registry::NO_CHALLENGE;

    #[derive(Debug, Clone)]
    enum Op {
        Admit(u8),
        Exit(u8),
        Challenge { challenger: u8, challengee: u8 },
        Vote { voter: u8, yes: bool },
        Advance(u64),
        Resolve,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (1u8..=5).prop_map(Op::Admit),
            1 => (1u8..=5).prop_map(Op::Exit),
            2 => (1u8..=5, 1u8..=5).prop_map(|(challenger, challengee)| Op::Challenge {
                challenger,
                challengee,
            }),
            3 => (1u8..=5, any::<bool>()).prop_map(|(voter, yes)| Op::Vote { voter, yes }),
            1 => (0u64..=2 * DEFAULT_VOTE_PERIOD_SECS).prop_map(Op::Advance),
            2 => Just(Op::Resolve),
        ]
    }

    fn apply(world: &mut World, op: &Op, last: &mut ChallengeId) -> RegistryResult<()> {
        let sponsor = world.sponsor_address();
        match op {
            Op::Admit(seed) => {
                let identity = key(*seed).address();
                let request = if world.controller_of(&identity) == identity {
                    world.admission(&key(*seed))
                } else {
                    world.readmission(&identity)
                };
                world.registry.admit_with_authorizations(request).map(|_| ())
            }
            Op::Exit(seed) => world.registry.exit(&sponsor, &key(*seed).address()),
            Op::Challenge {
                challenger,
                challengee,
            } => world
                .registry
                .create_challenge(
                    &sponsor,
                    &key(*challenger).address(),
                    &key(*challengee).address(),
                    Vec::new(),
                )
                .map(|id| *last = id),
            Op::Vote { voter, yes } => {
                let choice = if *yes { VoteChoice::Yes } else { VoteChoice::No };
                world
                    .registry
                    .submit_vote(&sponsor, *last, choice, &key(*voter).address())
            }
            Op::Advance(secs) => {
                world.clock.advance(*secs);
                Ok(())
            }
            Op::Resolve => world.registry.resolve_challenge(*last).map(|_| ()),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn reserve_always_backs_stakes(ops in prop::collection::vec(op(), 1..24)) {
            let mut world = World::new();
            let mut last = NO_CHALLENGE;

            for op in &ops {
                let reserve = world.registry.reserve_balance();
                let events = world.registry.events().len();

                let outcome = apply(&mut world, op, &mut last);

                prop_assert!(world.registry.state().check_conservation().is_ok());
                prop_assert_eq!(world.registry.reserve_balance(), world.bank_holdings());
                if outcome.is_err() {
                    prop_assert_eq!(world.registry.reserve_balance(), reserve);
                    prop_assert_eq!(world.registry.events().len(), events);
                }
            }
        }
    }
}
