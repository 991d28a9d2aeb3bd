//! # Challenge Flows
//!
//! Challenge lifecycle through the public API: deposits, identity-weighted
//! votes, resolution payouts and the rules guarding each step.

#[cfg(test)]
mod tests {
    use crate::fixtures::{key, stakes, World};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::thread;
    use tcr_05_token_registry::prelude::*;
    use tcr_05_token_registry::NO_CHALLENGE;

    #[test]
    fn test_zero_vote_challenge_fails_and_refunds() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2]);
        let (a, b) = (members[0], members[1]);
        let before = world.balance(&sponsor);

        let id = world
            .registry
            .create_challenge(&sponsor, &a, &b, b"no reason".to_vec())
            .unwrap();
        assert_eq!(world.balance(&sponsor), before - stakes(1));
        assert!(world.registry.member_challenge_exists(&b));

        world.close_voting();
        assert_eq!(
            world.registry.resolve_challenge(id),
            Ok(ChallengeOutcome::Failed)
        );
        assert_eq!(world.balance(&sponsor), before);
        assert!(world.registry.is_member(&b));
        assert_eq!(world.registry.challenge_id_of(&b), NO_CHALLENGE);
        assert_eq!(world.registry.reserve_balance(), stakes(2));
    }

    #[test]
    fn test_two_yes_votes_remove_challengee() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3, 4]);
        let (a, b, c, d) = (members[0], members[1], members[2], members[3]);
        let before = world.balance(&sponsor);

        let id = world.registry.create_challenge(&sponsor, &a, &b, Vec::new()).unwrap();
        world.registry.submit_vote(&sponsor, id, VoteChoice::Yes, &c).unwrap();
        world.registry.submit_vote(&sponsor, id, VoteChoice::Yes, &d).unwrap();
        assert!(!world.registry.challenge_can_be_resolved(id));

        world.close_voting();
        assert!(world.registry.challenge_can_be_resolved(id));
        assert_eq!(
            world.registry.resolve_challenge(id),
            Ok(ChallengeOutcome::Succeeded)
        );

        assert!(!world.registry.is_member(&b));
        assert_eq!(world.registry.membership_start_time(&b), 0);
        // deposit back plus the forfeited fee
        assert_eq!(world.balance(&sponsor), before + stakes(1));
        assert_eq!(world.registry.reserve_balance(), stakes(3));
        assert_eq!(world.bank_holdings(), stakes(3));

        let last = world.registry.events().last().unwrap();
        assert!(matches!(
            last,
            RegistryEvent::ChallengeSucceeded { votes_for: 2, votes_against: 0, payout, .. }
                if *payout == stakes(2)
        ));
    }

    #[test]
    fn test_tie_keeps_incumbent() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3, 4]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        world
            .registry
            .submit_votes_batch(
                &sponsor,
                id,
                &[VoteChoice::Yes, VoteChoice::No],
                &[members[2], members[3]],
            )
            .unwrap();

        world.close_voting();
        assert_eq!(
            world.registry.resolve_challenge(id),
            Ok(ChallengeOutcome::Failed)
        );
        assert!(world.registry.is_member(&members[1]));
    }

    #[test]
    fn test_controller_votes_once_per_identity_in_batch() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3, 4, 5, 6]);
        let (challenger, target) = (members[0], members[1]);
        let voters = &members[2..];

        let id = world
            .registry
            .create_challenge(&sponsor, &challenger, &target, Vec::new())
            .unwrap();
        world
            .registry
            .submit_votes_batch(
                &sponsor,
                id,
                &[VoteChoice::Yes, VoteChoice::Yes, VoteChoice::Yes, VoteChoice::No],
                voters,
            )
            .unwrap();

        let challenge = world.registry.challenge(id).unwrap();
        assert_eq!((challenge.votes_for, challenge.votes_against), (3, 1));
        for voter in voters {
            assert_ne!(world.registry.vote_of(id, voter), VoteChoice::Null);
        }

        // another controller cannot vote with identities it does not hold
        let outsider = key(0x77).address();
        assert_eq!(
            world
                .registry
                .submit_vote(&outsider, id, VoteChoice::No, &challenger),
            Err(RegistryError::NotController {
                identity: challenger,
                caller: outsider,
            })
        );
    }

    #[test]
    fn test_batch_length_mismatch_mutates_nothing() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        let events = world.registry.events().len();

        assert_eq!(
            world.registry.submit_votes_batch(
                &sponsor,
                id,
                &[VoteChoice::Yes, VoteChoice::Yes],
                &[members[2]],
            ),
            Err(RegistryError::ArrayLengthMismatch {
                choices: 2,
                voters: 1,
            })
        );
        assert_eq!(world.registry.vote_of(id, &members[2]), VoteChoice::Null);
        assert_eq!(world.registry.events().len(), events);
    }

    #[test]
    fn test_exit_blocked_until_challenge_resolved() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();

        assert_eq!(
            world.registry.exit(&sponsor, &members[1]),
            Err(RegistryError::OngoingChallenge {
                identity: members[1],
                challenge_id: id,
            })
        );
        // still blocked after the window closes, until someone resolves
        world.close_voting();
        assert!(world.registry.exit(&sponsor, &members[1]).is_err());

        world.registry.resolve_challenge(id).unwrap();
        world.registry.exit(&sponsor, &members[1]).unwrap();
        assert!(!world.registry.is_member(&members[1]));
    }

    #[test]
    fn test_double_resolve_rejected() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        world.close_voting();

        world.registry.resolve_challenge(id).unwrap();
        let reserve = world.registry.reserve_balance();
        assert_eq!(
            world.registry.resolve_challenge(id),
            Err(RegistryError::ChallengeAlreadyResolved(id))
        );
        assert!(!world.registry.challenge_can_be_resolved(id));
        assert_eq!(world.registry.reserve_balance(), reserve);
    }

    #[test]
    fn test_self_challenge_and_self_vote_rejected() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2]);

        assert_eq!(
            world
                .registry
                .create_challenge(&sponsor, &members[0], &members[0], Vec::new()),
            Err(RegistryError::SelfChallenge)
        );

        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        assert_eq!(
            world
                .registry
                .submit_vote(&sponsor, id, VoteChoice::No, &members[1]),
            Err(RegistryError::SelfVote {
                challenge_id: id,
                voter: members[1],
            })
        );
    }

    #[test]
    fn test_removed_member_cannot_be_challenged_or_vote() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3, 4]);

        let first = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();
        world
            .registry
            .submit_vote(&sponsor, first, VoteChoice::Yes, &members[2])
            .unwrap();
        world.close_voting();
        world.registry.resolve_challenge(first).unwrap();

        assert_eq!(
            world
                .registry
                .create_challenge(&sponsor, &members[0], &members[1], Vec::new()),
            Err(RegistryError::ChallengeeNotMember(members[1]))
        );

        let second = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[2], Vec::new())
            .unwrap();
        assert_eq!(
            world
                .registry
                .submit_vote(&sponsor, second, VoteChoice::Yes, &members[1]),
            Err(RegistryError::VoterNotMember(members[1]))
        );
    }

    #[test]
    fn test_challenge_without_allowance_fails() {
        let mut world = World::new();
        let members = world.admit_all(&[1, 2]);
        let delegate = key(0x55);
        let delegate_address = delegate.address();
        world.fund(&delegate_address, stakes(5));

        // hand control of the challenger to a controller that never approved the registry
        let nonce = world
            .registry
            .admission_nonces(&members[0], &delegate_address)
            .directory;
        let auth = world
            .signer
            .sign_ownership_transfer(&world.sponsor, &members[0], &delegate_address, nonce)
            .unwrap();
        world
            .registry
            .transfer_member_control(&members[0], &delegate_address, auth)
            .unwrap();

        let err = world
            .registry
            .create_challenge(&delegate_address, &members[0], &members[1], Vec::new())
            .unwrap_err();
        assert_eq!(err.code(), "TRANSFER_FAILED");
        assert!(!world.registry.member_challenge_exists(&members[1]));

        world.approve_registry(&delegate_address);
        world
            .registry
            .create_challenge(&delegate_address, &members[0], &members[1], Vec::new())
            .unwrap();
        assert_eq!(world.balance(&delegate_address), stakes(4));
    }

    #[test]
    fn test_shared_registry_orders_concurrent_votes() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let members = world.admit_all(&[1, 2, 3, 4, 5, 6]);
        let id = world
            .registry
            .create_challenge(&sponsor, &members[0], &members[1], Vec::new())
            .unwrap();

        let shared: SharedTokenRegistry<_, _, _> = Arc::new(Mutex::new(world.registry));
        let handles: Vec<_> = members[2..]
            .iter()
            .copied()
            .map(|voter| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let mut registry = shared.lock();
                    registry.submit_vote(&sponsor, id, VoteChoice::Yes, &voter)
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let registry = shared.lock();
        assert_eq!(registry.challenge(id).unwrap().votes_for, 4);
        let votes = registry
            .events()
            .iter()
            .filter(|e| matches!(e, RegistryEvent::VoteSubmitted { .. }))
            .count();
        assert_eq!(votes, 4);
    }
}
