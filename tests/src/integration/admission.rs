//! # Admission Flows
//!
//! Signed admission end to end: permit, fee pull, attribute write and
//! ownership transfer in one atomic step, and the ways it can be refused.

#[cfg(test)]
mod tests {
    use crate::fixtures::{key, member_data, stakes, World, GENESIS};
    use shared_types::U256;
    use tcr_01_typed_data::PermitMessage;
    use tcr_05_token_registry::prelude::*;
    use tcr_05_token_registry::{
        Clock, IdentityDirectory, SignedPermit, TransferableAsset, NO_CHALLENGE,
    };

    #[test]
    fn test_admission_moves_fee_and_control() {
        let mut world = World::new();
        let applicant = key(1);
        let payer = world.payer.address();

        let identity = world.admit(1);

        assert_eq!(identity, applicant.address());
        assert!(world.registry.is_member(&identity));
        assert_eq!(world.registry.membership_start_time(&identity), GENESIS);
        assert_eq!(world.controller_of(&identity), world.sponsor_address());
        assert_eq!(
            world.registry.member(&identity).unwrap().controller,
            world.sponsor_address()
        );

        assert_eq!(world.balance(&payer), stakes(999));
        assert_eq!(world.bank_holdings(), stakes(1));
        assert_eq!(world.registry.reserve_balance(), stakes(1));
        assert_eq!(world.registry.asset().nonces(&payer), U256::one());
        assert_eq!(
            world.registry.directory().attribute(&identity, &member_data("").name),
            Some(b"applicant".to_vec())
        );

        let events = world.registry.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            RegistryEvent::NewMember { identity: id, fee_payer, .. }
                if *id == identity && *fee_payer == payer
        ));
    }

    #[test]
    fn test_permit_from_wrong_key_rejected_without_side_effects() {
        let mut world = World::new();
        let mut request = world.admission(&key(1));
        let forged = world.signer.sign_permit(&key(9), U256::zero()).unwrap();
        request.permit.signature = forged.signature;

        let err = world.registry.admit_with_authorizations(request).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSignature(_)));
        assert_eq!(err.code(), "INVALID_SIGNATURE");

        let identity = key(1).address();
        assert!(!world.registry.is_member(&identity));
        assert_eq!(world.controller_of(&identity), identity);
        assert_eq!(world.registry.directory().current_nonce(&identity), U256::zero());
        assert_eq!(world.registry.reserve_balance(), U256::zero());
        assert_eq!(world.bank_holdings(), U256::zero());
        assert!(world.registry.events().is_empty());
    }

    #[test]
    fn test_expired_permit_rejected() {
        let mut world = World::new();
        let mut request = world.admission(&key(1));

        let message = PermitMessage {
            holder: world.payer.address(),
            spender: world.registry.config().registry_address,
            nonce: U256::zero(),
            expiry: U256::from(GENESIS - 1),
            allowed: true,
        };
        let signature = world
            .payer
            .sign_digest(&world.signer.digests().permit(&message))
            .unwrap();
        request.permit = SignedPermit {
            holder: message.holder,
            nonce: message.nonce,
            expiry: message.expiry,
            allowed: message.allowed,
            signature,
        };

        assert_eq!(
            world.registry.admit_with_authorizations(request),
            Err(RegistryError::PermitExpired {
                expiry: U256::from(GENESIS - 1),
                now: GENESIS,
            })
        );
    }

    #[test]
    fn test_unfunded_payer_rolls_back_permit() {
        let mut world = World::new();
        let broke = key(0x42);
        let identity = key(1);
        let nonces = world
            .registry
            .admission_nonces(&identity.address(), &broke.address());
        let request = world
            .signer
            .sign_admission(
                &identity,
                &broke,
                world.sponsor_address(),
                &member_data("x"),
                nonces,
            )
            .unwrap();

        let err = world.registry.admit_with_authorizations(request).unwrap_err();
        assert_eq!(err.code(), "TRANSFER_FAILED");
        // the permit ran before the fee pull failed, and was rolled back with it
        assert_eq!(world.registry.asset().nonces(&broke.address()), U256::zero());
        assert_eq!(
            world
                .registry
                .asset()
                .allowance(&broke.address(), &world.registry.config().registry_address),
            U256::zero()
        );
    }

    #[test]
    fn test_replayed_admission_rejected_after_exit() {
        let mut world = World::new();
        let request = world.admission(&key(1));
        let identity = world
            .registry
            .admit_with_authorizations(request.clone())
            .unwrap();

        let sponsor = world.sponsor_address();
        world.registry.exit(&sponsor, &identity).unwrap();
        assert!(!world.registry.is_member(&identity));

        let err = world.registry.admit_with_authorizations(request).unwrap_err();
        assert!(matches!(err, RegistryError::NonceMismatch { .. }));
        assert!(!world.registry.is_member(&identity));
    }

    #[test]
    fn test_reapply_after_removal() {
        let mut world = World::new();
        let sponsor = world.sponsor_address();
        let challenger = world.admit(1);
        let target = world.admit(2);
        let voter = world.admit(3);

        let id = world
            .registry
            .create_challenge(&sponsor, &challenger, &target, b"inactive".to_vec())
            .unwrap();
        world
            .registry
            .submit_vote(&sponsor, id, VoteChoice::Yes, &voter)
            .unwrap();
        world.close_voting();
        assert_eq!(
            world.registry.resolve_challenge(id),
            Ok(ChallengeOutcome::Succeeded)
        );
        assert!(!world.registry.is_member(&target));

        // control stayed with the sponsor, so the sponsor signs the re-application
        let request = world.readmission(&target);
        world.registry.admit_with_authorizations(request).unwrap();

        let member = world.registry.member(&target).unwrap();
        assert_eq!(member.current_challenge_id, NO_CHALLENGE);
        assert_eq!(member.membership_start_time, world.clock.now());
        assert!(member.membership_start_time > GENESIS);
        assert_eq!(
            world.registry.directory().attribute(&target, &member_data("").name),
            Some(b"returning".to_vec())
        );
        assert_eq!(world.registry.reserve_balance(), stakes(3));
        assert_eq!(world.bank_holdings(), stakes(3));
    }

    #[test]
    fn test_event_log_serializes() {
        let mut world = World::new();
        world.admit(1);
        let json = serde_json::to_value(world.registry.events()).unwrap();
        assert_eq!(json[0]["type"], "NewMember");
        assert_eq!(
            json[0]["identity"],
            format!("0x{}", hex::encode(key(1).address().as_bytes()))
        );
    }
}
