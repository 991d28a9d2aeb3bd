//! # Fixtures
//!
//! A registry world on a manual clock: one sponsor controlling every admitted
//! identity, one fee payer funding admissions, deterministic keys `[seed; 32]`.

use shared_types::{Address, Timestamp, U256};
use tcr_01_typed_data::attribute_name;
use tcr_02_signature_verification::Secp256k1Signer;
use tcr_05_token_registry::prelude::*;
use tcr_05_token_registry::{AdmissionRequest, IdentityDirectory, TransferableAsset};

pub const DIRECTORY: Address = Address::new([0xD1; 20]);
pub const GENESIS: Timestamp = 1_600_000_000;
pub const SPONSOR_SEED: u8 = 0xA0;
pub const PAYER_SEED: u8 = 0xB0;

/// Deterministic signer; `seed` must be non-zero.
pub fn key(seed: u8) -> Secp256k1Signer {
    Secp256k1Signer::from_bytes(&[seed; 32]).expect("non-zero seed is a valid scalar")
}

/// `n` admission fees at the default stake.
pub fn stakes(n: u64) -> U256 {
    tcr_05_token_registry::config::default_stake() * U256::from(n)
}

pub fn member_data(value: &str) -> MemberData {
    MemberData {
        name: attribute_name("name").expect("short attribute name"),
        value: value.as_bytes().to_vec(),
        validity: U256::from(365u32 * 86_400),
    }
}

pub struct World {
    pub registry: InMemoryTokenRegistry<ManualClock>,
    pub clock: ManualClock,
    pub signer: AdmissionSigner,
    pub sponsor: Secp256k1Signer,
    pub payer: Secp256k1Signer,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        tcr_telemetry::init_test_tracing();
        let token = TokenDomain::default();
        let clock = ManualClock::new(GENESIS);
        let registry =
            InMemoryTokenRegistry::in_memory(config.clone(), &token, DIRECTORY, clock.clone())
                .expect("valid registry config");

        let mut world = Self {
            registry,
            clock,
            signer: AdmissionSigner::for_registry(&config, DIRECTORY, &token),
            sponsor: key(SPONSOR_SEED),
            payer: key(PAYER_SEED),
        };
        world.fund(&world.payer.address(), stakes(1_000));
        world.fund(&world.sponsor.address(), stakes(100));
        world.approve_registry(&world.sponsor.address());
        world
    }

    pub fn sponsor_address(&self) -> Address {
        self.sponsor.address()
    }

    pub fn fund(&mut self, holder: &Address, amount: U256) {
        self.registry
            .asset_mut()
            .inner_mut()
            .mint(holder, amount)
            .expect("mint within supply");
    }

    /// Unlimited allowance from `holder` to the registry, for challenge deposits.
    pub fn approve_registry(&mut self, holder: &Address) {
        let spender = self.registry.config().registry_address;
        self.registry
            .asset_mut()
            .inner_mut()
            .approve(holder, &spender, U256::MAX);
    }

    /// Admission of a self-controlled identity, paid by the world's payer.
    pub fn admission(&self, identity: &Secp256k1Signer) -> AdmissionRequest {
        let nonces = self
            .registry
            .admission_nonces(&identity.address(), &self.payer.address());
        self.signer
            .sign_admission(
                identity,
                &self.payer,
                self.sponsor.address(),
                &member_data("applicant"),
                nonces,
            )
            .expect("signing with a valid key")
    }

    /// Re-admission of an identity the sponsor already controls.
    pub fn readmission(&self, identity: &Address) -> AdmissionRequest {
        let nonces = self
            .registry
            .admission_nonces(identity, &self.payer.address());
        let sponsor = self.sponsor.address();
        let attribute = self
            .signer
            .sign_attribute(&self.sponsor, identity, &member_data("returning"), nonces.directory)
            .expect("signing with a valid key");
        let ownership = self
            .signer
            .sign_ownership_transfer(
                &self.sponsor,
                identity,
                &sponsor,
                nonces.directory + U256::one(),
            )
            .expect("signing with a valid key");
        let permit = self
            .signer
            .sign_permit(&self.payer, nonces.permit)
            .expect("signing with a valid key");
        AdmissionRequest {
            identity: *identity,
            sponsor,
            attribute,
            ownership,
            permit,
        }
    }

    pub fn admit(&mut self, seed: u8) -> Address {
        let request = self.admission(&key(seed));
        self.registry
            .admit_with_authorizations(request)
            .expect("admission succeeds")
    }

    pub fn admit_all(&mut self, seeds: &[u8]) -> Vec<Address> {
        seeds.iter().map(|seed| self.admit(*seed)).collect()
    }

    pub fn balance(&self, holder: &Address) -> U256 {
        self.registry.asset().balance_of(holder)
    }

    pub fn bank_holdings(&self) -> U256 {
        self.balance(&self.registry.config().reserve_bank_address)
    }

    pub fn controller_of(&self, identity: &Address) -> Address {
        self.registry.directory().current_controller(identity)
    }

    /// Move the clock just past the voting window of a challenge opened now.
    pub fn close_voting(&self) {
        self.clock
            .advance(self.registry.config().vote_period_secs + 1);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
