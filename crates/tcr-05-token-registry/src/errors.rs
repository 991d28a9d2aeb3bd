//! # Error Types
//!
//! Every rejected registry operation maps to exactly one `RegistryError`
//! variant, each with a stable machine-readable `code()`.

use crate::domain::entities::ChallengeId;
use shared_types::{Address, Timestamp, U256};
use tcr_02_signature_verification::{AuthorizationError, SignatureError};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A signature did not recover to the party entitled to sign.
    #[error("invalid signature: {0}")]
    InvalidSignature(SignatureError),

    /// An authorization carried a stale or future nonce.
    #[error("nonce mismatch for {identity:?}: expected {expected}, presented {presented}")]
    NonceMismatch {
        identity: Address,
        expected: U256,
        presented: U256,
    },

    #[error("{0:?} is already a member")]
    AlreadyMember(Address),

    #[error("{0:?} is not a member")]
    NotMember(Address),

    /// The caller does not control the member identity it acts for.
    #[error("{caller:?} does not control {identity:?}")]
    NotController { identity: Address, caller: Address },

    /// Exit attempted while a challenge is linked to the member.
    #[error("{identity:?} has ongoing challenge {challenge_id}")]
    OngoingChallenge {
        identity: Address,
        challenge_id: ChallengeId,
    },

    #[error("a member cannot challenge itself")]
    SelfChallenge,

    #[error("challenger {0:?} is not a member")]
    ChallengerNotMember(Address),

    #[error("challengee {0:?} is not a member")]
    ChallengeeNotMember(Address),

    /// The challengee already has a challenge inside its voting window.
    #[error("challenge {challenge_id} against {challengee:?} is still in progress")]
    ChallengeInProgress {
        challengee: Address,
        challenge_id: ChallengeId,
    },

    #[error("challenge {0} not found")]
    ChallengeNotFound(ChallengeId),

    #[error("challenge {0} already resolved")]
    ChallengeAlreadyResolved(ChallengeId),

    #[error("{voter:?} cannot vote on challenge {challenge_id} against itself")]
    SelfVote {
        challenge_id: ChallengeId,
        voter: Address,
    },

    #[error("voter {0:?} is not a member")]
    VoterNotMember(Address),

    #[error("{voter:?} already voted on challenge {challenge_id}")]
    AlreadyVoted {
        challenge_id: ChallengeId,
        voter: Address,
    },

    #[error("voting on challenge {challenge_id} closed at {deadline}")]
    VotingExpired {
        challenge_id: ChallengeId,
        deadline: Timestamp,
    },

    /// Only 1 (Yes) and 2 (No) are valid choices.
    #[error("invalid vote choice: {0}")]
    InvalidChoice(u8),

    #[error("array length mismatch: {choices} choices, {voters} voters")]
    ArrayLengthMismatch { choices: usize, voters: usize },

    #[error("challenge {challenge_id} cannot be resolved before {resolvable_after}")]
    NotReadyToResolve {
        challenge_id: ChallengeId,
        resolvable_after: Timestamp,
    },

    /// The asset refused to move funds.
    #[error("transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("permit expired at {expiry}, now {now}")]
    PermitExpired { expiry: U256, now: Timestamp },

    /// Conservation of the reserve was broken; the operation was rolled back.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl RegistryError {
    /// Stable error code for logs and metrics.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature(_) => "INVALID_SIGNATURE",
            Self::NonceMismatch { .. } => "NONCE_MISMATCH",
            Self::AlreadyMember(_) => "ALREADY_MEMBER",
            Self::NotMember(_) => "NOT_MEMBER",
            Self::NotController { .. } => "NOT_CONTROLLER",
            Self::OngoingChallenge { .. } => "ONGOING_CHALLENGE",
            Self::SelfChallenge => "SELF_CHALLENGE",
            Self::ChallengerNotMember(_) => "CHALLENGER_NOT_MEMBER",
            Self::ChallengeeNotMember(_) => "CHALLENGEE_NOT_MEMBER",
            Self::ChallengeInProgress { .. } => "CHALLENGE_IN_PROGRESS",
            Self::ChallengeNotFound(_) => "CHALLENGE_NOT_FOUND",
            Self::ChallengeAlreadyResolved(_) => "CHALLENGE_ALREADY_RESOLVED",
            Self::SelfVote { .. } => "SELF_VOTE",
            Self::VoterNotMember(_) => "VOTER_NOT_MEMBER",
            Self::AlreadyVoted { .. } => "ALREADY_VOTED",
            Self::VotingExpired { .. } => "VOTING_EXPIRED",
            Self::InvalidChoice(_) => "INVALID_CHOICE",
            Self::ArrayLengthMismatch { .. } => "ARRAY_LENGTH_MISMATCH",
            Self::NotReadyToResolve { .. } => "NOT_READY_TO_RESOLVE",
            Self::TransferFailed { .. } => "TRANSFER_FAILED",
            Self::PermitExpired { .. } => "PERMIT_EXPIRED",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}

impl From<AuthorizationError> for RegistryError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::InvalidSignature(cause) => Self::InvalidSignature(cause),
            AuthorizationError::NonceMismatch {
                identity,
                expected,
                presented,
            } => Self::NonceMismatch {
                identity,
                expected,
                presented,
            },
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// A JSON document could not be decoded.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}
