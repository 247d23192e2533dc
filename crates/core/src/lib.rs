//! Core types and traits for staffcore
//!
//! This crate defines the foundational types used throughout the engine:
//! - TenantId / ConsultantId / RequirementId / MatchId: identifier newtypes
//! - SignatureType / SignatureKey / IdentitySignature: identity signature model
//! - DuplicateMatch / DuplicateCluster: derived duplicate views
//! - MatchResult / MatchExplanation: derived match views
//! - ConsultantProfile / RequirementProfile: alignment inputs
//! - Error: error type hierarchy
//! - Ports: abstract contracts for the signature store, directories, and
//!   external signal providers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod match_types;
pub mod ports;
pub mod profile;
pub mod signature;
pub mod types;

pub use error::{Error, Result};
pub use match_types::{
    AvailabilityDelta, FactorContribution, LlmVerdict, LocationDelta, LocationStatus,
    MatchDeltas, MatchExplanation, MatchResult, RateDelta, RetrievalSignals, ScoreBreakdown,
    SignalSnapshot,
};
pub use ports::{
    ConsultantDirectory, LlmRerankProvider, ProfileDirectory, RankFeatures, RankProvider,
    RetrievalProvider, SignatureGroup, SignatureStore,
};
pub use profile::{
    Availability, ConsultantProfile, Location, RateBand, RequirementProfile, Urgency,
    WeightedSkill,
};
pub use signature::{
    DuplicateCluster, DuplicateMatch, IdentitySignature, SignatureKey, SignatureType,
};
pub use types::{ConsultantId, ConsultantRecord, ConsultantSummary, MatchId, RequirementId, TenantId};
