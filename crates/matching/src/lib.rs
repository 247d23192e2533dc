//! Match scoring for staffcore
//!
//! This crate implements the match half of the engine:
//! - signals: per-pair alignment signals (skill, location, rate, availability)
//! - config: fusion and blend weight configuration
//! - fuser: deterministic weighted fusion into linear/final scores
//! - explain: structured, human-readable explanation building
//! - pipeline: orchestration over the external signal providers
//!
//! Composition is pure: given identical signal inputs the output is
//! byte-identical. All state lives behind the provider ports.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod explain;
pub mod fuser;
pub mod pipeline;
pub mod signals;

pub use config::{BlendWeights, FusionConfig, FusionWeights};
pub use fuser::{compose, MatchSignals};
pub use pipeline::MatchPipeline;
pub use signals::{
    availability_alignment, location_alignment, rate_alignment, skill_alignment,
    AvailabilitySignal, LocationSignal, RateSignal, SkillSignal,
};
