//! Derived match result and explanation types
//!
//! This module defines:
//! - RetrievalSignals / LlmVerdict: externally supplied signals
//! - ScoreBreakdown / SignalSnapshot: score surfaces of a MatchResult
//! - FactorContribution / MatchDeltas / MatchExplanation: explanation model
//! - MatchResult: the fully composed, request-owned match view
//!
//! Every numeric field is within `[0,1]` except raw rate deltas and counts.
//! All types are plain data; composition logic lives in `staffcore-matching`.

use crate::profile::Availability;
use crate::types::{ConsultantId, MatchId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recognized keys of the open `facts` map on [`MatchExplanation`]
///
/// The map is open so producers can attach context without schema changes,
/// but every key the engine itself writes is named here.
pub mod fact_keys {
    /// Number of requirement skills the consultant matched (u64)
    pub const ALIGNED_SKILL_COUNT: &str = "aligned_skill_count";
    /// Number of skills the requirement asked for (u64)
    pub const REQUIRED_SKILL_COUNT: &str = "required_skill_count";
    /// Vector-side retrieval relevance (f64)
    pub const RETRIEVAL_VECTOR: &str = "retrieval_vector";
    /// Lexical-side retrieval relevance (f64)
    pub const RETRIEVAL_LEXICAL: &str = "retrieval_lexical";
    /// LLM provider label (string), present only when the verdict was used
    pub const LLM_PROVIDER: &str = "llm_provider";
    /// LLM self-reported confidence (f64)
    pub const LLM_CONFIDENCE: &str = "llm_confidence";
    /// Whether the LLM verdict was grounded in supplied context (bool)
    pub const LLM_GROUNDED: &str = "llm_grounded";
    /// True when the LLM signal was requested but unavailable (bool)
    pub const DEGRADED: &str = "degraded";
}

/// Hybrid retrieval relevance for one consultant/requirement pair
///
/// Both components are in `[0,1]`. `combined()` is the single retrieval
/// figure surfaced in `SignalSnapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetrievalSignals {
    /// Vector (semantic) relevance
    pub vector: f64,
    /// Lexical (keyword) relevance
    pub lexical: f64,
}

impl RetrievalSignals {
    /// Create new retrieval signals
    pub fn new(vector: f64, lexical: f64) -> Self {
        RetrievalSignals { vector, lexical }
    }

    /// Mean of the vector and lexical components
    pub fn combined(&self) -> f64 {
        (self.vector + self.lexical) / 2.0
    }
}

/// Verdict returned by the optional LLM rerank provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmVerdict {
    /// Rerank score in `[0,1]`
    pub score: f64,
    /// Provider self-reported confidence in `[0,1]`
    pub confidence: f64,
    /// Whether the verdict was grounded in the supplied context
    pub grounded: bool,
    /// Provider label, e.g. "gpt-4o-mini"
    pub provider: String,
}

/// Score surfaces of a composed match
///
/// `llm` is absent (not zero) when the LLM signal was unavailable, so
/// degraded composition stays visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Fixed-weight sum of the four alignment components
    pub linear: f64,
    /// Learned-rank score, as supplied
    pub ltr: f64,
    /// Blend of linear, ltr, and llm (when present)
    #[serde(rename = "final")]
    pub final_score: f64,
    /// LLM rerank score, when the provider answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<f64>,
}

/// Raw retrieval figures carried on the match result for transparency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    /// Combined retrieval relevance
    pub retrieval: f64,
    /// Vector-side relevance
    pub vector: f64,
    /// Lexical-side relevance
    pub lexical: f64,
}

impl From<RetrievalSignals> for SignalSnapshot {
    fn from(signals: RetrievalSignals) -> Self {
        SignalSnapshot {
            retrieval: signals.combined(),
            vector: signals.vector,
            lexical: signals.lexical,
        }
    }
}

/// How a consultant's location relates to a requirement's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    /// Same canonical city
    Match,
    /// Requirement accepts remote and the consultant works remotely
    RemoteOk,
    /// Same region/metro, different city
    Nearby,
    /// None of the above
    Mismatch,
}

impl LocationStatus {
    /// Fixed score tier for this status
    pub fn score(&self) -> f64 {
        match self {
            LocationStatus::Match => 1.0,
            LocationStatus::RemoteOk => 0.75,
            LocationStatus::Nearby => 0.6,
            LocationStatus::Mismatch => 0.0,
        }
    }
}

/// Structured location comparison, rendered verbatim by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDelta {
    /// Classification outcome
    pub status: LocationStatus,
    /// Requirement location as text, when stated
    pub requirement: Option<String>,
    /// Consultant location as text, when known
    pub consultant: Option<String>,
}

/// Structured rate comparison, rendered verbatim by callers
///
/// `delta_pct` is a signed percentage relative to the nearest band bound
/// (negative = below the band) and is the one numeric explanation field
/// allowed outside `[0,1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateDelta {
    /// False when the consultant rate is unset (delta unknown)
    pub known: bool,
    /// Whether the rate falls inside the requirement band
    pub within_range: bool,
    /// Signed percentage distance from the nearest band bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_pct: Option<f64>,
}

impl RateDelta {
    /// Delta for a consultant with no stated rate
    pub fn unknown() -> Self {
        RateDelta {
            known: false,
            within_range: false,
            delta_pct: None,
        }
    }
}

/// Structured availability descriptor, rendered verbatim by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityDelta {
    /// Consultant availability state
    pub status: Availability,
    /// Human-readable description, always present even at score 0
    pub description: String,
}

/// One scored factor with its weight and resulting contribution
///
/// Invariant: `contribution = value * weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// Factor label, e.g. "skill"
    pub feature: String,
    /// Normalized factor value in `[0,1]`
    pub value: f64,
    /// Configured weight in `[0,1]`
    pub weight: f64,
    /// `value * weight`
    pub contribution: f64,
}

/// The three structured deltas surfaced for transparent UI rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDeltas {
    /// Location comparison
    pub location: LocationDelta,
    /// Rate comparison
    pub rate: RateDelta,
    /// Availability descriptor
    pub availability: AvailabilityDelta,
}

/// Structured, human-readable breakdown of how a match score was derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    /// Single-sentence synthesis referencing the top factors
    pub summary: String,
    /// Requirement skills the consultant matched, in requirement order
    pub aligned_skills: Vec<String>,
    /// One entry per scored factor
    pub contributions: Vec<FactorContribution>,
    /// Labels of the strongest factors, highest contribution first
    pub top_factors: Vec<String>,
    /// Structured deltas from the signal collectors, verbatim
    pub deltas: MatchDeltas,
    /// Short evidence bullets, at most three
    pub highlights: Vec<String>,
    /// Open key-value context; recognized keys in [`fact_keys`]
    pub facts: BTreeMap<String, serde_json::Value>,
}

/// A fully composed, explainable match result
///
/// Owned by the request that computed it; never cached or shared inside
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier for this composed result
    pub match_id: MatchId,
    /// The matched consultant
    pub consultant_id: ConsultantId,
    /// Convenience copy of `scores.final`
    pub score: f64,
    /// Score surfaces
    pub scores: ScoreBreakdown,
    /// Skill alignment component
    pub skill_score: f64,
    /// Availability alignment component
    pub availability_score: f64,
    /// Raw retrieval figures
    pub signals: SignalSnapshot,
    /// Human-readable breakdown
    pub explanation: MatchExplanation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_combined_is_mean() {
        let signals = RetrievalSignals::new(0.8, 0.4);
        assert!((signals.combined() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_score_breakdown_serde_renames_final() {
        let scores = ScoreBreakdown {
            linear: 0.5,
            ltr: 0.6,
            final_score: 0.55,
            llm: None,
        };
        let json = serde_json::to_value(&scores).unwrap();
        assert!(json.get("final").is_some());
        assert!(json.get("final_score").is_none());
    }

    #[test]
    fn test_score_breakdown_omits_absent_llm() {
        let scores = ScoreBreakdown {
            linear: 0.5,
            ltr: 0.6,
            final_score: 0.55,
            llm: None,
        };
        let json = serde_json::to_value(&scores).unwrap();
        assert!(json.get("llm").is_none());

        let with_llm = ScoreBreakdown { llm: Some(0.7), ..scores };
        let json = serde_json::to_value(&with_llm).unwrap();
        assert_eq!(json.get("llm").and_then(|v| v.as_f64()), Some(0.7));
    }

    #[test]
    fn test_location_status_tiers() {
        assert_eq!(LocationStatus::Match.score(), 1.0);
        assert_eq!(LocationStatus::Mismatch.score(), 0.0);
        assert!(LocationStatus::RemoteOk.score() > LocationStatus::Nearby.score());
    }

    #[test]
    fn test_signal_snapshot_from_retrieval() {
        let snapshot = SignalSnapshot::from(RetrievalSignals::new(1.0, 0.0));
        assert_eq!(snapshot.vector, 1.0);
        assert_eq!(snapshot.lexical, 0.0);
        assert_eq!(snapshot.retrieval, 0.5);
    }

    #[test]
    fn test_rate_delta_unknown() {
        let delta = RateDelta::unknown();
        assert!(!delta.known);
        assert!(!delta.within_range);
        assert!(delta.delta_pct.is_none());
    }
}
