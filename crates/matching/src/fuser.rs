//! Match fusion
//!
//! Combines the collected and externally supplied signals into linear and
//! final scores, validates every score contract on the way in, and hands
//! the bundle to the explanation builder.
//!
//! Composition is fully deterministic: no clocks, no randomness, stable
//! iteration everywhere. Two calls with identical inputs produce
//! byte-identical results.

use crate::config::FusionConfig;
use crate::explain::build_explanation;
use crate::signals::{AvailabilitySignal, LocationSignal, RateSignal, SkillSignal};
use staffcore_core::{
    ConsultantId, Error, FactorContribution, LlmVerdict, MatchId, MatchResult, Result,
    RetrievalSignals, ScoreBreakdown, SignalSnapshot,
};

/// Everything compose needs for one consultant/requirement pair
///
/// The four alignment signals come from the collectors; retrieval and ltr
/// are required external signals; `llm` is optional. `llm_degraded` marks
/// the case where an LLM verdict was requested but the provider failed,
/// so the degradation stays visible in the explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSignals {
    /// Identifier for the composed result
    pub match_id: MatchId,
    /// The consultant being scored
    pub consultant_id: ConsultantId,
    /// Skill overlap signal
    pub skill: SkillSignal,
    /// Location alignment signal
    pub location: LocationSignal,
    /// Rate alignment signal
    pub rate: RateSignal,
    /// Availability alignment signal
    pub availability: AvailabilitySignal,
    /// Hybrid retrieval relevance (required)
    pub retrieval: RetrievalSignals,
    /// Learned-rank score (required)
    pub ltr: f64,
    /// LLM rerank verdict, when available
    pub llm: Option<LlmVerdict>,
    /// True when the LLM provider was configured but failed
    pub llm_degraded: bool,
}

fn check_unit(signal: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::ScoreOutOfRange { signal, value })
    }
}

fn validate(signals: &MatchSignals) -> Result<()> {
    check_unit("skill", signals.skill.score)?;
    check_unit("location", signals.location.score)?;
    check_unit("rate", signals.rate.score)?;
    check_unit("availability", signals.availability.score)?;
    check_unit("retrieval.vector", signals.retrieval.vector)?;
    check_unit("retrieval.lexical", signals.retrieval.lexical)?;
    check_unit("ltr", signals.ltr)?;
    if let Some(verdict) = &signals.llm {
        check_unit("llm.score", verdict.score)?;
        check_unit("llm.confidence", verdict.confidence)?;
    }
    Ok(())
}

/// Compose validated signals into a ranked, explainable match result
///
/// - `linear` is the fixed-weight sum of the four alignment components
///   (weights renormalized from configuration)
/// - `final` blends linear, ltr, and llm when present; linear and ltr
///   alone otherwise
/// - contributions, top factors, summary, and highlights are built by the
///   explanation module from the same inputs
///
/// # Errors
///
/// `ScoreOutOfRange` when any score leaves `[0,1]` or is non-finite.
pub fn compose(signals: &MatchSignals, config: &FusionConfig) -> Result<MatchResult> {
    validate(signals)?;

    let weights = config.weights.normalized();
    let factors = [
        ("skill", signals.skill.score, weights.skill),
        ("location", signals.location.score, weights.location),
        ("rate", signals.rate.score, weights.rate),
        ("availability", signals.availability.score, weights.availability),
    ];

    let contributions: Vec<FactorContribution> = factors
        .iter()
        .map(|&(feature, value, weight)| FactorContribution {
            feature: feature.to_string(),
            value,
            weight,
            contribution: value * weight,
        })
        .collect();

    let linear: f64 = contributions.iter().map(|c| c.contribution).sum();
    let llm_score = signals.llm.as_ref().map(|verdict| verdict.score);
    let final_score = config.blend.blend(linear, signals.ltr, llm_score);

    let explanation = build_explanation(signals, &contributions, final_score, config);

    Ok(MatchResult {
        match_id: signals.match_id,
        consultant_id: signals.consultant_id,
        score: final_score,
        scores: ScoreBreakdown {
            linear,
            ltr: signals.ltr,
            final_score,
            llm: llm_score,
        },
        skill_score: signals.skill.score,
        availability_score: signals.availability.score,
        signals: SignalSnapshot::from(signals.retrieval),
        explanation,
    })
}
