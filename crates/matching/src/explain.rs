//! Match explanation building
//!
//! Turns the composed signals into the structured explanation callers
//! render: a one-sentence summary, per-factor contributions, top factor
//! labels, evidence highlights, the verbatim deltas, and the open facts
//! map. Everything here is string assembly over already-validated inputs;
//! output is deterministic for identical inputs.

use crate::config::FusionConfig;
use crate::fuser::MatchSignals;
use staffcore_core::match_types::fact_keys;
use staffcore_core::{
    FactorContribution, LocationStatus, MatchDeltas, MatchExplanation,
};
use std::collections::BTreeMap;

/// Human-facing label for a factor feature name
fn factor_label(feature: &str) -> &'static str {
    match feature {
        "skill" => "skill alignment",
        "location" => "location fit",
        "rate" => "rate fit",
        "availability" => "availability",
        _ => "alignment",
    }
}

/// Build the explanation for one composed match
///
/// `contributions` arrives in fixed factor order from the fuser; sorting
/// for top factors and highlights happens here with a stable sort, so ties
/// keep the fixed order.
pub(crate) fn build_explanation(
    signals: &MatchSignals,
    contributions: &[FactorContribution],
    final_score: f64,
    config: &FusionConfig,
) -> MatchExplanation {
    let mut ranked: Vec<&FactorContribution> = contributions.iter().collect();
    ranked.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_factors: Vec<String> = ranked
        .iter()
        .take(config.top_factor_count)
        .map(|c| c.feature.clone())
        .collect();

    MatchExplanation {
        summary: build_summary(&ranked, final_score),
        aligned_skills: signals.skill.aligned_skills.clone(),
        contributions: contributions.to_vec(),
        top_factors,
        deltas: MatchDeltas {
            location: signals.location.delta.clone(),
            rate: signals.rate.delta,
            availability: signals.availability.delta.clone(),
        },
        highlights: build_highlights(signals, &ranked, config.highlight_limit),
        facts: build_facts(signals),
    }
}

fn score_tier(final_score: f64) -> &'static str {
    if final_score >= 0.75 {
        "Strong match"
    } else if final_score >= 0.5 {
        "Good match"
    } else if final_score >= 0.3 {
        "Possible match"
    } else {
        "Weak match"
    }
}

fn build_summary(ranked: &[&FactorContribution], final_score: f64) -> String {
    let leading: Vec<&str> = ranked
        .iter()
        .filter(|c| c.contribution > 0.0)
        .take(2)
        .map(|c| factor_label(&c.feature))
        .collect();

    match leading.as_slice() {
        [] => format!("{} with no strong alignment signals.", score_tier(final_score)),
        [only] => format!("{}, led by {}.", score_tier(final_score), only),
        [first, second] => format!(
            "{}, led by {} and {}.",
            score_tier(final_score),
            first,
            second
        ),
        _ => unreachable!("take(2) yields at most two factors"),
    }
}

fn build_highlights(
    signals: &MatchSignals,
    ranked: &[&FactorContribution],
    limit: usize,
) -> Vec<String> {
    let mut highlights: Vec<String> = Vec::new();
    for entry in ranked {
        if highlights.len() == limit {
            break;
        }
        let text = match entry.feature.as_str() {
            "skill" => skill_highlight(signals),
            "location" => location_highlight(signals),
            "rate" => rate_highlight(signals),
            "availability" => availability_highlight(signals),
            _ => None,
        };
        if let Some(text) = text {
            highlights.push(text);
        }
    }
    highlights
}

fn skill_highlight(signals: &MatchSignals) -> Option<String> {
    let aligned = &signals.skill.aligned_skills;
    if aligned.is_empty() {
        return None;
    }
    let shown = aligned.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    Some(format!(
        "Matches {} of {} required skills: {}",
        aligned.len(),
        signals.skill.required_skill_count,
        shown
    ))
}

fn location_highlight(signals: &MatchSignals) -> Option<String> {
    match signals.location.delta.status {
        LocationStatus::Match => Some(match &signals.location.delta.requirement {
            Some(location) => format!("Based in {location}, matching the requirement"),
            None => "Location matches the requirement".to_string(),
        }),
        LocationStatus::RemoteOk => {
            Some("Remote-ready for a remote-friendly requirement".to_string())
        }
        LocationStatus::Nearby => Some("In the same region as the requirement".to_string()),
        LocationStatus::Mismatch => None,
    }
}

fn rate_highlight(signals: &MatchSignals) -> Option<String> {
    let delta = &signals.rate.delta;
    if !delta.known {
        return None;
    }
    if delta.within_range {
        return Some("Rate within the requirement band".to_string());
    }
    let pct = delta.delta_pct?;
    if signals.rate.score <= 0.0 {
        return None;
    }
    let direction = if pct > 0.0 { "above" } else { "below" };
    Some(format!(
        "Rate {:.0}% {} the requirement band",
        pct.abs(),
        direction
    ))
}

fn availability_highlight(signals: &MatchSignals) -> Option<String> {
    if signals.availability.score > 0.0 {
        Some(signals.availability.delta.description.clone())
    } else {
        None
    }
}

fn build_facts(signals: &MatchSignals) -> BTreeMap<String, serde_json::Value> {
    let mut facts = BTreeMap::new();
    facts.insert(
        fact_keys::ALIGNED_SKILL_COUNT.to_string(),
        serde_json::Value::from(signals.skill.aligned_skills.len() as u64),
    );
    facts.insert(
        fact_keys::REQUIRED_SKILL_COUNT.to_string(),
        serde_json::Value::from(signals.skill.required_skill_count as u64),
    );
    facts.insert(
        fact_keys::RETRIEVAL_VECTOR.to_string(),
        serde_json::Value::from(signals.retrieval.vector),
    );
    facts.insert(
        fact_keys::RETRIEVAL_LEXICAL.to_string(),
        serde_json::Value::from(signals.retrieval.lexical),
    );
    if let Some(verdict) = &signals.llm {
        facts.insert(
            fact_keys::LLM_PROVIDER.to_string(),
            serde_json::Value::from(verdict.provider.clone()),
        );
        facts.insert(
            fact_keys::LLM_CONFIDENCE.to_string(),
            serde_json::Value::from(verdict.confidence),
        );
        facts.insert(
            fact_keys::LLM_GROUNDED.to_string(),
            serde_json::Value::from(verdict.grounded),
        );
    }
    if signals.llm_degraded {
        facts.insert(fact_keys::DEGRADED.to_string(), serde_json::Value::from(true));
    }
    facts
}
