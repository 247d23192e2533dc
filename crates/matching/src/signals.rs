//! Per-pair alignment signal collectors
//!
//! Four base signals, each normalized to `[0,1]`:
//! - skill: weighted Jaccard overlap over matched skill names
//! - location: fixed score tier per classification status
//! - rate: band membership with linear decay outside the band
//! - availability: fixed matrix of availability vs requirement urgency
//!
//! All collectors are pure functions over profile data; the externally
//! supplied signals (retrieval, ltr, llm) never pass through here.

use staffcore_core::{
    Availability, AvailabilityDelta, Location, LocationDelta, LocationStatus, RateBand, RateDelta,
    Urgency, WeightedSkill,
};
use std::collections::HashMap;

/// Skill overlap between a requirement and a consultant
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSignal {
    /// Weighted Jaccard overlap in `[0,1]`
    pub score: f64,
    /// Matched requirement skills, in requirement order, display casing
    pub aligned_skills: Vec<String>,
    /// Number of skills the requirement asked for
    pub required_skill_count: usize,
}

/// Location alignment classification with its score tier
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSignal {
    /// Tier score for the classification status
    pub score: f64,
    /// Structured delta for explanation rendering
    pub delta: LocationDelta,
}

/// Rate alignment against the requirement band
#[derive(Debug, Clone, PartialEq)]
pub struct RateSignal {
    /// Band score in `[0,1]`; neutral 0.5 when the rate is unknown
    pub score: f64,
    /// Structured delta for explanation rendering
    pub delta: RateDelta,
}

/// Availability alignment against the requirement urgency
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySignal {
    /// Matrix score in `[0,1]`
    pub score: f64,
    /// Structured descriptor for explanation rendering
    pub delta: AvailabilityDelta,
}

/// Neutral rate score when the consultant rate or band is unknown
const NEUTRAL_RATE_SCORE: f64 = 0.5;

/// Weighted Jaccard overlap over skill names
///
/// `sum(min(w_req, w_cons)) / sum(max(w_req, w_cons))` over the union of
/// canonical skill names. A consultant sharing no requirement skill scores
/// zero. Matched requirement skill names are captured in requirement order
/// with the requirement's display casing.
pub fn skill_alignment(requirement: &[WeightedSkill], consultant: &[WeightedSkill]) -> SkillSignal {
    // Fold duplicate entries by keeping the highest weight; negative
    // weights are treated as zero
    let fold = |skills: &[WeightedSkill]| -> HashMap<String, f64> {
        let mut map: HashMap<String, f64> = HashMap::new();
        for skill in skills {
            let weight = skill.weight.max(0.0);
            let entry = map.entry(skill.canonical_name()).or_insert(0.0);
            if weight > *entry {
                *entry = weight;
            }
        }
        map
    };
    let req_weights = fold(requirement);
    let cons_weights = fold(consultant);

    let mut min_sum = 0.0;
    let mut max_sum = 0.0;
    for (name, &rw) in &req_weights {
        let cw = cons_weights.get(name).copied().unwrap_or(0.0);
        min_sum += rw.min(cw);
        max_sum += rw.max(cw);
    }
    for (name, &cw) in &cons_weights {
        if !req_weights.contains_key(name) {
            max_sum += cw;
        }
    }

    let score = if max_sum > 0.0 { min_sum / max_sum } else { 0.0 };

    let mut seen: Vec<String> = Vec::new();
    let aligned_skills: Vec<String> = requirement
        .iter()
        .filter(|skill| {
            let canonical = skill.canonical_name();
            let matched = cons_weights.get(&canonical).copied().unwrap_or(0.0) > 0.0;
            matched && !seen.contains(&canonical) && {
                seen.push(canonical);
                true
            }
        })
        .map(|skill| skill.name.trim().to_string())
        .collect();

    SkillSignal {
        score,
        aligned_skills,
        required_skill_count: req_weights.len(),
    }
}

/// Classify location alignment and map it to its fixed score tier
///
/// Classification precedence: same canonical city, then remote/remote,
/// then same region, else mismatch.
pub fn location_alignment(
    requirement: Option<&Location>,
    remote_ok: bool,
    consultant: Option<&Location>,
    remote_available: bool,
) -> LocationSignal {
    let status = classify_location(requirement, remote_ok, consultant, remote_available);
    LocationSignal {
        score: status.score(),
        delta: LocationDelta {
            status,
            requirement: requirement.map(|loc| loc.to_string()),
            consultant: consultant.map(|loc| loc.to_string()),
        },
    }
}

fn classify_location(
    requirement: Option<&Location>,
    remote_ok: bool,
    consultant: Option<&Location>,
    remote_available: bool,
) -> LocationStatus {
    if let (Some(req), Some(cons)) = (requirement, consultant) {
        if req.canonical_city() == cons.canonical_city() {
            return LocationStatus::Match;
        }
    }
    if remote_ok && remote_available {
        return LocationStatus::RemoteOk;
    }
    if let (Some(req), Some(cons)) = (requirement, consultant) {
        if let (Some(req_region), Some(cons_region)) =
            (req.canonical_region(), cons.canonical_region())
        {
            if req_region == cons_region {
                return LocationStatus::Nearby;
            }
        }
    }
    LocationStatus::Mismatch
}

/// Score a consultant rate against the requirement band
///
/// Unknown rate (or a requirement with no stated band) scores a neutral
/// 0.5 with an unknown delta. Inside the band scores 1.0 with a zero
/// delta. Outside, the score decays linearly with the relative distance
/// from the nearest bound; the signed percentage (positive = above the
/// band) is reported for explanation.
pub fn rate_alignment(band: Option<&RateBand>, rate: Option<f64>) -> RateSignal {
    let (Some(band), Some(rate)) = (band, rate) else {
        return RateSignal {
            score: NEUTRAL_RATE_SCORE,
            delta: RateDelta::unknown(),
        };
    };

    if band.contains(rate) {
        return RateSignal {
            score: 1.0,
            delta: RateDelta {
                known: true,
                within_range: true,
                delta_pct: Some(0.0),
            },
        };
    }

    let (bound, signed_distance) = if rate > band.max {
        (band.max, rate - band.max)
    } else {
        (band.min, rate - band.min)
    };
    // Degenerate zero bound: any distance is a full miss
    let relative = if bound.abs() > f64::EPSILON {
        signed_distance / bound
    } else if signed_distance > 0.0 {
        1.0
    } else {
        -1.0
    };

    RateSignal {
        score: (1.0 - relative.abs()).max(0.0),
        delta: RateDelta {
            known: true,
            within_range: false,
            delta_pct: Some(relative * 100.0),
        },
    }
}

/// Score availability against requirement urgency via a fixed matrix
///
/// Always produces a human-readable description, even at score zero.
pub fn availability_alignment(availability: Availability, urgency: Urgency) -> AvailabilitySignal {
    let score = match (urgency, availability) {
        (Urgency::Immediate, Availability::Immediate) => 1.0,
        (Urgency::Immediate, Availability::TwoWeeks) => 0.6,
        (Urgency::Immediate, Availability::FourWeeks) => 0.3,
        (Urgency::Immediate, Availability::Unavailable) => 0.0,
        (Urgency::WithinMonth, Availability::Immediate) => 1.0,
        (Urgency::WithinMonth, Availability::TwoWeeks) => 0.9,
        (Urgency::WithinMonth, Availability::FourWeeks) => 0.7,
        (Urgency::WithinMonth, Availability::Unavailable) => 0.0,
        (Urgency::Flexible, Availability::Immediate) => 1.0,
        (Urgency::Flexible, Availability::TwoWeeks) => 1.0,
        (Urgency::Flexible, Availability::FourWeeks) => 0.9,
        (Urgency::Flexible, Availability::Unavailable) => 0.2,
    };
    AvailabilitySignal {
        score,
        delta: AvailabilityDelta {
            status: availability,
            description: availability.description().to_string(),
        },
    }
}
