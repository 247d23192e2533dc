//! Fusion and blend weight configuration
//!
//! Two weight sets drive composition:
//! - FusionWeights: per-component weights for the linear score
//! - BlendWeights: linear/ltr/llm weights for the final score
//!
//! Weights are renormalized before use, so configurations that do not sum
//! to 1.0 are accepted rather than rejected.

use serde::{Deserialize, Serialize};

/// Per-component weights for the linear alignment score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Skill overlap weight
    pub skill: f64,
    /// Location alignment weight
    pub location: f64,
    /// Rate alignment weight
    pub rate: f64,
    /// Availability alignment weight
    pub availability: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        FusionWeights {
            skill: 0.45,
            location: 0.20,
            rate: 0.15,
            availability: 0.20,
        }
    }
}

impl FusionWeights {
    /// Renormalize so the weights sum to 1.0
    ///
    /// Negative weights are clamped to zero first. An all-zero
    /// configuration falls back to equal weights.
    pub fn normalized(&self) -> FusionWeights {
        let skill = self.skill.max(0.0);
        let location = self.location.max(0.0);
        let rate = self.rate.max(0.0);
        let availability = self.availability.max(0.0);
        let total = skill + location + rate + availability;
        if total <= f64::EPSILON {
            return FusionWeights {
                skill: 0.25,
                location: 0.25,
                rate: 0.25,
                availability: 0.25,
            };
        }
        FusionWeights {
            skill: skill / total,
            location: location / total,
            rate: rate / total,
            availability: availability / total,
        }
    }
}

/// Weights blending linear, ltr, and llm into the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the linear alignment score
    pub linear: f64,
    /// Weight of the learned-rank score
    pub ltr: f64,
    /// Weight of the LLM rerank score, used only when a verdict is present
    pub llm: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        BlendWeights {
            linear: 0.55,
            ltr: 0.30,
            llm: 0.15,
        }
    }
}

impl BlendWeights {
    /// Blend the available scores into the final score
    ///
    /// With an LLM verdict, all three weights participate. Without one,
    /// the linear and ltr weights are renormalized between themselves, so
    /// a degraded composition never silently inherits the llm share.
    pub fn blend(&self, linear: f64, ltr: f64, llm: Option<f64>) -> f64 {
        let w_linear = self.linear.max(0.0);
        let w_ltr = self.ltr.max(0.0);
        let w_llm = self.llm.max(0.0);
        match llm {
            Some(llm_score) => {
                let total = w_linear + w_ltr + w_llm;
                if total <= f64::EPSILON {
                    return linear;
                }
                (linear * w_linear + ltr * w_ltr + llm_score * w_llm) / total
            }
            None => {
                let total = w_linear + w_ltr;
                if total <= f64::EPSILON {
                    return linear;
                }
                (linear * w_linear + ltr * w_ltr) / total
            }
        }
    }
}

/// Full composition configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Per-component weights for the linear score
    pub weights: FusionWeights,
    /// Blend weights for the final score
    pub blend: BlendWeights,
    /// How many factor labels to surface as top factors
    pub top_factor_count: usize,
    /// Maximum highlight bullets shown to callers
    pub highlight_limit: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        FusionConfig {
            weights: FusionWeights::default(),
            blend: BlendWeights::default(),
            top_factor_count: 3,
            highlight_limit: 3,
        }
    }
}

impl FusionConfig {
    /// Builder: set fusion weights
    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder: set blend weights
    pub fn with_blend(mut self, blend: BlendWeights) -> Self {
        self.blend = blend;
        self
    }
}
