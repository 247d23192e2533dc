//! Alignment inputs served by the skills/requirements directory
//!
//! This module defines the profile views the signal collectors consume:
//! - WeightedSkill: one skill with a relative weight
//! - Location / RateBand: canonical location and rate-band data
//! - Availability / Urgency: enumerated scheduling states
//! - ConsultantProfile / RequirementProfile: per-entity bundles

use crate::types::{ConsultantId, RequirementId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One skill with a relative weight
///
/// Weights are non-negative and need not be normalized; the skill collector
/// normalizes during overlap computation. Matching is on the lowercased
/// skill name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSkill {
    /// Skill name, e.g. "rust" or "kafka"
    pub name: String,
    /// Relative weight, non-negative
    pub weight: f64,
}

impl WeightedSkill {
    /// Create a new WeightedSkill
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        WeightedSkill {
            name: name.into(),
            weight,
        }
    }

    /// Lowercased, trimmed name used as the match key
    pub fn canonical_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Canonical location: city plus optional broader region/metro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City, as entered
    pub city: String,
    /// Region or metro area, when known
    pub region: Option<String>,
}

impl Location {
    /// Create a location with city only
    pub fn city(city: impl Into<String>) -> Self {
        Location {
            city: city.into(),
            region: None,
        }
    }

    /// Builder: set region/metro
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Lowercased, trimmed city used for comparison
    pub fn canonical_city(&self) -> String {
        self.city.trim().to_lowercase()
    }

    /// Lowercased, trimmed region used for comparison
    pub fn canonical_region(&self) -> Option<String> {
        self.region
            .as_deref()
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}, {}", self.city, region),
            None => f.write_str(&self.city),
        }
    }
}

/// Requirement rate band in the tenant's billing currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// Lower bound, inclusive
    pub min: f64,
    /// Upper bound, inclusive
    pub max: f64,
}

impl RateBand {
    /// Create a new RateBand
    pub fn new(min: f64, max: f64) -> Self {
        RateBand { min, max }
    }

    /// Whether a rate falls inside the band (bounds inclusive)
    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

/// Consultant availability states recognized by the CRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    /// On the bench, can start now
    Immediate,
    /// Free within two weeks
    TwoWeeks,
    /// Free within four weeks
    FourWeeks,
    /// Engaged with no known end date
    Unavailable,
}

impl Availability {
    /// Human-readable description, always present even at score 0
    pub fn description(&self) -> &'static str {
        match self {
            Availability::Immediate => "Available immediately",
            Availability::TwoWeeks => "Available within two weeks",
            Availability::FourWeeks => "Available within four weeks",
            Availability::Unavailable => "Currently engaged, no known end date",
        }
    }
}

/// How soon a requirement needs to be filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    /// Start as soon as possible
    Immediate,
    /// Start within the coming month
    WithinMonth,
    /// Start date is negotiable
    Flexible,
}

/// Per-consultant bundle of alignment inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantProfile {
    /// Consultant identifier
    pub consultant_id: ConsultantId,
    /// Weighted skill set
    pub skills: Vec<WeightedSkill>,
    /// Canonical location, when known
    pub location: Option<Location>,
    /// Whether the consultant accepts remote engagements
    pub remote_available: bool,
    /// Hourly rate in the tenant's billing currency; None when unset
    pub rate: Option<f64>,
    /// Current availability
    pub availability: Availability,
}

/// Per-requirement bundle of alignment inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    /// Requirement identifier
    pub requirement_id: RequirementId,
    /// Weighted skill set
    pub skills: Vec<WeightedSkill>,
    /// Canonical location, when the role is location-bound
    pub location: Option<Location>,
    /// Whether the requirement accepts remote consultants
    pub remote_ok: bool,
    /// Acceptable rate band; None when the client has no stated band
    pub rate_band: Option<RateBand>,
    /// Fill urgency
    pub urgency: Urgency,
}
