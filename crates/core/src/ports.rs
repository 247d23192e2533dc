//! Port traits for external collaborators
//!
//! The engine never reaches a database or network client directly. Each
//! external dependency is an injected trait object, so tests and embedders
//! can substitute in-memory fakes:
//! - SignatureStore: persistence for identity signature rows
//! - ConsultantDirectory: read-only consultant identity fields
//! - ProfileDirectory: weighted skills, location, rate, availability
//! - RetrievalProvider / RankProvider / LlmRerankProvider: external signals
//!
//! Thread safety: all ports must be safe to call concurrently from multiple
//! threads (Send + Sync). Timeouts are the implementations' concern; a timed
//! out call surfaces as an error, never as a silent default.

use crate::error::Result;
use crate::match_types::{LlmVerdict, RetrievalSignals};
use crate::profile::{ConsultantProfile, RequirementProfile};
use crate::signature::{IdentitySignature, SignatureKey};
use crate::types::{ConsultantId, ConsultantRecord, RequirementId, TenantId};
use serde::{Deserialize, Serialize};

/// One `(type, value_hash)` group with its distinct-consultant count
///
/// Produced by [`SignatureStore::shared_signature_groups`]; only groups
/// with more than one distinct consultant are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureGroup {
    /// The shared signature key
    pub key: SignatureKey,
    /// Number of distinct consultants holding a row with this key
    pub consultant_count: usize,
}

/// Persistence abstraction for identity signature rows
///
/// Implementations enforce row uniqueness per
/// `(tenant_id, signature_type, value_hash, consultant_id)`: inserting an
/// already-present row overwrites its `raw_value` rather than duplicating it
/// (mirrors an upsert-on-conflict constraint).
pub trait SignatureStore: Send + Sync {
    /// List all signature rows for one consultant
    ///
    /// Returns an empty vector when the consultant has no rows.
    fn list_for_consultant(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Vec<IdentitySignature>>;

    /// Find rows in the tenant matching any of the given keys, excluding one
    /// consultant's own rows
    ///
    /// Row order is the store's scan order and is stable for identical
    /// contents; the query engine relies on that for discovery ordering.
    fn find_matching(
        &self,
        tenant_id: TenantId,
        keys: &[SignatureKey],
        exclude: ConsultantId,
    ) -> Result<Vec<IdentitySignature>>;

    /// All rows in the tenant holding exactly this key
    fn find_by_key(
        &self,
        tenant_id: TenantId,
        key: &SignatureKey,
    ) -> Result<Vec<IdentitySignature>>;

    /// Aggregate: group tenant rows by key, keep groups with more than one
    /// distinct consultant
    ///
    /// Order of returned groups is unspecified; callers sort.
    fn shared_signature_groups(&self, tenant_id: TenantId) -> Result<Vec<SignatureGroup>>;

    /// Insert a row, overwriting `raw_value` if the row already exists
    fn insert(&self, signature: IdentitySignature) -> Result<()>;

    /// Update the display value of an existing row in place
    ///
    /// A no-op when the row does not exist.
    fn update_raw_value(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
        key: &SignatureKey,
        raw_value: &str,
    ) -> Result<()>;

    /// Delete one row; a no-op when the row does not exist
    fn delete(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
        key: &SignatureKey,
    ) -> Result<()>;
}

/// Read-only lookup of consultant identity fields
pub trait ConsultantDirectory: Send + Sync {
    /// Fetch one consultant's record
    ///
    /// Returns `Ok(None)` when the consultant does not exist (deleted
    /// concurrently, for instance); that is a valid terminal state, not an
    /// error.
    fn get(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Option<ConsultantRecord>>;
}

/// Read-only lookup of alignment profiles
pub trait ProfileDirectory: Send + Sync {
    /// Fetch the alignment profile for a consultant
    fn consultant_profile(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Option<ConsultantProfile>>;

    /// Fetch the alignment profile for a requirement
    fn requirement_profile(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
    ) -> Result<Option<RequirementProfile>>;
}

/// Feature vector handed to the learned-rank provider
///
/// All components are normalized to `[0,1]` before the call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankFeatures {
    /// Skill alignment component
    pub skill: f64,
    /// Location alignment component
    pub location: f64,
    /// Rate alignment component
    pub rate: f64,
    /// Availability alignment component
    pub availability: f64,
    /// Combined retrieval relevance
    pub retrieval: f64,
}

/// Hybrid retrieval relevance provider (required signal)
///
/// Failure aborts match composition; the engine never substitutes a default
/// for a missing retrieval score.
pub trait RetrievalProvider: Send + Sync {
    /// Relevance of one consultant for one requirement
    fn relevance(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
        consultant_id: ConsultantId,
    ) -> Result<RetrievalSignals>;
}

/// Learned ranking model provider (required signal)
pub trait RankProvider: Send + Sync {
    /// Score a feature vector, returning a value in `[0,1]`
    fn rank(&self, features: &RankFeatures) -> Result<f64>;
}

/// Optional LLM rerank provider
///
/// May be entirely absent from a deployment. Failure is tolerated: the
/// pipeline composes without the verdict and marks the result degraded.
pub trait LlmRerankProvider: Send + Sync {
    /// Rerank one consultant for one requirement
    fn rerank(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
        consultant_id: ConsultantId,
    ) -> Result<LlmVerdict>;

    /// Provider label for explanations and logging
    fn name(&self) -> &str;
}
