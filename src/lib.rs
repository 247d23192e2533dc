//! Staffcore - Identity resolution and match explanation for staffing CRMs
//!
//! Staffcore keeps consultant identity signatures in sync, surfaces
//! duplicate consultants within a tenant, and scores consultants against
//! requirements with a deterministic, explainable composition.
//!
//! # Quick Start
//!
//! ```ignore
//! use staffcore::{Engine, MatchId, TenantId};
//!
//! let engine = Engine::in_memory();
//!
//! // Keep signatures aligned with the consultant record
//! engine.reconcile(tenant_id, consultant_id)?;
//!
//! // Surface duplicates of one consultant
//! let duplicates = engine.find_duplicates(tenant_id, consultant_id)?;
//!
//! // Score a consultant against a requirement
//! let result = engine.score(tenant_id, requirement_id, consultant_id, MatchId::new())?;
//! ```
//!
//! # Architecture
//!
//! The workspace splits into four crates:
//!
//! - `staffcore-core`: shared types, errors, and the port traits
//! - `staffcore-identity`: signature normalization, reconciliation, and
//!   duplicate discovery
//! - `staffcore-matching`: signal collectors, fusion, and explanations
//! - `staffcore-store`: in-memory adapters for the port traits
//!
//! The [`Engine`] struct wires the three services over shared ports for
//! callers that do not need custom adapters.

pub use staffcore_core::*;
pub use staffcore_identity::{
    desired_signatures, DuplicateFinder, NormalizedSignature, ReconcileStats, SignatureReconciler,
};
pub use staffcore_matching::{
    availability_alignment, compose, location_alignment, rate_alignment, skill_alignment,
    BlendWeights, FusionConfig, FusionWeights, MatchPipeline, MatchSignals,
};
pub use staffcore_store::{MemoryDirectory, MemorySignatureStore};

use std::sync::Arc;

/// High-level handle wiring the identity and matching services
///
/// `Engine` owns one instance of each service over shared ports. Each
/// method delegates to the underlying service; callers needing custom
/// adapters or configuration can construct the services directly.
pub struct Engine {
    directory: Arc<MemoryDirectory>,
    signatures: Arc<MemorySignatureStore>,
    reconciler: SignatureReconciler,
    duplicates: DuplicateFinder,
    pipeline: MatchPipeline,
}

impl Engine {
    /// Create an engine over fresh in-memory stores
    ///
    /// Uses the default fusion configuration and no external providers:
    /// retrieval and learned-rank scores come from neutral constants until
    /// real providers are attached via [`Engine::with_providers`].
    pub fn in_memory() -> Self {
        Engine::with_providers(
            Arc::new(staffcore_store::StaticRetrieval::new(0.5, 0.5)),
            Arc::new(staffcore_store::StaticRanker::new(0.5)),
            None,
        )
    }

    /// Create an engine over fresh in-memory stores with explicit providers
    pub fn with_providers(
        retrieval: Arc<dyn RetrievalProvider>,
        ranker: Arc<dyn RankProvider>,
        reranker: Option<Arc<dyn LlmRerankProvider>>,
    ) -> Self {
        let directory = Arc::new(MemoryDirectory::new());
        let signatures = Arc::new(MemorySignatureStore::new());

        let reconciler = SignatureReconciler::new(signatures.clone(), directory.clone());
        let duplicates = DuplicateFinder::new(signatures.clone(), directory.clone());
        let mut pipeline = MatchPipeline::new(directory.clone(), retrieval, ranker);
        if let Some(reranker) = reranker {
            pipeline = pipeline.with_reranker(reranker);
        }

        Engine {
            directory,
            signatures,
            reconciler,
            duplicates,
            pipeline,
        }
    }

    /// Builder: replace the composition configuration
    pub fn with_config(mut self, config: FusionConfig) -> Self {
        self.pipeline = self.pipeline.with_config(config);
        self
    }

    /// The consultant and profile directory backing this engine
    pub fn directory(&self) -> &Arc<MemoryDirectory> {
        &self.directory
    }

    /// The signature store backing this engine
    pub fn signatures(&self) -> &Arc<MemorySignatureStore> {
        &self.signatures
    }

    /// Reconcile stored signatures with the consultant's current record
    pub fn reconcile(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<ReconcileStats> {
        self.reconciler.reconcile(tenant_id, consultant_id)
    }

    /// Find consultants sharing identity signatures with the given one
    pub fn find_duplicates(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Vec<DuplicateMatch>> {
        self.duplicates.find_duplicates(tenant_id, consultant_id)
    }

    /// Discover the tenant's largest duplicate clusters
    pub fn find_clusters(&self, tenant_id: TenantId, limit: usize) -> Result<Vec<DuplicateCluster>> {
        self.duplicates.find_clusters(tenant_id, limit)
    }

    /// Score one consultant against one requirement
    pub fn score(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
        consultant_id: ConsultantId,
        match_id: MatchId,
    ) -> Result<Option<MatchResult>> {
        self.pipeline
            .score(tenant_id, requirement_id, consultant_id, match_id)
    }
}
