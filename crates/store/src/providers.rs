//! Static and failing signal providers
//!
//! Deterministic stand-ins for the external retrieval, learned-rank, and
//! LLM rerank services. Static variants return a fixed answer; failing
//! variants always error, for exercising the pipeline's degradation and
//! abort paths.

use staffcore_core::{
    ConsultantId, Error, LlmRerankProvider, LlmVerdict, RankFeatures, RankProvider,
    RequirementId, Result, RetrievalProvider, RetrievalSignals, TenantId,
};

/// Retrieval provider returning the same signals for every pair
#[derive(Debug, Clone)]
pub struct StaticRetrieval {
    signals: RetrievalSignals,
}

impl StaticRetrieval {
    /// Create a provider returning the given signals
    pub fn new(vector: f64, lexical: f64) -> Self {
        StaticRetrieval {
            signals: RetrievalSignals::new(vector, lexical),
        }
    }
}

impl RetrievalProvider for StaticRetrieval {
    fn relevance(
        &self,
        _tenant_id: TenantId,
        _requirement_id: RequirementId,
        _consultant_id: ConsultantId,
    ) -> Result<RetrievalSignals> {
        Ok(self.signals)
    }
}

/// Learned-rank provider returning a fixed score
#[derive(Debug, Clone)]
pub struct StaticRanker {
    score: f64,
}

impl StaticRanker {
    /// Create a provider returning the given score
    pub fn new(score: f64) -> Self {
        StaticRanker { score }
    }
}

impl RankProvider for StaticRanker {
    fn rank(&self, _features: &RankFeatures) -> Result<f64> {
        Ok(self.score)
    }
}

/// LLM rerank provider returning a fixed verdict
#[derive(Debug, Clone)]
pub struct StaticReranker {
    verdict: LlmVerdict,
}

impl StaticReranker {
    /// Create a provider returning the given verdict
    pub fn new(verdict: LlmVerdict) -> Self {
        StaticReranker { verdict }
    }
}

impl LlmRerankProvider for StaticReranker {
    fn rerank(
        &self,
        _tenant_id: TenantId,
        _requirement_id: RequirementId,
        _consultant_id: ConsultantId,
    ) -> Result<LlmVerdict> {
        Ok(self.verdict.clone())
    }

    fn name(&self) -> &str {
        &self.verdict.provider
    }
}

/// Retrieval provider that always fails
#[derive(Debug, Clone, Default)]
pub struct FailingRetrieval;

impl RetrievalProvider for FailingRetrieval {
    fn relevance(
        &self,
        _tenant_id: TenantId,
        _requirement_id: RequirementId,
        _consultant_id: ConsultantId,
    ) -> Result<RetrievalSignals> {
        Err(Error::upstream("retrieval", "simulated outage"))
    }
}

/// Learned-rank provider that always fails
#[derive(Debug, Clone, Default)]
pub struct FailingRanker;

impl RankProvider for FailingRanker {
    fn rank(&self, _features: &RankFeatures) -> Result<f64> {
        Err(Error::upstream("ltr", "simulated outage"))
    }
}

/// LLM rerank provider that always fails
#[derive(Debug, Clone, Default)]
pub struct FailingReranker;

impl LlmRerankProvider for FailingReranker {
    fn rerank(
        &self,
        _tenant_id: TenantId,
        _requirement_id: RequirementId,
        _consultant_id: ConsultantId,
    ) -> Result<LlmVerdict> {
        Err(Error::upstream("llm", "simulated outage"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
