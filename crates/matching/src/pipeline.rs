//! Match pipeline orchestration
//!
//! Drives the external signal providers for one consultant/requirement
//! pair and hands the collected bundle to `compose`. The pipeline is
//! stateless: it holds only port references and a configuration, and is
//! safe to share across threads.
//!
//! Signal contracts:
//! - retrieval and ltr are required; a provider failure aborts scoring
//!   with a typed error, never a silent substitute
//! - llm is optional; a failure degrades the composition and is marked
//!   in the explanation facts

use crate::config::FusionConfig;
use crate::fuser::{compose, MatchSignals};
use crate::signals::{
    availability_alignment, location_alignment, rate_alignment, skill_alignment,
};
use staffcore_core::{
    ConsultantId, LlmRerankProvider, MatchId, MatchResult, ProfileDirectory, RankFeatures,
    RankProvider, RequirementId, Result, RetrievalProvider, TenantId,
};
use std::sync::Arc;

/// Orchestrates signal collection and composition for one pair at a time
#[derive(Clone)]
pub struct MatchPipeline {
    profiles: Arc<dyn ProfileDirectory>,
    retrieval: Arc<dyn RetrievalProvider>,
    ranker: Arc<dyn RankProvider>,
    reranker: Option<Arc<dyn LlmRerankProvider>>,
    config: FusionConfig,
}

impl MatchPipeline {
    /// Create a pipeline over the required ports
    ///
    /// No LLM reranker is configured by default; results compose from the
    /// two-signal blend until one is attached.
    pub fn new(
        profiles: Arc<dyn ProfileDirectory>,
        retrieval: Arc<dyn RetrievalProvider>,
        ranker: Arc<dyn RankProvider>,
    ) -> Self {
        MatchPipeline {
            profiles,
            retrieval,
            ranker,
            reranker: None,
            config: FusionConfig::default(),
        }
    }

    /// Builder: attach an optional LLM rerank provider
    pub fn with_reranker(mut self, reranker: Arc<dyn LlmRerankProvider>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Builder: set composition configuration
    pub fn with_config(mut self, config: FusionConfig) -> Self {
        self.config = config;
        self
    }

    /// Score one consultant against one requirement
    ///
    /// Returns `Ok(None)` when either profile is missing; absence of data
    /// is a valid terminal state, not an error.
    ///
    /// # Flow
    ///
    /// 1. Fetch both profiles
    /// 2. Compute the four alignment signals
    /// 3. Call the retrieval and learned-rank providers (required)
    /// 4. Call the LLM reranker when configured, degrading on failure
    /// 5. Compose
    pub fn score(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
        consultant_id: ConsultantId,
        match_id: MatchId,
    ) -> Result<Option<MatchResult>> {
        let Some(requirement) = self.profiles.requirement_profile(tenant_id, requirement_id)?
        else {
            tracing::debug!(
                target: "staffcore::matching",
                %tenant_id,
                %requirement_id,
                "requirement profile missing, no match to score"
            );
            return Ok(None);
        };
        let Some(consultant) = self.profiles.consultant_profile(tenant_id, consultant_id)? else {
            tracing::debug!(
                target: "staffcore::matching",
                %tenant_id,
                %consultant_id,
                "consultant profile missing, no match to score"
            );
            return Ok(None);
        };

        let skill = skill_alignment(&requirement.skills, &consultant.skills);
        let location = location_alignment(
            requirement.location.as_ref(),
            requirement.remote_ok,
            consultant.location.as_ref(),
            consultant.remote_available,
        );
        let rate = rate_alignment(requirement.rate_band.as_ref(), consultant.rate);
        let availability = availability_alignment(consultant.availability, requirement.urgency);

        // Required external signals; failures propagate
        let retrieval = self
            .retrieval
            .relevance(tenant_id, requirement_id, consultant_id)?;
        let ltr = self.ranker.rank(&RankFeatures {
            skill: skill.score,
            location: location.score,
            rate: rate.score,
            availability: availability.score,
            retrieval: retrieval.combined(),
        })?;

        // Optional LLM verdict; failure degrades instead of aborting
        let (llm, llm_degraded) = match &self.reranker {
            Some(reranker) => match reranker.rerank(tenant_id, requirement_id, consultant_id) {
                Ok(verdict) => (Some(verdict), false),
                Err(e) => {
                    tracing::warn!(
                        target: "staffcore::matching",
                        %tenant_id,
                        %consultant_id,
                        provider = reranker.name(),
                        error = %e,
                        "LLM rerank unavailable, composing degraded result"
                    );
                    (None, true)
                }
            },
            None => (None, false),
        };

        let signals = MatchSignals {
            match_id,
            consultant_id,
            skill,
            location,
            rate,
            availability,
            retrieval,
            ltr,
            llm,
            llm_degraded,
        };
        compose(&signals, &self.config).map(Some)
    }
}
