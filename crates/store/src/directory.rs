//! In-memory consultant and profile directory
//!
//! One struct backs both directory ports: consultant identity records for
//! the reconciler and duplicate queries, alignment profiles for the match
//! pipeline. Upsert/remove helpers exist so tests can stage directory state
//! directly.

use parking_lot::RwLock;
use staffcore_core::{
    ConsultantDirectory, ConsultantId, ConsultantProfile, ConsultantRecord, ProfileDirectory,
    RequirementId, RequirementProfile, Result, TenantId,
};
use std::collections::HashMap;

/// Map-backed directory serving both `ConsultantDirectory` and
/// `ProfileDirectory`
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    consultants: RwLock<HashMap<(TenantId, ConsultantId), ConsultantRecord>>,
    consultant_profiles: RwLock<HashMap<(TenantId, ConsultantId), ConsultantProfile>>,
    requirement_profiles: RwLock<HashMap<(TenantId, RequirementId), RequirementProfile>>,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a consultant record
    pub fn upsert_consultant(&self, tenant_id: TenantId, record: ConsultantRecord) {
        self.consultants.write().insert((tenant_id, record.id), record);
    }

    /// Remove a consultant record; profiles are left untouched
    pub fn remove_consultant(&self, tenant_id: TenantId, consultant_id: ConsultantId) {
        self.consultants.write().remove(&(tenant_id, consultant_id));
    }

    /// Insert or replace a consultant alignment profile
    pub fn upsert_consultant_profile(&self, tenant_id: TenantId, profile: ConsultantProfile) {
        self.consultant_profiles
            .write()
            .insert((tenant_id, profile.consultant_id), profile);
    }

    /// Insert or replace a requirement alignment profile
    pub fn upsert_requirement_profile(&self, tenant_id: TenantId, profile: RequirementProfile) {
        self.requirement_profiles
            .write()
            .insert((tenant_id, profile.requirement_id), profile);
    }
}

impl ConsultantDirectory for MemoryDirectory {
    fn get(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Option<ConsultantRecord>> {
        Ok(self.consultants.read().get(&(tenant_id, consultant_id)).cloned())
    }
}

impl ProfileDirectory for MemoryDirectory {
    fn consultant_profile(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Option<ConsultantProfile>> {
        Ok(self
            .consultant_profiles
            .read()
            .get(&(tenant_id, consultant_id))
            .cloned())
    }

    fn requirement_profile(
        &self,
        tenant_id: TenantId,
        requirement_id: RequirementId,
    ) -> Result<Option<RequirementProfile>> {
        Ok(self
            .requirement_profiles
            .read()
            .get(&(tenant_id, requirement_id))
            .cloned())
    }
}
