//! Duplicate query engine
//!
//! Two read algorithms over the signature store:
//! - per-consultant duplicate lookup, grouped by the other consultant
//! - tenant-wide duplicate-cluster discovery over shared signature keys
//!
//! Both build derived views fresh on every call and never mutate the store.

use staffcore_core::{
    ConsultantDirectory, ConsultantId, DuplicateCluster, DuplicateMatch, Result, SignatureKey,
    SignatureStore, SignatureType, TenantId,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Candidate-group over-fetch factor for cluster discovery
///
/// Compensates for groups that later resolve to fewer than two consultants
/// (rows whose consultant was deleted between the aggregate and the fetch).
/// Under heavy pruning the result may still be shorter than `limit`; the
/// engine returns the short list rather than re-querying.
const CLUSTER_OVERFETCH_FACTOR: usize = 3;

/// Read-side duplicate queries over the signature store
///
/// Holds only port references; safe to share across threads.
#[derive(Clone)]
pub struct DuplicateFinder {
    store: Arc<dyn SignatureStore>,
    directory: Arc<dyn ConsultantDirectory>,
}

impl DuplicateFinder {
    /// Create a new finder over the given ports
    pub fn new(store: Arc<dyn SignatureStore>, directory: Arc<dyn ConsultantDirectory>) -> Self {
        DuplicateFinder { store, directory }
    }

    /// Find all other consultants sharing a signature with this one
    ///
    /// # Flow
    ///
    /// 1. Load the consultant's signatures; none → empty result
    /// 2. Find other consultants' rows matching any `(type, hash)` pair
    /// 3. Group by the other consultant in discovery order, accumulating
    ///    one `match_types` entry per matching row (not deduplicated)
    /// 4. Stable sort descending by shared row count; ties keep discovery
    ///    order
    ///
    /// The queried consultant is never part of the result.
    pub fn find_duplicates(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Vec<DuplicateMatch>> {
        let own = self.store.list_for_consultant(tenant_id, consultant_id)?;
        if own.is_empty() {
            return Ok(vec![]);
        }

        let keys: Vec<SignatureKey> = own.iter().map(|row| row.key()).collect();
        let rows = self.store.find_matching(tenant_id, &keys, consultant_id)?;

        // Group rows by the other consultant, preserving discovery order
        let mut order: Vec<ConsultantId> = Vec::new();
        let mut grouped: HashMap<ConsultantId, Vec<SignatureType>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.consultant_id)
                .or_insert_with(|| {
                    order.push(row.consultant_id);
                    Vec::new()
                })
                .push(row.signature_type);
        }

        let mut matches: Vec<DuplicateMatch> = Vec::with_capacity(order.len());
        for other_id in order {
            let match_types = grouped
                .remove(&other_id)
                .expect("invariant violation: ordered consultant must have a group");
            let Some(record) = self.directory.get(tenant_id, other_id)? else {
                // Deleted since the row scan; drop silently
                tracing::debug!(
                    target: "staffcore::identity",
                    %tenant_id,
                    consultant_id = %other_id,
                    "duplicate candidate vanished from directory, skipping"
                );
                continue;
            };
            let shared_signature_count = match_types.len();
            matches.push(DuplicateMatch {
                consultant_id: other_id,
                summary: record.summary(),
                match_types,
                shared_signature_count,
            });
        }

        // Stable sort: ties keep discovery order
        matches.sort_by(|a, b| b.shared_signature_count.cmp(&a.shared_signature_count));
        Ok(matches)
    }

    /// Discover tenant-wide clusters of consultants sharing one signature
    ///
    /// # Flow
    ///
    /// 1. Aggregate tenant rows by `(hash, type)`, keeping groups with more
    ///    than one distinct consultant
    /// 2. Order groups by descending consultant count; consider up to
    ///    `limit * 3` candidates
    /// 3. Resolve each group's rows to consultant summaries, one
    ///    `DuplicateMatch` per participating row
    /// 4. Discard groups resolving to fewer than two matches
    /// 5. Return the first `limit` clusters in group order
    pub fn find_clusters(
        &self,
        tenant_id: TenantId,
        limit: usize,
    ) -> Result<Vec<DuplicateCluster>> {
        if limit == 0 {
            return Ok(vec![]);
        }

        let mut groups = self.store.shared_signature_groups(tenant_id)?;
        groups.sort_by(|a, b| b.consultant_count.cmp(&a.consultant_count));
        groups.truncate(limit.saturating_mul(CLUSTER_OVERFETCH_FACTOR));

        let mut clusters: Vec<DuplicateCluster> = Vec::new();
        for group in groups {
            if clusters.len() == limit {
                break;
            }

            let rows = self.store.find_by_key(tenant_id, &group.key)?;
            let mut consultants: Vec<DuplicateMatch> = Vec::with_capacity(rows.len());
            for row in rows {
                let Some(record) = self.directory.get(tenant_id, row.consultant_id)? else {
                    continue;
                };
                consultants.push(DuplicateMatch {
                    consultant_id: row.consultant_id,
                    summary: record.summary(),
                    match_types: vec![row.signature_type],
                    shared_signature_count: 1,
                });
            }

            // A cluster needs at least two surviving consultants
            if consultants.len() >= 2 {
                clusters.push(DuplicateCluster {
                    signature: group.key,
                    consultants,
                });
            }
        }

        Ok(clusters)
    }
}
