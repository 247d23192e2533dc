//! Signature reconciliation
//!
//! Computes the add/remove diff between a consultant's desired signature
//! set (derived from current directory fields) and the persisted set, then
//! applies it. Running reconcile twice with unchanged data is a no-op on
//! the second call.
//!
//! Concurrency: reconciles for different consultants never conflict.
//! Concurrent reconciles for the same consultant are not serialized here;
//! the store's uniqueness constraint prevents duplicate rows, but callers
//! needing strict ordering must serialize per consultant themselves.

use crate::normalize::desired_signatures;
use staffcore_core::{
    ConsultantDirectory, ConsultantId, IdentitySignature, Result, SignatureKey, SignatureStore,
    TenantId,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Write counts from one reconcile pass
///
/// All-zero stats mean the persisted set already matched the desired set
/// and no store write happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Rows created
    pub created: usize,
    /// Rows whose display value was updated in place
    pub updated: usize,
    /// Rows deleted
    pub removed: usize,
}

impl ReconcileStats {
    /// Whether the pass performed no writes
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.removed == 0
    }
}

/// Applies signature diffs for one consultant at a time
///
/// Holds only port references; safe to share across threads.
#[derive(Clone)]
pub struct SignatureReconciler {
    store: Arc<dyn SignatureStore>,
    directory: Arc<dyn ConsultantDirectory>,
}

impl SignatureReconciler {
    /// Create a new reconciler over the given ports
    pub fn new(store: Arc<dyn SignatureStore>, directory: Arc<dyn ConsultantDirectory>) -> Self {
        SignatureReconciler { store, directory }
    }

    /// Reconcile one consultant's persisted signatures with their current
    /// directory fields
    ///
    /// # Flow
    ///
    /// 1. Load the consultant record; missing consultant → silent no-op
    ///    (it may have been deleted concurrently)
    /// 2. Build the desired set (at most one signature per type)
    /// 3. Delete persisted rows whose `type:hash` left the desired set
    /// 4. Create missing rows; refresh `raw_value` in place where only the
    ///    display form changed (hash and type never change on a live row)
    pub fn reconcile(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<ReconcileStats> {
        let Some(record) = self.directory.get(tenant_id, consultant_id)? else {
            tracing::debug!(
                target: "staffcore::identity",
                %tenant_id,
                %consultant_id,
                "consultant missing, reconcile is a no-op"
            );
            return Ok(ReconcileStats::default());
        };

        let desired = desired_signatures(&record);
        let existing = self.store.list_for_consultant(tenant_id, consultant_id)?;

        let desired_keys: Vec<SignatureKey> = desired.iter().map(|sig| sig.key()).collect();
        let existing_by_key: HashMap<SignatureKey, &IdentitySignature> =
            existing.iter().map(|row| (row.key(), row)).collect();

        let mut stats = ReconcileStats::default();

        // Removals: rows no longer backed by a desired signature
        for row in &existing {
            if !desired_keys.contains(&row.key()) {
                self.store.delete(tenant_id, consultant_id, &row.key())?;
                stats.removed += 1;
            }
        }

        // Upserts: create absent rows, refresh changed display values
        for sig in &desired {
            match existing_by_key.get(&sig.key()) {
                None => {
                    self.store.insert(IdentitySignature {
                        tenant_id,
                        consultant_id,
                        signature_type: sig.signature_type,
                        value_hash: sig.value_hash.clone(),
                        raw_value: sig.raw_value.clone(),
                    })?;
                    stats.created += 1;
                }
                Some(row) if row.raw_value != sig.raw_value => {
                    self.store.update_raw_value(
                        tenant_id,
                        consultant_id,
                        &sig.key(),
                        &sig.raw_value,
                    )?;
                    stats.updated += 1;
                }
                Some(_) => {}
            }
        }

        if !stats.is_noop() {
            tracing::debug!(
                target: "staffcore::identity",
                %tenant_id,
                %consultant_id,
                created = stats.created,
                updated = stats.updated,
                removed = stats.removed,
                "reconciled signatures"
            );
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffcore_core::{ConsultantRecord, SignatureType};
    use staffcore_store::{MemoryDirectory, MemorySignatureStore};

    fn setup() -> (Arc<MemorySignatureStore>, Arc<MemoryDirectory>, SignatureReconciler) {
        let store = Arc::new(MemorySignatureStore::new());
        let directory = Arc::new(MemoryDirectory::new());
        let reconciler = SignatureReconciler::new(store.clone(), directory.clone());
        (store, directory, reconciler)
    }

    #[test]
    fn test_reconcile_creates_all_signatures() {
        let (store, directory, reconciler) = setup();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant)
                .with_first_name("Jane")
                .with_last_name("Doe")
                .with_email("jane@co.com")
                .with_phone("512-555-0134"),
        );

        let stats = reconciler.reconcile(tenant, consultant).unwrap();
        assert_eq!(stats.created, 3);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.removed, 0);

        let rows = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (store, directory, reconciler) = setup();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant)
                .with_first_name("Jane")
                .with_email("jane@co.com"),
        );

        reconciler.reconcile(tenant, consultant).unwrap();
        let before = store.list_for_consultant(tenant, consultant).unwrap();

        let second = reconciler.reconcile(tenant, consultant).unwrap();
        assert!(second.is_noop());

        let after = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reconcile_removes_cleared_field() {
        let (store, directory, reconciler) = setup();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant)
                .with_email("jane@co.com")
                .with_phone("512-555-0134"),
        );
        reconciler.reconcile(tenant, consultant).unwrap();

        // Phone cleared in the directory
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant).with_email("jane@co.com"),
        );
        let stats = reconciler.reconcile(tenant, consultant).unwrap();
        assert_eq!(stats.removed, 1);

        let rows = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].signature_type, SignatureType::Email);
    }

    #[test]
    fn test_reconcile_updates_display_value_in_place() {
        let (store, directory, reconciler) = setup();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant).with_email("jane@co.com"),
        );
        reconciler.reconcile(tenant, consultant).unwrap();

        // Same canonical value, different entered casing
        directory.upsert_consultant(
            tenant,
            ConsultantRecord::new(consultant).with_email("Jane@Co.com"),
        );
        let stats = reconciler.reconcile(tenant, consultant).unwrap();
        assert_eq!(stats.created, 0);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.removed, 0);

        let rows = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw_value, "Jane@Co.com");
    }

    #[test]
    fn test_reconcile_missing_consultant_is_noop() {
        let (store, _directory, reconciler) = setup();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();

        let stats = reconciler.reconcile(tenant, consultant).unwrap();
        assert!(stats.is_noop());
        assert!(store.list_for_consultant(tenant, consultant).unwrap().is_empty());
    }

    #[test]
    fn test_reconcile_different_consultants_do_not_interfere() {
        let (store, directory, reconciler) = setup();
        let tenant = TenantId::new();
        let a = ConsultantId::new();
        let b = ConsultantId::new();
        directory.upsert_consultant(tenant, ConsultantRecord::new(a).with_email("a@co.com"));
        directory.upsert_consultant(tenant, ConsultantRecord::new(b).with_email("b@co.com"));

        reconciler.reconcile(tenant, a).unwrap();
        reconciler.reconcile(tenant, b).unwrap();

        assert_eq!(store.list_for_consultant(tenant, a).unwrap().len(), 1);
        assert_eq!(store.list_for_consultant(tenant, b).unwrap().len(), 1);
    }
}
