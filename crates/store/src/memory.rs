//! In-memory signature store
//!
//! Rows live in a single `Vec` behind a `parking_lot::RwLock`; scan order
//! is insertion order, which gives the stable discovery ordering the
//! duplicate query engine relies on. Row uniqueness per
//! `(tenant, type, hash, consultant)` is enforced on insert, mirroring the
//! upsert-on-conflict constraint of a database-backed store.

use parking_lot::RwLock;
use staffcore_core::{
    ConsultantId, IdentitySignature, Result, SignatureGroup, SignatureKey, SignatureStore,
    TenantId,
};
use std::collections::{HashMap, HashSet};

/// Vec-backed signature store for tests and embedders without a database
#[derive(Debug, Default)]
pub struct MemorySignatureStore {
    rows: RwLock<Vec<IdentitySignature>>,
}

impl MemorySignatureStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total row count across all tenants (test helper)
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

fn same_row(row: &IdentitySignature, tenant_id: TenantId, consultant_id: ConsultantId, key: &SignatureKey) -> bool {
    row.tenant_id == tenant_id
        && row.consultant_id == consultant_id
        && row.signature_type == key.signature_type
        && row.value_hash == key.value_hash
}

impl SignatureStore for MemorySignatureStore {
    fn list_for_consultant(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
    ) -> Result<Vec<IdentitySignature>> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.consultant_id == consultant_id)
            .cloned()
            .collect())
    }

    fn find_matching(
        &self,
        tenant_id: TenantId,
        keys: &[SignatureKey],
        exclude: ConsultantId,
    ) -> Result<Vec<IdentitySignature>> {
        let wanted: HashSet<&SignatureKey> = keys.iter().collect();
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|row| {
                row.tenant_id == tenant_id
                    && row.consultant_id != exclude
                    && wanted.contains(&row.key())
            })
            .cloned()
            .collect())
    }

    fn find_by_key(
        &self,
        tenant_id: TenantId,
        key: &SignatureKey,
    ) -> Result<Vec<IdentitySignature>> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.key() == *key)
            .cloned()
            .collect())
    }

    fn shared_signature_groups(&self, tenant_id: TenantId) -> Result<Vec<SignatureGroup>> {
        let rows = self.rows.read();
        let mut members: HashMap<SignatureKey, HashSet<ConsultantId>> = HashMap::new();
        for row in rows.iter().filter(|row| row.tenant_id == tenant_id) {
            members.entry(row.key()).or_default().insert(row.consultant_id);
        }

        let mut groups: Vec<SignatureGroup> = members
            .into_iter()
            .filter(|(_, consultants)| consultants.len() > 1)
            .map(|(key, consultants)| SignatureGroup {
                key,
                consultant_count: consultants.len(),
            })
            .collect();
        // HashMap iteration order is arbitrary; fix it so repeated calls
        // with identical contents return identical output
        groups.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(groups)
    }

    fn insert(&self, signature: IdentitySignature) -> Result<()> {
        let mut rows = self.rows.write();
        let key = signature.key();
        if let Some(existing) = rows
            .iter_mut()
            .find(|row| same_row(row, signature.tenant_id, signature.consultant_id, &key))
        {
            // Uniqueness constraint: converge on the newest display value
            existing.raw_value = signature.raw_value;
        } else {
            rows.push(signature);
        }
        Ok(())
    }

    fn update_raw_value(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
        key: &SignatureKey,
        raw_value: &str,
    ) -> Result<()> {
        let mut rows = self.rows.write();
        if let Some(row) = rows
            .iter_mut()
            .find(|row| same_row(row, tenant_id, consultant_id, key))
        {
            row.raw_value = raw_value.to_string();
        }
        Ok(())
    }

    fn delete(
        &self,
        tenant_id: TenantId,
        consultant_id: ConsultantId,
        key: &SignatureKey,
    ) -> Result<()> {
        self.rows
            .write()
            .retain(|row| !same_row(row, tenant_id, consultant_id, key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffcore_core::SignatureType;

    fn row(tenant: TenantId, consultant: ConsultantId, hash: &str) -> IdentitySignature {
        IdentitySignature {
            tenant_id: tenant,
            consultant_id: consultant,
            signature_type: SignatureType::Email,
            value_hash: hash.to_string(),
            raw_value: format!("raw-{hash}"),
        }
    }

    #[test]
    fn test_insert_and_list() {
        let store = MemorySignatureStore::new();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        store.insert(row(tenant, consultant, "aa")).unwrap();
        store.insert(row(tenant, consultant, "bb")).unwrap();

        let rows = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_insert_duplicate_overwrites_raw_value() {
        let store = MemorySignatureStore::new();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        store.insert(row(tenant, consultant, "aa")).unwrap();

        let mut dupe = row(tenant, consultant, "aa");
        dupe.raw_value = "newer".to_string();
        store.insert(dupe).unwrap();

        let rows = store.list_for_consultant(tenant, consultant).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].raw_value, "newer");
    }

    #[test]
    fn test_find_matching_excludes_consultant() {
        let store = MemorySignatureStore::new();
        let tenant = TenantId::new();
        let a = ConsultantId::new();
        let b = ConsultantId::new();
        store.insert(row(tenant, a, "shared")).unwrap();
        store.insert(row(tenant, b, "shared")).unwrap();

        let keys = vec![SignatureKey::new(SignatureType::Email, "shared")];
        let matches = store.find_matching(tenant, &keys, a).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].consultant_id, b);
    }

    #[test]
    fn test_shared_groups_require_two_distinct_consultants() {
        let store = MemorySignatureStore::new();
        let tenant = TenantId::new();
        let a = ConsultantId::new();
        let b = ConsultantId::new();
        store.insert(row(tenant, a, "shared")).unwrap();
        store.insert(row(tenant, b, "shared")).unwrap();
        store.insert(row(tenant, a, "solo")).unwrap();

        let groups = store.shared_signature_groups(tenant).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key.value_hash, "shared");
        assert_eq!(groups[0].consultant_count, 2);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemorySignatureStore::new();
        let tenant = TenantId::new();
        let consultant = ConsultantId::new();
        store.insert(row(tenant, consultant, "aa")).unwrap();

        let key = SignatureKey::new(SignatureType::Email, "aa");
        store.delete(tenant, consultant, &key).unwrap();
        store.delete(tenant, consultant, &key).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_raw_value_missing_row_is_noop() {
        let store = MemorySignatureStore::new();
        let key = SignatureKey::new(SignatureType::Email, "zz");
        store
            .update_raw_value(TenantId::new(), ConsultantId::new(), &key, "x")
            .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_tenant_isolation() {
        let store = MemorySignatureStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        let consultant = ConsultantId::new();
        store.insert(row(tenant_a, consultant, "aa")).unwrap();

        assert!(store.list_for_consultant(tenant_b, consultant).unwrap().is_empty());
        assert!(store.shared_signature_groups(tenant_b).unwrap().is_empty());
    }
}
