//! Identity signature model and derived duplicate views
//!
//! This module defines:
//! - SignatureType: which identity field a signature was derived from
//! - SignatureKey: the `(type, value_hash)` pair signatures are matched on
//! - IdentitySignature: one persisted signature row
//! - DuplicateMatch / DuplicateCluster: derived, non-persisted query views
//!
//! Signature rows are created, updated, and deleted exclusively by the
//! reconciler, one consultant at a time. Readers never mutate them.

use crate::types::{ConsultantId, ConsultantSummary, TenantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which identity field a signature was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    /// Trimmed, lowercased email address
    Email,
    /// Digits-only phone number
    Phone,
    /// Lowercased, whitespace-collapsed full name
    Name,
}

impl SignatureType {
    /// All signature types, in canonical order
    pub fn all() -> [SignatureType; 3] {
        [SignatureType::Email, SignatureType::Phone, SignatureType::Name]
    }

    /// Stable string label (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureType::Email => "EMAIL",
            SignatureType::Phone => "PHONE",
            SignatureType::Name => "NAME",
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(type, value_hash)` pair that signatures are matched and diffed on
///
/// Two consultants are duplicates on a field exactly when their rows share
/// a SignatureKey. Hashes are unsalted SHA-256 hex, so keys are comparable
/// across records and across tenants (queries still scope by tenant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureKey {
    /// Signature type
    #[serde(rename = "type")]
    pub signature_type: SignatureType,
    /// SHA-256 hex digest of the canonical value
    pub value_hash: String,
}

impl SignatureKey {
    /// Create a new SignatureKey
    pub fn new(signature_type: SignatureType, value_hash: impl Into<String>) -> Self {
        SignatureKey {
            signature_type,
            value_hash: value_hash.into(),
        }
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.signature_type, self.value_hash)
    }
}

/// One persisted identity signature row
///
/// Unique per `(tenant_id, signature_type, value_hash, consultant_id)`;
/// the store enforces the constraint. `raw_value` is the display form and
/// the only field ever updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySignature {
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Owning consultant
    pub consultant_id: ConsultantId,
    /// Signature type
    pub signature_type: SignatureType,
    /// SHA-256 hex digest of the canonical value
    pub value_hash: String,
    /// Canonical value as last seen, kept for display
    pub raw_value: String,
}

impl IdentitySignature {
    /// The `(type, value_hash)` pair this row is matched on
    pub fn key(&self) -> SignatureKey {
        SignatureKey::new(self.signature_type, self.value_hash.clone())
    }
}

/// One duplicate consultant, as seen from a per-consultant lookup
///
/// Derived and non-persisted; built fresh on every query. `match_types`
/// carries one entry per matching signature row and is deliberately not
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// The other consultant sharing signatures
    pub consultant_id: ConsultantId,
    /// Display view of that consultant
    pub summary: ConsultantSummary,
    /// One entry per matching signature row, in discovery order
    pub match_types: Vec<SignatureType>,
    /// Count of matching signature rows
    pub shared_signature_count: usize,
}

/// A set of consultants sharing one exact signature
///
/// Derived and non-persisted; only valid with at least two distinct
/// consultants. The query engine discards smaller groups before returning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCluster {
    /// The shared signature
    pub signature: SignatureKey,
    /// One DuplicateMatch per participating signature row
    pub consultants: Vec<DuplicateMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_type_serde_screaming() {
        let json = serde_json::to_string(&SignatureType::Email).unwrap();
        assert_eq!(json, "\"EMAIL\"");
        let back: SignatureType = serde_json::from_str("\"PHONE\"").unwrap();
        assert_eq!(back, SignatureType::Phone);
    }

    #[test]
    fn test_signature_type_all_order() {
        assert_eq!(
            SignatureType::all(),
            [SignatureType::Email, SignatureType::Phone, SignatureType::Name]
        );
    }

    #[test]
    fn test_signature_key_display() {
        let key = SignatureKey::new(SignatureType::Name, "abc123");
        assert_eq!(key.to_string(), "NAME:abc123");
    }

    #[test]
    fn test_identity_signature_key() {
        let sig = IdentitySignature {
            tenant_id: TenantId::new(),
            consultant_id: ConsultantId::new(),
            signature_type: SignatureType::Email,
            value_hash: "deadbeef".to_string(),
            raw_value: "jane@co.com".to_string(),
        };
        assert_eq!(sig.key(), SignatureKey::new(SignatureType::Email, "deadbeef"));
    }

    #[test]
    fn test_signature_key_hash_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SignatureKey::new(SignatureType::Email, "aa"));
        assert!(set.contains(&SignatureKey::new(SignatureType::Email, "aa")));
        assert!(!set.contains(&SignatureKey::new(SignatureType::Phone, "aa")));
    }
}
