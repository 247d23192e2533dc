//! Signature normalization
//!
//! Pure functions that turn raw identity fields into canonical, hashable
//! values. No side effects and no error cases: an empty or unusable raw
//! value simply produces no signature.
//!
//! Hashing is unsalted SHA-256 over the canonical value, hex-encoded.
//! Cross-record comparability is the point, so a salt would defeat it.

use sha2::{Digest, Sha256};
use staffcore_core::{ConsultantRecord, SignatureKey, SignatureType};
use std::collections::HashSet;

/// A canonical, hashed identity signature before persistence
///
/// `raw_value` is the display form carried onto the stored row; it can
/// change between edits while `value_hash` stays the same (e.g. an email
/// re-entered with different casing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSignature {
    /// Which field the signature was derived from
    pub signature_type: SignatureType,
    /// Canonical value (trimmed/lowercased/etc. per field rules)
    pub canonical_value: String,
    /// SHA-256 hex digest of the canonical value
    pub value_hash: String,
    /// Display form as entered, trimmed
    pub raw_value: String,
}

impl NormalizedSignature {
    fn new(signature_type: SignatureType, canonical_value: String, raw_value: String) -> Self {
        let value_hash = hash_value(&canonical_value);
        NormalizedSignature {
            signature_type,
            canonical_value,
            value_hash,
            raw_value,
        }
    }

    /// Normalize an email address: trim + lowercase
    pub fn email(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_lowercase();
        if canonical.is_empty() {
            return None;
        }
        Some(Self::new(SignatureType::Email, canonical, raw.trim().to_string()))
    }

    /// Normalize a phone number: strip all non-digit characters
    pub fn phone(raw: &str) -> Option<Self> {
        let canonical: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if canonical.is_empty() {
            return None;
        }
        Some(Self::new(SignatureType::Phone, canonical, raw.trim().to_string()))
    }

    /// Normalize a full name: join non-empty parts with a single space,
    /// lowercase, collapse internal whitespace
    pub fn name(first: Option<&str>, last: Option<&str>) -> Option<Self> {
        let parts: Vec<&str> = [first, last]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        // Collapse runs of internal whitespace left inside the parts
        let canonical = parts
            .join(" ")
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if canonical.is_empty() {
            return None;
        }
        let display = parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");
        Some(Self::new(SignatureType::Name, canonical, display))
    }

    /// The `(type, value_hash)` key this signature reconciles on
    pub fn key(&self) -> SignatureKey {
        SignatureKey::new(self.signature_type, self.value_hash.clone())
    }
}

/// SHA-256 hex digest of a canonical value
///
/// Deterministic and unsalted; identical values hash identically across
/// consultants and tenants.
pub fn hash_value(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the desired signature set for one consultant record
///
/// At most one signature per type; deduplicated by `type:hash` key. Order
/// is the canonical field order (email, phone, name).
pub fn desired_signatures(record: &ConsultantRecord) -> Vec<NormalizedSignature> {
    let candidates = [
        record.email.as_deref().and_then(NormalizedSignature::email),
        record.phone.as_deref().and_then(NormalizedSignature::phone),
        NormalizedSignature::name(record.first_name.as_deref(), record.last_name.as_deref()),
    ];

    let mut seen: HashSet<SignatureKey> = HashSet::new();
    candidates
        .into_iter()
        .flatten()
        .filter(|sig| seen.insert(sig.key()))
        .collect()
}
