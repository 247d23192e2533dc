//! Identifier newtypes and directory records
//!
//! This module defines the foundational identifiers:
//! - TenantId: scopes every read and write to one tenant
//! - ConsultantId / RequirementId: entity identifiers
//! - MatchId: identifier minted for one composed match result
//!
//! Plus the read-only views the consultant directory serves:
//! - ConsultantRecord: raw identity fields (reconciler input)
//! - ConsultantSummary: display view embedded in duplicate results

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a tenant
///
/// Every signature row and every query is scoped to exactly one tenant.
/// Data never crosses tenant boundaries inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Create a new random TenantId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a TenantId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a consultant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsultantId(Uuid);

impl ConsultantId {
    /// Create a new random ConsultantId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a ConsultantId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ConsultantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsultantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a staffing requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequirementId(Uuid);

impl RequirementId {
    /// Create a new random RequirementId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a RequirementId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for RequirementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier minted for one composed match result
///
/// Deterministic composition requires the caller to supply the MatchId;
/// the engine never generates one implicitly during compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Create a new random MatchId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a MatchId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw identity fields for one consultant, as served by the directory
///
/// This is the reconciler's sole input besides the signature store. Fields
/// are optional because CRM records are routinely partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantRecord {
    /// Consultant identifier
    pub id: ConsultantId,
    /// First name, as entered
    pub first_name: Option<String>,
    /// Last name, as entered
    pub last_name: Option<String>,
    /// Email address, as entered
    pub email: Option<String>,
    /// Phone number, as entered
    pub phone: Option<String>,
}

impl ConsultantRecord {
    /// Create a record with only an id; fields are filled via builders
    pub fn new(id: ConsultantId) -> Self {
        ConsultantRecord {
            id,
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        }
    }

    /// Builder: set first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Builder: set last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Builder: set email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder: set phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Display name: non-empty name parts joined with a space
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(first) = self.first_name.as_deref() {
            if !first.trim().is_empty() {
                parts.push(first.trim());
            }
        }
        if let Some(last) = self.last_name.as_deref() {
            if !last.trim().is_empty() {
                parts.push(last.trim());
            }
        }
        parts.join(" ")
    }

    /// Summary view for embedding in duplicate results
    pub fn summary(&self) -> ConsultantSummary {
        ConsultantSummary {
            id: self.id,
            display_name: self.display_name(),
            email: self.email.clone(),
        }
    }
}

/// Display view of a consultant embedded in duplicate query results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantSummary {
    /// Consultant identifier
    pub id: ConsultantId,
    /// Joined first + last name; may be empty for nameless records
    pub display_name: String,
    /// Email as entered, if any
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_unique() {
        assert_ne!(TenantId::new(), TenantId::new());
    }

    #[test]
    fn test_tenant_id_from_string_roundtrip() {
        let id = TenantId::new();
        let parsed = TenantId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_tenant_id_from_string_invalid() {
        assert!(TenantId::from_string("not-a-uuid").is_none());
    }

    #[test]
    fn test_record_display_name_joins_parts() {
        let record = ConsultantRecord::new(ConsultantId::new())
            .with_first_name("Jane")
            .with_last_name("Doe");
        assert_eq!(record.display_name(), "Jane Doe");
    }

    #[test]
    fn test_record_display_name_skips_blank_parts() {
        let record = ConsultantRecord::new(ConsultantId::new())
            .with_first_name("  ")
            .with_last_name("Doe");
        assert_eq!(record.display_name(), "Doe");
    }

    #[test]
    fn test_record_display_name_empty() {
        let record = ConsultantRecord::new(ConsultantId::new());
        assert_eq!(record.display_name(), "");
    }

    #[test]
    fn test_record_summary() {
        let id = ConsultantId::new();
        let record = ConsultantRecord::new(id)
            .with_first_name("Jane")
            .with_email("jane@co.com");
        let summary = record.summary();
        assert_eq!(summary.id, id);
        assert_eq!(summary.display_name, "Jane");
        assert_eq!(summary.email.as_deref(), Some("jane@co.com"));
    }

    #[test]
    fn test_ids_serialize_as_uuid_strings() {
        let id = ConsultantId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains('-'));
    }
}
