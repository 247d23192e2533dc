//! End-to-end identity resolution scenarios over the in-memory engine

use staffcore::{ConsultantId, ConsultantRecord, Engine, SignatureType, TenantId};

fn record(id: ConsultantId, first: &str, last: &str, email: &str) -> ConsultantRecord {
    ConsultantRecord::new(id)
        .with_first_name(first)
        .with_last_name(last)
        .with_email(email)
}

#[test]
fn test_reconcile_then_find_shared_email_duplicate() {
    let engine = Engine::in_memory();
    let tenant = TenantId::new();
    let a = ConsultantId::new();
    let b = ConsultantId::new();

    // Same mailbox spelled differently across the two records
    engine
        .directory()
        .upsert_consultant(tenant, record(a, "Jane", "Doe", "Jane.Doe@Example.com"));
    engine
        .directory()
        .upsert_consultant(tenant, record(b, "J", "Doe", " jane.doe@example.com "));

    engine.reconcile(tenant, a).unwrap();
    engine.reconcile(tenant, b).unwrap();

    let duplicates = engine.find_duplicates(tenant, a).unwrap();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].consultant_id, b);
    assert!(duplicates[0].match_types.contains(&SignatureType::Email));
}

#[test]
fn test_reconcile_is_idempotent() {
    let engine = Engine::in_memory();
    let tenant = TenantId::new();
    let id = ConsultantId::new();
    engine
        .directory()
        .upsert_consultant(tenant, record(id, "Jane", "Doe", "jane@example.com").with_phone("+1 (555) 010-2000"));

    let first = engine.reconcile(tenant, id).unwrap();
    assert_eq!(first.created, 3);

    let second = engine.reconcile(tenant, id).unwrap();
    assert!(second.is_noop());
    assert_eq!(engine.signatures().len(), 3);
}

#[test]
fn test_cleared_field_removes_signature_and_duplicate_link() {
    let engine = Engine::in_memory();
    let tenant = TenantId::new();
    let a = ConsultantId::new();
    let b = ConsultantId::new();

    engine
        .directory()
        .upsert_consultant(tenant, record(a, "Jane", "Doe", "a@example.com").with_phone("555-0100"));
    engine
        .directory()
        .upsert_consultant(tenant, record(b, "John", "Roe", "b@example.com").with_phone("(555) 0100"));
    engine.reconcile(tenant, a).unwrap();
    engine.reconcile(tenant, b).unwrap();
    assert_eq!(engine.find_duplicates(tenant, a).unwrap().len(), 1);

    // Clearing the phone on one side breaks the only shared signature
    engine
        .directory()
        .upsert_consultant(tenant, record(a, "Jane", "Doe", "a@example.com"));
    let stats = engine.reconcile(tenant, a).unwrap();
    assert_eq!(stats.removed, 1);
    assert!(engine.find_duplicates(tenant, a).unwrap().is_empty());
}

#[test]
fn test_clusters_ordered_by_size_and_capped() {
    let engine = Engine::in_memory();
    let tenant = TenantId::new();

    // One cluster of three sharing an email, one pair sharing a phone
    for first in ["Sam", "Sami", "Samuel"] {
        let id = ConsultantId::new();
        engine
            .directory()
            .upsert_consultant(tenant, record(id, first, "Lee", "shared@example.com"));
        engine.reconcile(tenant, id).unwrap();
    }
    for first in ["Ana", "Bea"] {
        let id = ConsultantId::new();
        engine.directory().upsert_consultant(
            tenant,
            ConsultantRecord::new(id)
                .with_first_name(first)
                .with_phone("555-0199"),
        );
        engine.reconcile(tenant, id).unwrap();
    }

    let clusters = engine.find_clusters(tenant, 10).unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].consultants.len(), 3);
    assert_eq!(clusters[1].consultants.len(), 2);

    let capped = engine.find_clusters(tenant, 1).unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].consultants.len(), 3);
}

#[test]
fn test_tenants_are_isolated() {
    let engine = Engine::in_memory();
    let tenant_a = TenantId::new();
    let tenant_b = TenantId::new();
    let a = ConsultantId::new();
    let b = ConsultantId::new();

    engine
        .directory()
        .upsert_consultant(tenant_a, record(a, "Jane", "Doe", "same@example.com"));
    engine
        .directory()
        .upsert_consultant(tenant_b, record(b, "Jane", "Doe", "same@example.com"));
    engine.reconcile(tenant_a, a).unwrap();
    engine.reconcile(tenant_b, b).unwrap();

    assert!(engine.find_duplicates(tenant_a, a).unwrap().is_empty());
    assert!(engine.find_clusters(tenant_a, 10).unwrap().is_empty());
}
