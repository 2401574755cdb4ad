//! End-to-end portal behavior over the in-memory adapters.

mod common;

use std::sync::Arc;

use capa_portal::{
    CapaPortal, InMemoryDocumentBackend, InMemoryRecordStore, PortalBuilder, PortalError, Record,
    RecordQuery, SearchFilter, StoreError,
};
use common::fixtures::{sample_record, sample_template};

fn portal() -> (Arc<InMemoryDocumentBackend>, CapaPortal) {
    let backend = Arc::new(InMemoryDocumentBackend::new(sample_template()));
    let portal = PortalBuilder::new()
        .with_store(Arc::new(InMemoryRecordStore::new()))
        .with_document_backend(backend.clone())
        .build()
        .unwrap();
    (backend, portal)
}

#[test]
fn submit_then_fetch_contains_exactly_one_matching_row() {
    let (_, portal) = portal();
    let record = sample_record("CAPA-2025-001");
    portal.submit(&record).unwrap();

    let all = portal.store().fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    // Dates were already ISO, so the stored row equals the input field for field.
    for (column, value) in record.fields() {
        assert_eq!(all[0].get(column), value, "column {column} differs");
    }
}

#[test]
fn find_matches_case_insensitively_and_trims() {
    let (_, portal) = portal();
    portal.submit(&sample_record("CAPA-2025-001")).unwrap();

    let found = portal.find("  capa-2025-001 ").unwrap().unwrap();
    assert_eq!(found.capa_no(), "CAPA-2025-001");
}

#[test]
fn duplicate_submission_fails_and_leaves_table_unchanged() {
    let (_, portal) = portal();
    portal.submit(&sample_record("CAPA-2025-001")).unwrap();

    let mut second = sample_record("capa-2025-001");
    second.set("DEPARTMENT", "Sales");
    let result = portal.submit(&second);
    assert!(matches!(
        result,
        Err(PortalError::Store(StoreError::Duplicate(_)))
    ));

    let all = portal.store().fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].department(), "Engineering");
}

#[test]
fn department_filter_is_substring_and_case_insensitive() {
    let (_, portal) = portal();
    for (no, dept) in [
        ("CAPA-1", "Engineering"),
        ("CAPA-2", "engineering ops"),
        ("CAPA-3", "Sales"),
    ] {
        let mut rec = sample_record(no);
        rec.set("DEPARTMENT", dept);
        portal.submit(&rec).unwrap();
    }

    let filter = SearchFilter::new().query(RecordQuery::new().department("eng"));
    let hits = portal.search(&filter).unwrap();
    let nos: Vec<_> = hits.iter().map(|r| r.capa_no().to_string()).collect();
    assert_eq!(nos, vec!["CAPA-1", "CAPA-2"]);
}

#[test]
fn date_range_includes_end_date_and_excludes_two_days_past() {
    let (_, portal) = portal();
    for (no, date) in [
        ("CAPA-1", "2025-01-15"),
        ("CAPA-2", "2025-01-31"),
        ("CAPA-3", "2025-02-02"),
    ] {
        let mut rec = sample_record(no);
        rec.set("DATE_OF_INCIDENT", date);
        portal.submit(&rec).unwrap();
    }

    let filter = SearchFilter::new().query(
        RecordQuery::new()
            .start_date("2025-01-01")
            .end_date("2025-01-31"),
    );
    let hits = portal.search(&filter).unwrap();
    let nos: Vec<_> = hits.iter().map(|r| r.capa_no().to_string()).collect();
    assert!(nos.contains(&"CAPA-2".to_string()), "end date must be inclusive");
    assert!(!nos.contains(&"CAPA-3".to_string()));
}

#[test]
fn unparseable_date_filter_is_treated_as_absent() {
    let (_, portal) = portal();
    portal.submit(&sample_record("CAPA-1")).unwrap();

    let filter = SearchFilter::new().query(RecordQuery::new().start_date("soonish"));
    assert_eq!(portal.search(&filter).unwrap().len(), 1);
}

#[test]
fn fetch_all_on_empty_table_is_empty_not_error() {
    let (_, portal) = portal();
    assert!(portal.store().fetch_all().unwrap().is_empty());
}

#[test]
fn render_report_round_trips_through_lookup() {
    let (backend, portal) = portal();
    portal.submit(&sample_record("CAPA-2025-001")).unwrap();

    let pdf = portal.render_report("capa-2025-001").unwrap();
    common::pdf_assertions::assert_is_pdf(&pdf);
    assert_eq!(backend.live_documents(), 0, "temporary copy must be deleted");
}
