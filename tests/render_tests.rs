//! Report rendering properties: substitution, tick glyphs, PDF output.

mod common;

use std::sync::Arc;

use capa_portal::{CHECK_MARK, InMemoryDocumentBackend, Record, ReportRenderer};
use common::fixtures::{sample_record, sample_template};
use common::pdf_assertions::{assert_is_pdf, extract_text_from_pdf, page_count, pdf_title};

fn renderer() -> (Arc<InMemoryDocumentBackend>, ReportRenderer) {
    let backend = Arc::new(InMemoryDocumentBackend::new(sample_template()));
    (backend.clone(), ReportRenderer::new(backend))
}

#[test]
fn yes_flag_renders_checkmark_and_identifier_appears_in_title() {
    let (backend, renderer) = renderer();
    let record = sample_record("CAPA-2025-001"); // B and M2 are "YES"

    let pdf = renderer.render(&record).unwrap();
    assert_is_pdf(&pdf);

    let body = backend.last_filled_body().unwrap();
    assert!(body.contains(&format!("Breakdown 2-4h: {CHECK_MARK}")));
    assert!(body.contains(&format!("Cause machine: {CHECK_MARK}")));

    let title = pdf_title(&pdf).unwrap();
    assert_eq!(title, "CAPA_CAPA-2025-001");
}

#[test]
fn checkmark_survives_into_exported_pdf_text() {
    let (_, renderer) = renderer();
    let record = sample_record("CAPA-2025-005");

    let pdf = renderer.render(&record).unwrap();
    let text = extract_text_from_pdf(&pdf).unwrap();
    assert!(
        text.contains(&format!("Breakdown 2-4h: {CHECK_MARK}")),
        "checkmark lost in export; extracted text: {text:?}"
    );
    assert!(text.contains(&format!("Cause machine: {CHECK_MARK}")));
}

#[test]
fn non_yes_flag_renders_empty_text() {
    let (backend, renderer) = renderer();
    let mut record = sample_record("CAPA-2025-002");
    record.set("B", "maybe");
    record.set("M2", "");
    record.set("O2", "NO");

    renderer.render(&record).unwrap();

    let body = backend.last_filled_body().unwrap();
    assert!(body.contains("Breakdown 2-4h:  |"), "non-YES flag must be empty");
    assert!(!body.contains(CHECK_MARK));
}

#[test]
fn no_placeholder_tokens_survive_in_filled_body() {
    let (backend, renderer) = renderer();
    renderer.render(&sample_record("CAPA-2025-003")).unwrap();

    let body = backend.last_filled_body().unwrap();
    assert!(!body.contains("{{"), "unreplaced token left in: {body}");
}

#[test]
fn record_values_appear_in_extracted_pdf_text() {
    let (_, renderer) = renderer();
    let pdf = renderer.render(&sample_record("CAPA-2025-004")).unwrap();

    let text = extract_text_from_pdf(&pdf).unwrap();
    assert!(text.contains("CAPA-2025-004"));
    assert!(text.contains("Engineering"));
    assert!(text.contains("Conveyor bearing seized"));
}

#[test]
fn empty_record_renders_without_error() {
    let (backend, renderer) = renderer();
    let pdf = renderer.render(&Record::new()).unwrap();
    assert_is_pdf(&pdf);
    assert_eq!(pdf_title(&pdf).unwrap(), "CAPA_TEMP");
    assert_eq!(page_count(&pdf), 1);
    assert_eq!(backend.live_documents(), 0);
}
