//! Report rendering: fill a document template from a record, export PDF.
//!
//! Every render is a fresh copy/substitute/export/delete cycle against a
//! [`DocumentBackend`]; nothing is cached. The temporary document copy is
//! deleted on every exit path — success, substitution failure, or export
//! failure — via a drop guard, so repeated failures cannot leak copies.

pub mod backend;
pub mod filesystem;
pub mod pdf;
pub mod tokens;

pub use backend::{DocumentBackend, DocumentId, InMemoryDocumentBackend};
pub use filesystem::FilesystemDocumentBackend;

use std::sync::Arc;

use thiserror::Error;

use crate::record::Record;

/// Error type for template filling and PDF export.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("document backend error: {0}")]
    Backend(String),

    #[error("document backend lock poisoned")]
    LockPoisoned,
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// A temporary document copy that is deleted when dropped.
///
/// Deletion is best-effort on the drop path: a failed delete is logged as a
/// leak warning and never masks the primary render result.
struct TempDocument<'a> {
    backend: &'a dyn DocumentBackend,
    id: DocumentId,
}

impl<'a> TempDocument<'a> {
    fn copy_from_template(
        backend: &'a dyn DocumentBackend,
        title: &str,
    ) -> Result<Self, RenderError> {
        let id = backend.copy_template(title)?;
        log::debug!("copied template into temporary document '{id}'");
        Ok(Self { backend, id })
    }

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Drop for TempDocument<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.delete(&self.id) {
            log::warn!("temporary document '{}' not cleaned up: {err}", self.id);
        }
    }
}

/// Renders one record into a filled PDF report.
pub struct ReportRenderer {
    backend: Arc<dyn DocumentBackend>,
}

impl ReportRenderer {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Fill the template with the record's values and export PDF bytes.
    ///
    /// The temporary copy is titled `CAPA_<capa no>` (`CAPA_TEMP` when the
    /// number is empty). A single placeholder replacement failure is logged
    /// and skipped so the remaining substitutions still land; copy and
    /// export failures abort the render.
    pub fn render(&self, record: &Record) -> Result<Vec<u8>, RenderError> {
        let capa_no = record.capa_no().trim();
        let title = if capa_no.is_empty() {
            "CAPA_TEMP".to_string()
        } else {
            format!("CAPA_{capa_no}")
        };

        let doc = TempDocument::copy_from_template(self.backend.as_ref(), &title)?;
        for (token, value) in tokens::substitution_map(record) {
            if let Err(err) = self.backend.replace_text(doc.id(), &token, &value) {
                log::warn!("skipping placeholder {token}: {err}");
            }
        }
        let bytes = self.backend.export_pdf(doc.id())?;
        log::info!(
            "rendered report '{title}' ({} bytes) via {}",
            bytes.len(),
            self.backend.name()
        );
        Ok(bytes)
    }
}
