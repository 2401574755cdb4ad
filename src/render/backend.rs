//! DocumentBackend trait for abstracting the remote document service.
//!
//! The renderer only needs four operations — copy the template, replace
//! text, export PDF, delete — so they form the seam between the render
//! pipeline and whatever actually stores documents.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::render::RenderError;
use crate::render::pdf;

/// Opaque handle to a document held by a backend.
pub type DocumentId = String;

/// A document service the renderer can fill templates against.
///
/// # Implementations
///
/// - [`super::FilesystemDocumentBackend`]: template file plus a working
///   directory for copies, PDF export done locally.
/// - [`InMemoryDocumentBackend`]: in-process fake for tests and demos.
pub trait DocumentBackend: Send + Sync + Debug {
    /// Duplicate the configured template into a new document with the given
    /// title, returning its handle.
    fn copy_template(&self, title: &str) -> Result<DocumentId, RenderError>;

    /// Replace every exact, case-sensitive occurrence of `needle` in the
    /// document with `replacement`. Returns the number of occurrences
    /// replaced (zero is not an error — a template need not carry every
    /// placeholder).
    fn replace_text(
        &self,
        id: &DocumentId,
        needle: &str,
        replacement: &str,
    ) -> Result<usize, RenderError>;

    /// Export the document as PDF bytes.
    fn export_pdf(&self, id: &DocumentId) -> Result<Vec<u8>, RenderError>;

    /// Delete the document.
    fn delete(&self, id: &DocumentId) -> Result<(), RenderError>;

    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
struct InMemoryDocument {
    title: String,
    body: String,
}

/// An in-memory document backend.
///
/// Holds the template text and live copies in process memory. Besides the
/// [`DocumentBackend`] operations it exposes inspection hooks (last copy
/// title, last filled body, live document count) and failure injection so
/// tests can drive the renderer's error paths.
#[derive(Debug, Default)]
pub struct InMemoryDocumentBackend {
    template: String,
    documents: RwLock<HashMap<DocumentId, InMemoryDocument>>,
    next_id: AtomicU64,
    last_copy_title: RwLock<Option<String>>,
    last_filled_body: RwLock<Option<String>>,
    fail_next_export: AtomicBool,
    failing_needle: RwLock<Option<String>>,
}

impl InMemoryDocumentBackend {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Number of document copies that have not been deleted.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn live_documents(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    /// Title of the most recent template copy.
    pub fn last_copy_title(&self) -> Option<String> {
        self.last_copy_title.read().ok()?.clone()
    }

    /// Body of the most recently exported or deleted document, i.e. the
    /// filled template text as the renderer left it.
    pub fn last_filled_body(&self) -> Option<String> {
        self.last_filled_body.read().ok()?.clone()
    }

    /// Make the next `export_pdf` call fail.
    pub fn fail_next_export(&self) {
        self.fail_next_export.store(true, Ordering::SeqCst);
    }

    /// Make every `replace_text` call for this exact needle fail.
    pub fn fail_replacements_of(&self, needle: impl Into<String>) {
        if let Ok(mut failing) = self.failing_needle.write() {
            *failing = Some(needle.into());
        }
    }

    fn record_filled_body(&self, body: &str) {
        if let Ok(mut last) = self.last_filled_body.write() {
            *last = Some(body.to_string());
        }
    }
}

impl DocumentBackend for InMemoryDocumentBackend {
    fn copy_template(&self, title: &str) -> Result<DocumentId, RenderError> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut documents = self
            .documents
            .write()
            .map_err(|_| RenderError::LockPoisoned)?;
        documents.insert(
            id.clone(),
            InMemoryDocument {
                title: title.to_string(),
                body: self.template.clone(),
            },
        );
        if let Ok(mut last) = self.last_copy_title.write() {
            *last = Some(title.to_string());
        }
        Ok(id)
    }

    fn replace_text(
        &self,
        id: &DocumentId,
        needle: &str,
        replacement: &str,
    ) -> Result<usize, RenderError> {
        if let Ok(failing) = self.failing_needle.read()
            && failing.as_deref() == Some(needle)
        {
            return Err(RenderError::Backend(format!(
                "replacement of '{needle}' refused"
            )));
        }
        let mut documents = self
            .documents
            .write()
            .map_err(|_| RenderError::LockPoisoned)?;
        let doc = documents
            .get_mut(id)
            .ok_or_else(|| RenderError::DocumentNotFound(id.clone()))?;
        let count = doc.body.matches(needle).count();
        if count > 0 {
            doc.body = doc.body.replace(needle, replacement);
        }
        Ok(count)
    }

    fn export_pdf(&self, id: &DocumentId) -> Result<Vec<u8>, RenderError> {
        if self.fail_next_export.swap(false, Ordering::SeqCst) {
            return Err(RenderError::Backend("export refused".to_string()));
        }
        let documents = self
            .documents
            .read()
            .map_err(|_| RenderError::LockPoisoned)?;
        let doc = documents
            .get(id)
            .ok_or_else(|| RenderError::DocumentNotFound(id.clone()))?;
        self.record_filled_body(&doc.body);
        pdf::text_to_pdf(&doc.title, &doc.body)
    }

    fn delete(&self, id: &DocumentId) -> Result<(), RenderError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| RenderError::LockPoisoned)?;
        let doc = documents
            .remove(id)
            .ok_or_else(|| RenderError::DocumentNotFound(id.clone()))?;
        self.record_filled_body(&doc.body);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryDocumentBackend"
    }
}
