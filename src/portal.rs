//! The portal facade: what the presentation boundary calls.
//!
//! Wires a [`RecordStore`] and a [`ReportRenderer`] together and owns the
//! submission-time validation. Built through [`PortalBuilder`] so the
//! storage adapter and document backend are injected, never hard-wired.

use std::sync::Arc;

use crate::error::PortalError;
use crate::record::Record;
use crate::render::{DocumentBackend, ReportRenderer};
use crate::store::{RecordQuery, RecordStore, capa_no_eq};

/// Search parameters of the portal's search surface: the store-level query
/// plus an optional CAPA-number substring filter.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: RecordQuery,
    pub capa_no: Option<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: RecordQuery) -> Self {
        self.query = query;
        self
    }

    pub fn capa_no(mut self, capa_no: impl Into<String>) -> Self {
        self.capa_no = Some(capa_no.into());
        self
    }
}

/// The CAPA portal: submit, search, and render reports.
pub struct CapaPortal {
    store: Arc<dyn RecordStore>,
    renderer: ReportRenderer,
}

impl CapaPortal {
    /// Validate and persist a new submission.
    ///
    /// An empty or whitespace-only CAPA number is rejected before the store
    /// is touched. Duplicate CAPA numbers are rejected by the store.
    pub fn submit(&self, record: &Record) -> Result<(), PortalError> {
        if record.capa_no().trim().is_empty() {
            return Err(PortalError::Validation(
                "CAPA number must not be empty".to_string(),
            ));
        }
        self.store.append(record)?;
        log::info!(
            "stored CAPA '{}' via {}",
            record.capa_no(),
            self.store.name()
        );
        Ok(())
    }

    /// All records passing the filter, in table order.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<Record>, PortalError> {
        let mut results = self.store.query(&filter.query)?;
        if let Some(needle) = &filter.capa_no {
            let needle = needle.trim().to_lowercase();
            results.retain(|rec| rec.capa_no().to_lowercase().contains(&needle));
        }
        Ok(results)
    }

    /// First record matching the CAPA number, ignoring case and whitespace.
    pub fn find(&self, capa_no: &str) -> Result<Option<Record>, PortalError> {
        Ok(self.store.find_by_capa_no(capa_no)?)
    }

    /// Look a record up and render its filled report as PDF bytes.
    pub fn render_report(&self, capa_no: &str) -> Result<Vec<u8>, PortalError> {
        let record = self
            .find(capa_no)?
            .ok_or_else(|| PortalError::NotFound(capa_no.trim().to_string()))?;
        debug_assert!(capa_no_eq(record.capa_no(), capa_no));
        Ok(self.renderer.render(&record)?)
    }

    /// The injected store, for callers that need raw table access.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

/// Builder wiring the portal's two collaborators.
#[derive(Default)]
pub struct PortalBuilder {
    store: Option<Arc<dyn RecordStore>>,
    backend: Option<Arc<dyn DocumentBackend>>,
}

impl PortalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_document_backend(mut self, backend: Arc<dyn DocumentBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<CapaPortal, PortalError> {
        let store = self
            .store
            .ok_or_else(|| PortalError::Config("no record store provided".to_string()))?;
        let backend = self
            .backend
            .ok_or_else(|| PortalError::Config("no document backend provided".to_string()))?;
        Ok(CapaPortal {
            store,
            renderer: ReportRenderer::new(backend),
        })
    }
}
